use thiserror::Error;

#[derive(Error, Debug)]
pub enum LpmError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Degenerate fit: {message}")]
    DegenerateFit { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering error: {message}")]
    PlotError { message: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Parameter,
    Numerical,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LpmError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn degenerate_fit(message: impl Into<String>) -> Self {
        Self::DegenerateFit {
            message: message.into(),
        }
    }

    pub fn plot(message: impl Into<String>) -> Self {
        Self::PlotError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParameter { .. } => ErrorCategory::Parameter,
            Self::DegenerateFit { .. } => ErrorCategory::Numerical,
            Self::IoError(_) | Self::CsvError(_) | Self::PlotError { .. } => ErrorCategory::Output,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A different seed or larger sample usually fixes a singular fit.
            ErrorCategory::Numerical => ErrorSeverity::Medium,
            ErrorCategory::Parameter | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidParameter { message } => {
                format!("The generation parameters are not valid: {}", message)
            }
            Self::DegenerateFit { message } => {
                format!("The decision boundary could not be computed: {}", message)
            }
            Self::IoError(e) => format!("Could not write output files: {}", e),
            Self::CsvError(e) => format!("Could not encode the dataset as CSV: {}", e),
            Self::PlotError { message } => format!("Could not render the plot: {}", message),
            Self::TomlError(e) => format!("The configuration file is not valid TOML: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has an invalid value '{}': {}", field, value, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Parameter => {
                "Check counts, labels and distribution parameters (|rho| <= 1, sd >= 0)"
            }
            ErrorCategory::Numerical => {
                "Use a different seed or more observations, or enable omit_degenerate_boundaries"
            }
            ErrorCategory::Output => "Make sure the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, LpmError>;
