use crate::core::engine::DEFAULT_SEED;
use crate::core::GenerationRequest;
use crate::utils::error::{LpmError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub normal_count: Option<usize>,
    pub extreme_count: Option<usize>,
    pub label1: Option<String>,
    pub label2: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub data_file: Option<String>,
    pub plot_file: Option<String>,
    pub save_data: Option<bool>,
    pub save_plot: Option<bool>,
    pub omit_degenerate_boundaries: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LpmError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LpmError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn seed(&self) -> u64 {
        self.generation.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn output_directory(&self) -> &str {
        self.output.directory.as_deref().unwrap_or(".")
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match self.logging.format.as_deref() {
            None | Some("compact") => Ok(LogFormat::Compact),
            Some("json") => Ok(LogFormat::Json),
            Some(other) => Err(LpmError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: compact, json".to_string(),
            }),
        }
    }

    /// Builds the run request, falling back to the defaults for every
    /// missing setting.
    pub fn to_request(&self) -> GenerationRequest {
        let defaults = GenerationRequest::default();
        GenerationRequest {
            normal_count: self.generation.normal_count.unwrap_or(defaults.normal_count),
            extreme_count: self.generation.extreme_count.unwrap_or(defaults.extreme_count),
            label1: self.generation.label1.clone().unwrap_or(defaults.label1),
            label2: self.generation.label2.clone().unwrap_or(defaults.label2),
            save_data: self.output.save_data.unwrap_or(defaults.save_data),
            save_plot: self.output.save_plot.unwrap_or(defaults.save_plot),
            data_file: self.output.data_file.clone().unwrap_or(defaults.data_file),
            plot_file: self.output.plot_file.clone().unwrap_or(defaults.plot_file),
            omit_degenerate_boundaries: self
                .output
                .omit_degenerate_boundaries
                .unwrap_or(defaults.omit_degenerate_boundaries),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output.directory", self.output_directory())?;
        self.log_format()?;
        self.to_request().validate()
    }
}
