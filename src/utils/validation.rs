use crate::utils::error::{LpmError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LpmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LpmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(LpmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(LpmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LpmError::invalid_parameter(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(LpmError::invalid_parameter(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(LpmError::invalid_parameter(format!(
            "{} must not be negative, got {}",
            field_name, value
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // Written as a negated containment check so NaN is rejected too.
    if !(value >= min && value <= max) {
        return Err(LpmError::invalid_parameter(format!(
            "{} must be between {} and {}, got {}",
            field_name, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.directory", ".").is_ok());
        assert!(validate_path("output.directory", "").is_err());
        assert!(validate_path("output.directory", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("rho", 0.5, -1.0, 1.0).is_ok());
        assert!(validate_range("rho", -1.0, -1.0, 1.0).is_ok());
        assert!(validate_range("rho", 1.01, -1.0, 1.0).is_err());
        assert!(validate_range("rho", f64::NAN, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("sd_x", 0.0).is_ok());
        assert!(validate_non_negative("sd_x", 1.5).is_ok());
        assert!(validate_non_negative("sd_x", -0.1).is_err());
        assert!(validate_non_negative("sd_x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("output.data_file", "dataset.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("output.data_file", "dataset.txt", &["csv"]).is_err());
        assert!(validate_file_extension("output.plot_file", "plot", &["svg"]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("label1", "Group 1").is_ok());
        assert!(validate_non_empty_string("label1", "   ").is_err());
    }
}
