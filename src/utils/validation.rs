use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn config_error(field_name: &str, value: impl std::fmt::Display, reason: &str) -> RegistryError {
    RegistryError::ConfigError {
        message: format!("{} = '{}': {}", field_name, value, reason),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(config_error(
            field_name,
            value,
            &format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(config_error(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(config_error(
            field_name,
            value,
            &format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(config_error(
            field_name,
            value,
            &format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Trims a user-supplied name and rejects it when nothing is left.
pub fn normalize_name(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::invalid_input(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("server.port", 8000, 1).is_ok());
        assert!(validate_positive_number("server.port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("enrollment.max_students_per_course", 20, 1, 10_000).is_ok());
        assert!(validate_range("enrollment.max_students_per_course", 0, 1, 10_000).is_err());
        assert!(validate_range("enrollment.max_students_per_course", 10_001, 1, 10_000).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("name", "  Rust 101 ").unwrap(), "Rust 101");
        assert!(matches!(
            normalize_name("name", "   "),
            Err(RegistryError::InvalidInput { .. })
        ));
        assert!(validate_non_empty_string("server.host", "").is_err());
    }
}
