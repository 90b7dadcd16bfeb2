use std::fmt;
use thiserror::Error;

/// A write would leave a course with more students than the enrollment cap allows.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Course would have {attempted} students, the limit is {limit}")]
pub struct CapacityExceeded {
    pub attempted: usize,
    pub limit: usize,
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    CapacityExceeded(#[from] CapacityExceeded),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Storage,
    Configuration,
}

impl RegistryError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// `id` is whatever the caller looked up, parsed or not.
    pub fn course_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource: "Course",
            id: id.to_string(),
        }
    }

    pub fn student_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource: "Student",
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::CapacityExceeded(_) | Self::InvalidInput { .. } => ErrorCategory::Validation,
            Self::StorageError { .. } => ErrorCategory::Storage,
            Self::ConfigError { .. } | Self::IoError(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::NotFound | ErrorCategory::Validation
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_message_carries_counts() {
        let err: RegistryError = CapacityExceeded {
            attempted: 21,
            limit: 20,
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Course would have 21 students, the limit is 20"
        );
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_storage_errors_are_not_client_errors() {
        let err = RegistryError::StorageError {
            message: "lock poisoned".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(!err.is_client_error());

        let missing = RegistryError::course_not_found(7);
        assert_eq!(missing.to_string(), "Course 7 not found");
        assert!(missing.is_client_error());
    }
}
