use crate::config::DEFAULT_MAX_STUDENTS_PER_COURSE;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_range, Validate,
};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;

pub const MAX_STUDENTS_ENV: &str = "MAX_STUDENTS_PER_COURSE";
const ENROLLMENT_CAP_CEILING: usize = 10_000;
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub enrollment: EnrollmentConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentConfig {
    #[serde(default = "default_max_students")]
    pub max_students_per_course: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_students() -> usize {
    DEFAULT_MAX_STUDENTS_PER_COURSE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            max_students_per_course: default_max_students(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists, otherwise starts from defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Applies `MAX_STUDENTS_PER_COURSE` from the environment, if set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(MAX_STUDENTS_ENV) {
            let limit: usize = raw.trim().parse().map_err(|_| RegistryError::ConfigError {
                message: format!("{} must be a non-negative integer, got '{}'", MAX_STUDENTS_ENV, raw),
            })?;
            tracing::info!("🔧 Enrollment cap overridden by {}: {}", MAX_STUDENTS_ENV, limit);
            self.enrollment.max_students_per_course = limit;
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_students_per_course(&self) -> usize {
        self.enrollment.max_students_per_course
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", self.server.port as usize, 1)?;
        validate_range(
            "enrollment.max_students_per_course",
            self.enrollment.max_students_per_course,
            1,
            ENROLLMENT_CAP_CEILING,
        )?;
        validate_one_of("logging.format", self.log_format(), &LOG_FORMATS)?;
        Ok(())
    }
}
