pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::memory_store::InMemoryStore;
pub use api::{build_app, AppState, SharedState};
pub use config::{toml_config::AppConfig, EnrollmentSettings};
pub use crate::core::{
    capacity::CapacityValidator, course_service::CourseService, student_service::StudentService,
};
pub use utils::error::{CapacityExceeded, RegistryError, Result};
