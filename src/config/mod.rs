#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

/// Live enrollment settings shared by the services.
///
/// The cap can be changed while the server runs; validations read it once
/// per call, so courses stored under an older cap are left as they are.
#[derive(Debug)]
pub struct EnrollmentSettings {
    max_students_per_course: AtomicUsize,
}

impl EnrollmentSettings {
    pub fn new(max_students_per_course: usize) -> Self {
        Self {
            max_students_per_course: AtomicUsize::new(max_students_per_course),
        }
    }

    pub fn max_students_per_course(&self) -> usize {
        self.max_students_per_course.load(Ordering::Acquire)
    }

    pub fn set_max_students_per_course(&self, limit: usize) {
        let previous = self.max_students_per_course.swap(limit, Ordering::AcqRel);
        tracing::info!(previous, limit, "Enrollment cap changed");
    }
}

impl Default for EnrollmentSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STUDENTS_PER_COURSE)
    }
}
