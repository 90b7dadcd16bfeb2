use crate::domain::model::{Student, StudentId};
use crate::domain::ports::CourseStore;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::normalize_name;
use std::sync::Arc;

/// Minimal student directory so courses have someone to enroll.
pub struct StudentService<S: CourseStore> {
    store: Arc<S>,
}

impl<S: CourseStore> StudentService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Student>> {
        self.store.list_students().await
    }

    pub async fn get(&self, id: StudentId) -> Result<Student> {
        self.store
            .find_students(&[id])
            .await?
            .pop()
            .ok_or_else(|| RegistryError::student_not_found(id.0))
    }

    pub async fn create(&self, name: &str) -> Result<Student> {
        let name = normalize_name("name", name)?;
        let student = self.store.insert_student(name).await?;
        tracing::debug!("Created student {}", student.id);
        Ok(student)
    }
}
