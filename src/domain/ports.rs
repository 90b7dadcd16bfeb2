use crate::domain::model::{Course, CourseFilter, CourseId, CoursePatch, Student, StudentId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence for courses and students.
///
/// Implementations must apply each write atomically and serve reads from a
/// consistent snapshot. Only ids are validated at this level; capacity and
/// name rules belong to the services.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Courses matching `filter`, in insertion order.
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>>;
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>>;
    async fn insert_course(&self, name: String, students: Vec<StudentId>) -> Result<Course>;
    /// Applies only the fields present in `patch`. `None` when the course is gone.
    async fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Option<Course>>;
    /// Returns `false` when there was nothing to delete.
    async fn delete_course(&self, id: CourseId) -> Result<bool>;

    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn insert_student(&self, name: String) -> Result<Student>;
    /// Resolves ids to records, in the order given, skipping unknown ids.
    async fn find_students(&self, ids: &[StudentId]) -> Result<Vec<Student>>;
}
