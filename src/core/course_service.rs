use crate::config::EnrollmentSettings;
use crate::core::capacity::CapacityValidator;
use crate::domain::model::{
    dedup_students, Course, CourseDetail, CourseFilter, CourseId, CoursePatch, NewCourse,
    StudentId,
};
use crate::domain::ports::CourseStore;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::normalize_name;
use std::sync::Arc;

/// Course operations on top of a [`CourseStore`].
///
/// Every write that sets a student list is checked against the enrollment
/// cap before it reaches the store, so no stored course ever holds more
/// students than the cap in force at the time of its last write.
pub struct CourseService<S: CourseStore> {
    store: Arc<S>,
    settings: Arc<EnrollmentSettings>,
}

impl<S: CourseStore> CourseService<S> {
    pub fn new(store: Arc<S>, settings: Arc<EnrollmentSettings>) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &EnrollmentSettings {
        &self.settings
    }

    fn validator(&self) -> CapacityValidator {
        CapacityValidator::new(self.settings.max_students_per_course())
    }

    /// Deduplicates, checks the cap, then checks that every student exists.
    async fn prepare_students(&self, students: Vec<StudentId>) -> Result<Vec<StudentId>> {
        let students = dedup_students(students);
        self.validator().validate(students.len()).inspect_err(|e| {
            tracing::warn!("Rejected enrollment: {}", e);
        })?;

        let found = self.store.find_students(&students).await?;
        if found.len() != students.len() {
            let missing = students
                .iter()
                .find(|id| !found.iter().any(|s| s.id == **id))
                .map(|id| id.to_string())
                .unwrap_or_default();
            return Err(RegistryError::invalid_input(
                "students",
                format!("Unknown student id {}", missing),
            ));
        }
        Ok(students)
    }

    pub async fn list(&self, filter: CourseFilter) -> Result<Vec<Course>> {
        let filter = filter.narrowed();
        let courses = self.store.list_courses(&filter).await?;
        tracing::debug!(?filter, count = courses.len(), "Listed courses");
        Ok(courses)
    }

    pub async fn get(&self, id: CourseId) -> Result<CourseDetail> {
        let course = self
            .store
            .get_course(id)
            .await?
            .ok_or_else(|| RegistryError::course_not_found(id.0))?;

        let students = self.store.find_students(&course.students).await?;
        if students.len() != course.students.len() {
            tracing::warn!(
                "Course {} references {} students, {} resolved",
                id,
                course.students.len(),
                students.len()
            );
        }

        Ok(CourseDetail {
            id: course.id,
            name: course.name,
            students,
        })
    }

    pub async fn create(&self, new_course: NewCourse) -> Result<Course> {
        let name = normalize_name("name", &new_course.name)?;
        let students = self.prepare_students(new_course.students).await?;

        let course = self.store.insert_course(name, students).await?;
        tracing::info!(
            "Created course {} '{}' with {} students",
            course.id,
            course.name,
            course.students.len()
        );
        Ok(course)
    }

    pub async fn update(&self, id: CourseId, patch: CoursePatch) -> Result<Course> {
        let current = self
            .store
            .get_course(id)
            .await?
            .ok_or_else(|| RegistryError::course_not_found(id.0))?;

        let name = patch
            .name
            .as_deref()
            .map(|name| normalize_name("name", name))
            .transpose()?;

        let students = match patch.students {
            Some(students) => Some(self.prepare_students(students).await?),
            None => {
                self.validator()
                    .validate(current.students.len())
                    .inspect_err(|e| tracing::warn!("Rejected update of course {}: {}", id, e))?;
                None
            }
        };

        let updated = self
            .store
            .update_course(id, CoursePatch { name, students })
            .await?
            .ok_or_else(|| RegistryError::course_not_found(id.0))?;
        tracing::info!("Updated course {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: CourseId) -> Result<()> {
        if !self.store.delete_course(id).await? {
            return Err(RegistryError::course_not_found(id.0));
        }
        tracing::info!("Deleted course {}", id);
        Ok(())
    }
}
