use crate::domain::model::{Course, CourseFilter, CourseId, CoursePatch, Student, StudentId};
use crate::domain::ports::CourseStore;
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    // Ids are handed out in increasing order and never reused, so key order is insertion order.
    courses: BTreeMap<CourseId, Course>,
    students: BTreeMap<StudentId, Student>,
    last_course_id: u64,
    last_student_id: u64,
}

impl Tables {
    fn ensure_students_exist(&self, ids: &[StudentId]) -> Result<()> {
        match ids.iter().find(|id| !self.students.contains_key(id)) {
            Some(missing) => Err(RegistryError::StorageError {
                message: format!("enrollment references unknown student {}", missing),
            }),
            None => Ok(()),
        }
    }
}

/// Process-local store. Writes take the table lock exclusively; reads clone
/// out of a shared lock, so callers never see a half-applied write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let tables = self.tables.read().await;

        // Unique key, no scan needed.
        if let Some(id) = filter.id {
            return Ok(tables
                .courses
                .get(&id)
                .filter(|course| filter.matches(course))
                .cloned()
                .into_iter()
                .collect());
        }

        Ok(tables
            .courses
            .values()
            .filter(|course| filter.matches(course))
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.get(&id).cloned())
    }

    async fn insert_course(&self, name: String, students: Vec<StudentId>) -> Result<Course> {
        let mut tables = self.tables.write().await;
        tables.ensure_students_exist(&students)?;

        tables.last_course_id += 1;
        let course = Course {
            id: CourseId(tables.last_course_id),
            name,
            students,
        };
        tables.courses.insert(course.id, course.clone());
        tracing::debug!("Stored course {}", course.id);
        Ok(course)
    }

    async fn update_course(&self, id: CourseId, patch: CoursePatch) -> Result<Option<Course>> {
        let mut tables = self.tables.write().await;
        if let Some(students) = &patch.students {
            tables.ensure_students_exist(students)?;
        }

        let Some(course) = tables.courses.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            course.name = name;
        }
        if let Some(students) = patch.students {
            course.students = students;
        }
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.courses.remove(&id).is_some())
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().cloned().collect())
    }

    async fn insert_student(&self, name: String) -> Result<Student> {
        let mut tables = self.tables.write().await;
        tables.last_student_id += 1;
        let student = Student {
            id: StudentId(tables.last_student_id),
            name,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_students(&self, ids: &[StudentId]) -> Result<Vec<Student>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.students.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_courses_keep_insertion_order() {
        let store = InMemoryStore::new();
        for name in ["Chemistry", "Art", "Biology"] {
            store.insert_course(name.to_string(), vec![]).await.unwrap();
        }

        let names: Vec<String> = store
            .list_courses(&CourseFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Chemistry", "Art", "Biology"]);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();
        let first = store.insert_course("A".to_string(), vec![]).await.unwrap();
        assert!(store.delete_course(first.id).await.unwrap());
        assert!(!store.delete_course(first.id).await.unwrap());

        let second = store.insert_course("B".to_string(), vec![]).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let store = InMemoryStore::new();
        let student = store.insert_student("Ada".to_string()).await.unwrap();
        let course = store
            .insert_course("Logic".to_string(), vec![student.id])
            .await
            .unwrap();

        let renamed = store
            .update_course(
                course.id,
                CoursePatch {
                    name: Some("Formal Logic".to_string()),
                    students: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(renamed.name, "Formal Logic");
        assert_eq!(renamed.students, vec![student.id]);
        assert!(store
            .update_course(CourseId(999), CoursePatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_student_reference_is_storage_error() {
        let store = InMemoryStore::new();
        let result = store
            .insert_course("Physics".to_string(), vec![StudentId(42)])
            .await;

        assert!(matches!(result, Err(RegistryError::StorageError { .. })));
        assert!(store
            .list_courses(&CourseFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_students_skips_unknown_ids() {
        let store = InMemoryStore::new();
        let ada = store.insert_student("Ada".to_string()).await.unwrap();
        let alan = store.insert_student("Alan".to_string()).await.unwrap();

        let found = store
            .find_students(&[alan.id, StudentId(77), ada.id])
            .await
            .unwrap();
        assert_eq!(found, vec![alan, ada]);
    }
}
