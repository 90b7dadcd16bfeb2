use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

/// A course references its students by id; the store resolves them on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub students: Vec<StudentId>,
}

/// A course together with its enrolled students resolved to full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub id: CourseId,
    pub name: String,
    pub students: Vec<Student>,
}

impl CourseDetail {
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.students.iter().map(|s| s.id).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewCourse {
    pub name: String,
    #[serde(default)]
    pub students: Vec<StudentId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub students: Option<Vec<StudentId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<CourseId>,
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn by_id(id: CourseId) -> Self {
        Self {
            id: Some(id),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Keeps a single query path: the id filter wins over the name filter.
    pub fn narrowed(self) -> Self {
        match self.id {
            Some(id) => Self::by_id(id),
            None => self,
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        if let Some(id) = self.id {
            if course.id != id {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if &course.name != name {
                return false;
            }
        }
        true
    }
}

/// Drops repeated ids, keeping the first occurrence so insertion order survives.
pub fn dedup_students(students: Vec<StudentId>) -> Vec<StudentId> {
    let mut seen = std::collections::HashSet::with_capacity(students.len());
    students.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64, name: &str) -> Course {
        Course {
            id: CourseId(id),
            name: name.to_string(),
            students: vec![],
        }
    }

    #[test]
    fn test_filter_prefers_id_over_name() {
        let filter = CourseFilter {
            id: Some(CourseId(2)),
            name: Some("Algebra".to_string()),
        }
        .narrowed();

        assert!(filter.name.is_none());
        assert!(filter.matches(&course(2, "Geometry")));
        assert!(!filter.matches(&course(1, "Algebra")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CourseFilter::default();
        assert!(filter.matches(&course(1, "Algebra")));
        assert!(filter.matches(&course(9, "")));
    }

    #[test]
    fn test_dedup_students_keeps_first_occurrence() {
        let ids = vec![StudentId(3), StudentId(1), StudentId(3), StudentId(2), StudentId(1)];
        assert_eq!(
            dedup_students(ids),
            vec![StudentId(3), StudentId(1), StudentId(2)]
        );
    }

    #[test]
    fn test_course_serializes_ids_as_numbers() {
        let course = Course {
            id: CourseId(4),
            name: "Biology".to_string(),
            students: vec![StudentId(7), StudentId(8)],
        };
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 4, "name": "Biology", "students": [7, 8]})
        );
    }
}
