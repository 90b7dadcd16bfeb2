pub mod capacity;
pub mod course_service;
pub mod student_service;

pub use crate::domain::model::{Course, CourseDetail, CourseFilter, CourseId, CoursePatch, NewCourse, Student, StudentId};
pub use crate::domain::ports::CourseStore;
pub use crate::utils::error::Result;
