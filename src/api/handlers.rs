use crate::api::SharedState;
use crate::domain::model::{
    Course, CourseDetail, CourseFilter, CourseId, CoursePatch, NewCourse, Student, StudentId,
};
use crate::domain::ports::CourseStore;
use crate::utils::error::{RegistryError, Result};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ListQuery {
    /// Blank parameters are ignored; a non-numeric id is rejected.
    pub fn into_filter(self) -> Result<CourseFilter> {
        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(CourseId(raw.parse().map_err(|_| {
                RegistryError::invalid_input("id", format!("'{}' is not a valid course id", raw))
            })?)),
        };
        let name = self.name.filter(|name| !name.is_empty());
        Ok(CourseFilter { id, name })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub expand: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewStudent {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CourseResponse {
    Flat(Course),
    Expanded(CourseDetail),
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub max_students_per_course: usize,
}

type PathSegment = std::result::Result<Path<String>, PathRejection>;

/// A segment that is not a valid id can never match a record, so it is reported as missing.
fn path_id(path: PathSegment, not_found: impl Fn(&str) -> RegistryError) -> Result<u64> {
    let Path(raw) = path.map_err(|rejection| not_found(&rejection.body_text()))?;
    raw.parse().map_err(|_| not_found(&raw))
}

fn course_id(path: PathSegment) -> Result<CourseId> {
    path_id(path, |raw| RegistryError::course_not_found(raw)).map(CourseId)
}

fn student_id(path: PathSegment) -> Result<StudentId> {
    path_id(path, |raw| RegistryError::student_not_found(raw)).map(StudentId)
}

fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| RegistryError::invalid_input("query", rejection.body_text()))
}

fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RegistryError::invalid_input("body", rejection.body_text()))
}

pub async fn health_check<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        max_students_per_course: state.courses.settings().max_students_per_course(),
    })
}

pub async fn list_courses<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Course>>> {
    let filter = query_params(query)?.into_filter()?;
    Ok(Json(state.courses.list(filter).await?))
}

pub async fn get_course<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    path: PathSegment,
    query: std::result::Result<Query<DetailQuery>, QueryRejection>,
) -> Result<Json<CourseResponse>> {
    let id = course_id(path)?;
    let query = query_params(query)?;
    let detail = state.courses.get(id).await?;

    let response = match query.expand.as_deref() {
        Some("students") => CourseResponse::Expanded(detail),
        _ => CourseResponse::Flat(Course {
            id: detail.id,
            students: detail.student_ids(),
            name: detail.name,
        }),
    };
    Ok(Json(response))
}

pub async fn create_course<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    body: std::result::Result<Json<NewCourse>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>)> {
    let new_course = json_body(body)?;
    let course = state.courses.create(new_course).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    path: PathSegment,
    body: std::result::Result<Json<CoursePatch>, JsonRejection>,
) -> Result<Json<Course>> {
    let id = course_id(path)?;
    let patch = json_body(body)?;
    Ok(Json(state.courses.update(id, patch).await?))
}

pub async fn delete_course<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    path: PathSegment,
) -> Result<StatusCode> {
    let id = course_id(path)?;
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_students<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<Vec<Student>>> {
    Ok(Json(state.students.list().await?))
}

pub async fn get_student<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    path: PathSegment,
) -> Result<Json<Student>> {
    let id = student_id(path)?;
    Ok(Json(state.students.get(id).await?))
}

pub async fn create_student<S: CourseStore + 'static>(
    State(state): State<SharedState<S>>,
    body: std::result::Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>)> {
    let new_student = json_body(body)?;
    let student = state.students.create(&new_student.name).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parsing() {
        let filter = ListQuery {
            id: Some("12".to_string()),
            name: None,
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.id, Some(CourseId(12)));

        let blank = ListQuery {
            id: Some(" ".to_string()),
            name: Some(String::new()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(blank, CourseFilter::default());

        let bad = ListQuery {
            id: Some("twelve".to_string()),
            name: None,
        }
        .into_filter();
        assert!(matches!(bad, Err(RegistryError::InvalidInput { .. })));
    }
}
