//! HTTP surface: one handler per operation, composed into an axum router.
//!
//! Resource routes live under [`API_PREFIX`]; `/health` sits at the root.

pub mod error;
pub mod handlers;

use crate::config::EnrollmentSettings;
use crate::core::course_service::CourseService;
use crate::core::student_service::StudentService;
use crate::domain::ports::CourseStore;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/api/v1";

pub struct AppState<S: CourseStore> {
    pub courses: CourseService<S>,
    pub students: StudentService<S>,
}

impl<S: CourseStore> AppState<S> {
    pub fn new(store: Arc<S>, settings: Arc<EnrollmentSettings>) -> Self {
        Self {
            courses: CourseService::new(store.clone(), settings),
            students: StudentService::new(store),
        }
    }
}

pub type SharedState<S> = Arc<AppState<S>>;

/// Resource routes without the version prefix.
pub fn routes<S: CourseStore + 'static>() -> Router<SharedState<S>> {
    Router::new()
        .route(
            "/courses/",
            get(handlers::list_courses::<S>).post(handlers::create_course::<S>),
        )
        .route(
            "/courses/{id}/",
            get(handlers::get_course::<S>)
                .patch(handlers::update_course::<S>)
                .delete(handlers::delete_course::<S>),
        )
        .route(
            "/students/",
            get(handlers::list_students::<S>).post(handlers::create_student::<S>),
        )
        .route("/students/{id}/", get(handlers::get_student::<S>))
}

pub fn build_app<S: CourseStore + 'static>(state: SharedState<S>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check::<S>))
        .nest(API_PREFIX, routes::<S>())
        .with_state(state)
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}{}", addr, API_PREFIX);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
