//! Router assembly.

mod common;
mod students;

pub use common::{common_routes, common_routes_with_ready};
pub use students::student_routes;

use crate::state::AppState;
use axum::http::HeaderValue;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const STUDENTS_BASE_PATH: &str = "/api/students";

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Student routes nested under `/api/students`.
pub fn api_routes(state: AppState) -> Router {
    Router::new().nest(STUDENTS_BASE_PATH, student_routes(state))
}

/// Request tracing, a body size limit and single-origin CORS (any header, any method).
///
/// The origin is only echoed back to requests that send exactly `allowed_origin`.
/// The body limit sits outside CORS: preflight responses need a `Default` body.
pub fn with_layers(router: Router, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_headers(Any)
        .allow_methods(Any);
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
            .layer(cors),
    )
}
