//! Student CRUD routes. Nest under `/api/students`.

use crate::handlers::students::{create, delete as delete_handler, get_all, get_by_id, get_paged, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_all).post(create))
        .route("/paged", get(get_paged))
        .route("/:id", get(get_by_id).put(update).delete(delete_handler))
        .with_state(state)
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
