//! Shared application state for the student routes.

use crate::service::StudentService;
use crate::store::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StudentService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self {
            service: Arc::new(StudentService::new(repo)),
        }
    }
}
