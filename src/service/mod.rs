//! StudentService: request validation and business rules over the repository.

mod students;
mod validation;
pub use students::{StudentCreated, StudentService, CREATED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
pub use validation::RequestValidator;
