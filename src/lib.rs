//! Student records: REST backend for listing, paging, creating, updating and
//! deleting student records over PostgreSQL.

pub mod config;
pub mod doc;
pub mod dto;
pub mod error;
pub mod migration;
pub mod model;
pub mod response;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::Settings;
pub use dto::{StudentCreateDto, StudentResponseDto, StudentUpdateDto};
pub use error::{AppError, ConfigError, StoreError, StudentError};
pub use migration::apply_migrations;
pub use model::{NewStudent, PagedResult, Student};
pub use response::{CreatedBody, ErrorsBody, MessageBody};
pub use routes::{api_routes, common_routes, common_routes_with_ready, student_routes, with_layers};
pub use service::{StudentCreated, StudentService};
pub use state::AppState;
pub use store::{ensure_database_exists, ChangeSet, PgStudentRepository, StudentRepository};
#[cfg(any(test, feature = "test-support"))]
pub use store::InMemoryStudentRepository;
