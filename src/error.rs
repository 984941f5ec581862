//! Typed errors and HTTP mapping.

use crate::response::ErrorsBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Aluno não encontrado.";
pub const DUPLICATE_RA_MESSAGE: &str = "RA já cadastrado. Use outro número.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

/// Failures raised by a [`StudentRepository`](crate::store::StudentRepository).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Unavailable(#[from] sqlx::Error),
    /// Unique constraint on `ra` rejected a staged insert or update.
    #[error("duplicate registration number")]
    DuplicateRa,
}

/// Outcomes of the record service that are not a success.
#[derive(Error, Debug)]
pub enum StudentError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{}", DUPLICATE_RA_MESSAGE)]
    DuplicateRa,
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("Erro ao atualizar o cadastro.")]
    UpdateFailed,
    #[error("Erro ao excluir o cadastro do aluno.")]
    DeleteFailed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StudentError {
    /// Human-readable messages for the `erros` envelope. Store details stay internal.
    pub fn messages(&self) -> Vec<String> {
        match self {
            StudentError::Validation(errors) => errors.clone(),
            StudentError::Store(_) => vec![INTERNAL_ERROR_MESSAGE.to_string()],
            other => vec![other.to_string()],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            StudentError::NotFound => StatusCode::NOT_FOUND,
            StudentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Student(#[from] StudentError),
    /// 404 with an empty body, used by plain reads.
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Student(e) => {
                let status = e.status();
                if let StudentError::Store(inner) = &e {
                    tracing::error!(error = %inner, "storage failure");
                }
                (status, Json(ErrorsBody { erros: e.messages() })).into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorsBody { erros: vec![message] }),
            )
                .into_response(),
        }
    }
}
