//! Standard response envelope helpers.

use crate::dto::StudentResponseDto;
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope: one key holding every message, in order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorsBody {
    pub erros: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MessageBody {
    pub mensagem: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreatedBody {
    pub mensagem: String,
    pub aluno: StudentResponseDto,
}

pub fn message_ok(mensagem: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            mensagem: mensagem.into(),
        }),
    )
}

pub fn created_ok(mensagem: impl Into<String>, aluno: StudentResponseDto) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::OK,
        Json(CreatedBody {
            mensagem: mensagem.into(),
            aluno,
        }),
    )
}
