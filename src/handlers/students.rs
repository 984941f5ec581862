//! Student CRUD handlers under `/api/students`.

use crate::dto::{StudentCreateDto, StudentUpdateDto};
use crate::error::AppError;
use crate::model::{PagedResult, Student};
use crate::response::{created_ok, message_ok, CreatedBody, ErrorsBody, MessageBody};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const INVALID_BODY: &str = "Corpo da requisição inválido.";
const INVALID_ID: &str = "Identificador inválido.";
const INVALID_QUERY: &str = "Parâmetros de consulta inválidos.";

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Substring matched against name, RA and CPF.
    #[serde(default)]
    pub search: String,
}

fn parse_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|e| {
        tracing::debug!(error = %e, "invalid id");
        AppError::BadRequest(INVALID_ID.into())
    })
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(v)| v).map_err(|e| {
        tracing::debug!(error = %e, "invalid body");
        AppError::BadRequest(INVALID_BODY.into())
    })
}

/// List every student.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, body = Vec<Student>))
)]
pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let students = state.service.get_all().await?;
    Ok(Json(students))
}

/// Page through students, optionally filtered by a search substring.
#[utoipa::path(
    get,
    path = "/api/students/paged",
    params(PageParams),
    responses(
        (status = 200, body = PagedResult<Student>),
        (status = 400, body = ErrorsBody)
    )
)]
pub async fn get_paged(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|e| {
        tracing::debug!(error = %e, "invalid query");
        AppError::BadRequest(INVALID_QUERY.into())
    })?;
    let page = state
        .service
        .get_paged(params.page, params.page_size, &params.search)
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path)),
    responses((status = 200, body = Student), (status = 404))
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(id)?;
    let student = state.service.get_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentCreateDto,
    responses((status = 200, body = CreatedBody), (status = 400, body = ErrorsBody))
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<StudentCreateDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let dto = parse_body(body)?;
    let created = state.service.create(dto).await?;
    Ok(created_ok(created.message, created.student))
}

/// Update name and email.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path)),
    request_body = StudentUpdateDto,
    responses(
        (status = 200, body = MessageBody),
        (status = 400, body = ErrorsBody),
        (status = 404, body = ErrorsBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<StudentUpdateDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(id)?;
    let dto = parse_body(body)?;
    let message = state.service.update(id, dto).await?;
    Ok(message_ok(message))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = MessageBody),
        (status = 400, body = ErrorsBody),
        (status = 404, body = ErrorsBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(id)?;
    let message = state.service.delete(id).await?;
    Ok(message_ok(message))
}
