//! OpenAPI document for the student API, served at `/api-docs/openapi.json`.

use crate::dto::{StudentCreateDto, StudentResponseDto, StudentUpdateDto};
use crate::model::Student;
use crate::response::{CreatedBody, ErrorsBody, MessageBody};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "Create, list, page, update and delete student records."
    ),
    paths(
        crate::handlers::students::get_all,
        crate::handlers::students::get_paged,
        crate::handlers::students::get_by_id,
        crate::handlers::students::create,
        crate::handlers::students::update,
        crate::handlers::students::delete,
    ),
    components(schemas(
        Student,
        StudentCreateDto,
        StudentUpdateDto,
        StudentResponseDto,
        CreatedBody,
        MessageBody,
        ErrorsBody
    ))
)]
pub struct ApiDoc;
