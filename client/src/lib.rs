//! Typed client for the student records API.
//!
//! Wraps the `/api/students` endpoints so a presentation layer can list, page,
//! create, update and delete students without building requests by hand.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use student_records::{ErrorsBody, MessageBody};
use thiserror::Error;

pub use student_records::{CreatedBody, PagedResult, Student, StudentCreateDto, StudentUpdateDto};

const STUDENTS_PATH: &str = "/api/students";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status. `errors` holds the `erros`
    /// envelope when one was returned.
    #[error("api returned {status}: {}", .errors.join("; "))]
    Api { status: StatusCode, errors: Vec<String> },
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

/// Form state as edited in the UI: an id means the student already exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub ra: String,
    pub cpf: String,
}

#[derive(Clone, Debug)]
pub struct StudentClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudentClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, STUDENTS_PATH, suffix)
    }

    pub async fn get_all(&self) -> Result<Vec<Student>, ClientError> {
        let res = self.http.get(self.url("")).send().await?;
        decode(res).await
    }

    pub async fn get_paged(&self, page: u32, page_size: u32, search: &str) -> Result<PagedResult<Student>, ClientError> {
        let res = self
            .http
            .get(self.url("/paged"))
            .query(&[
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
                ("search", search.to_string()),
            ])
            .send()
            .await?;
        decode(res).await
    }

    /// `None` when the server answers 404.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Student>, ClientError> {
        let res = self.http.get(self.url(&format!("/{id}"))).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    pub async fn create(&self, dto: &StudentCreateDto) -> Result<CreatedBody, ClientError> {
        let res = self.http.post(self.url("")).json(dto).send().await?;
        decode(res).await
    }

    /// Returns the server's confirmation message.
    pub async fn update(&self, id: i64, dto: &StudentUpdateDto) -> Result<String, ClientError> {
        let res = self.http.put(self.url(&format!("/{id}"))).json(dto).send().await?;
        decode::<MessageBody>(res).await.map(|m| m.mensagem)
    }

    /// PUT when the form carries an id, POST otherwise.
    pub async fn save(&self, form: &StudentForm) -> Result<String, ClientError> {
        match form.id {
            Some(id) => {
                self.update(id, &StudentUpdateDto::new(form.name.clone(), form.email.clone()))
                    .await
            }
            None => {
                let dto = StudentCreateDto::new(
                    form.name.clone(),
                    form.email.clone(),
                    form.ra.clone(),
                    form.cpf.clone(),
                );
                self.create(&dto).await.map(|c| c.mensagem)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<String, ClientError> {
        let res = self.http.delete(self.url(&format!("/{id}"))).send().await?;
        decode::<MessageBody>(res).await.map(|m| m.mensagem)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    let bytes = res.bytes().await?;
    let errors = serde_json::from_slice::<ErrorsBody>(&bytes)
        .map(|b| b.erros)
        .unwrap_or_default();
    tracing::debug!(%status, ?errors, "student api error");
    Err(ClientError::Api { status, errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_without_double_slash() {
        let c = StudentClient::new("http://localhost:5000/");
        assert_eq!(c.url("/paged"), "http://localhost:5000/api/students/paged");
        assert_eq!(c.url(""), "http://localhost:5000/api/students");
    }

    #[test]
    fn api_error_display_joins_messages() {
        let e = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            errors: vec!["a".into(), "b".into()],
        };
        assert_eq!(e.to_string(), "api returned 400 Bad Request: a; b");
    }
}
