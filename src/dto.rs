//! API boundary shapes. Fields are optional on input so that validation, not
//! deserialization, reports missing values.

use crate::model::Student;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentCreateDto {
    #[serde(default, alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "RA", skip_serializing_if = "Option::is_none")]
    pub ra: Option<String>,
    #[serde(default, alias = "CPF", skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

impl StudentCreateDto {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        ra: impl Into<String>,
        cpf: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            ra: Some(ra.into()),
            cpf: Some(cpf.into()),
        }
    }
}

/// Update only touches name and email; RA and CPF are immutable here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentUpdateDto {
    #[serde(default, alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl StudentUpdateDto {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// Outbound view of a student, without the storage identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentResponseDto {
    pub name: String,
    pub email: String,
    pub ra: String,
    pub cpf: String,
}

impl From<&Student> for StudentResponseDto {
    fn from(s: &Student) -> Self {
        Self {
            name: s.name.clone(),
            email: s.email.clone(),
            ra: s.ra.clone(),
            cpf: s.cpf.clone(),
        }
    }
}
