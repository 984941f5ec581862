//! Record service: validation, business rules, then persistence.

use super::validation::RequestValidator;
use crate::dto::{StudentCreateDto, StudentResponseDto, StudentUpdateDto};
use crate::error::{StoreError, StudentError};
use crate::model::{PagedResult, Student};
use crate::store::{ChangeSet, StudentRepository};
use std::sync::Arc;

pub const CREATED_MESSAGE: &str = "Aluno cadastrado com sucesso!";
pub const UPDATED_MESSAGE: &str = "Cadastro atualizado com sucesso!";
pub const DELETED_MESSAGE: &str = "Aluno excluído com sucesso!";

/// Result of a successful create: confirmation plus the stored fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentCreated {
    pub message: String,
    pub student: StudentResponseDto,
}

pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all(&self) -> Result<Vec<Student>, StudentError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get_paged(&self, page: u32, page_size: u32, search: &str) -> Result<PagedResult<Student>, StudentError> {
        RequestValidator::validate_page(page, page_size)?;
        Ok(self.repo.get_paged(page, page_size, search).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Student>, StudentError> {
        Ok(self.repo.get_by_id(id).await?)
    }

    /// Validate, reject a taken RA, then insert.
    ///
    /// The RA lookup and the insert are not atomic. The store's unique
    /// constraint catches the race and is reported as the same duplicate error.
    pub async fn create(&self, dto: StudentCreateDto) -> Result<StudentCreated, StudentError> {
        let new = RequestValidator::validate_create(&dto)?;
        if self.repo.get_by_ra(&new.ra).await?.is_some() {
            tracing::info!("create rejected: duplicate ra");
            return Err(StudentError::DuplicateRa);
        }

        let student = StudentResponseDto {
            name: new.name.clone(),
            email: new.email.clone(),
            ra: new.ra.clone(),
            cpf: new.cpf.clone(),
        };
        let mut changes = ChangeSet::new();
        changes.add(new);
        match self.repo.commit(changes).await {
            Ok(_) => {}
            Err(StoreError::DuplicateRa) => {
                tracing::info!("create rejected by unique constraint");
                return Err(StudentError::DuplicateRa);
            }
            Err(e) => return Err(e.into()),
        }
        tracing::info!("student created");
        Ok(StudentCreated {
            message: CREATED_MESSAGE.to_string(),
            student,
        })
    }

    /// Overwrite name and email. RA and CPF are left as stored.
    pub async fn update(&self, id: i64, dto: StudentUpdateDto) -> Result<String, StudentError> {
        let (name, email) = RequestValidator::validate_update(&dto)?;
        let mut student = self.repo.get_by_id(id).await?.ok_or(StudentError::NotFound)?;
        student.name = name;
        student.email = email;

        let mut changes = ChangeSet::new();
        changes.update(student);
        if !self.repo.commit(changes).await? {
            tracing::warn!(id, "update affected no rows");
            return Err(StudentError::UpdateFailed);
        }
        tracing::info!(id, "student updated");
        Ok(UPDATED_MESSAGE.to_string())
    }

    pub async fn delete(&self, id: i64) -> Result<String, StudentError> {
        let student = self.repo.get_by_id(id).await?.ok_or(StudentError::NotFound)?;

        let mut changes = ChangeSet::new();
        changes.delete(student);
        if !self.repo.commit(changes).await? {
            tracing::warn!(id, "delete affected no rows");
            return Err(StudentError::DeleteFailed);
        }
        tracing::info!(id, "student deleted");
        Ok(DELETED_MESSAGE.to_string())
    }
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
