//! Persistence gateway for student records.
//!
//! Reads go straight to storage. Writes are staged in a [`ChangeSet`] (plain
//! data, no storage access) and flushed by [`StudentRepository::commit`] in a
//! single transaction.

mod postgres;
#[cfg(any(test, feature = "test-support"))]
mod memory;

pub use postgres::{ensure_database_exists, PgStudentRepository};
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryStudentRepository;

use crate::error::StoreError;
use crate::model::{NewStudent, PagedResult, Student};
use async_trait::async_trait;

/// One staged mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Add(NewStudent),
    Update(Student),
    Delete(Student),
}

/// Ordered list of staged mutations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert. Persisted only on commit.
    pub fn add(&mut self, student: NewStudent) -> &mut Self {
        self.changes.push(Change::Add(student));
        self
    }

    /// Stage an update of an already-loaded student.
    pub fn update(&mut self, student: Student) -> &mut Self {
        self.changes.push(Change::Update(student));
        self
    }

    /// Stage removal of an already-loaded student.
    pub fn delete(&mut self, student: Student) -> &mut Self {
        self.changes.push(Change::Delete(student));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every row, ordered by id.
    async fn get_all(&self) -> Result<Vec<Student>, StoreError>;

    /// Rows whose name, ra or cpf contains `search` (ignored when blank),
    /// ordered by id, skipping `(page - 1) * page_size` and taking `page_size`.
    /// `total_items` counts all matching rows.
    async fn get_paged(&self, page: u32, page_size: u32, search: &str) -> Result<PagedResult<Student>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, StoreError>;

    /// Exact match on the registration number.
    async fn get_by_ra(&self, ra: &str) -> Result<Option<Student>, StoreError>;

    /// Flush staged changes atomically. Returns whether at least one row was affected.
    async fn commit(&self, changes: ChangeSet) -> Result<bool, StoreError>;
}
