//! In-memory repository with the same contract as the PostgreSQL one,
//! including the unique constraint on `ra`.

use super::{Change, ChangeSet, StudentRepository};
use crate::error::StoreError;
use crate::model::{PagedResult, Student};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Student>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    table: RwLock<Table>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn matches_search(s: &Student, search: &str) -> bool {
    search.trim().is_empty() || s.name.contains(search) || s.ra.contains(search) || s.cpf.contains(search)
}

fn ra_taken(rows: &BTreeMap<i64, Student>, ra: &str, except: Option<i64>) -> bool {
    rows.values().any(|s| s.ra == ra && Some(s.id) != except)
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn get_all(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_paged(&self, page: u32, page_size: u32, search: &str) -> Result<PagedResult<Student>, StoreError> {
        let table = self.table.read().await;
        let matching: Vec<&Student> = table.rows.values().filter(|s| matches_search(s, search)).collect();
        let offset = usize::try_from(PagedResult::<Student>::offset(page, page_size)).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|s| (*s).clone())
            .collect();
        Ok(PagedResult {
            items,
            total_items: matching.len() as i64,
            page,
            page_size,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_by_ra(&self, ra: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.table.read().await.rows.values().find(|s| s.ra == ra).cloned())
    }

    async fn commit(&self, changes: ChangeSet) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        // Work on a copy so a failed change leaves the table untouched.
        let mut rows = table.rows.clone();
        let mut next_id = table.next_id;
        let mut affected = 0u64;
        for change in changes.into_changes() {
            match change {
                Change::Add(new) => {
                    if ra_taken(&rows, &new.ra, None) {
                        return Err(StoreError::DuplicateRa);
                    }
                    next_id += 1;
                    rows.insert(next_id, new.with_id(next_id));
                    affected += 1;
                }
                Change::Update(student) => {
                    if !rows.contains_key(&student.id) {
                        continue;
                    }
                    if ra_taken(&rows, &student.ra, Some(student.id)) {
                        return Err(StoreError::DuplicateRa);
                    }
                    rows.insert(student.id, student);
                    affected += 1;
                }
                Change::Delete(student) => {
                    if rows.remove(&student.id).is_some() {
                        affected += 1;
                    }
                }
            }
        }
        table.rows = rows;
        table.next_id = next_id;
        Ok(affected > 0)
    }
}
