//! PostgreSQL repository over a sqlx pool.

use super::{Change, ChangeSet, StudentRepository};
use crate::error::{ConfigError, StoreError};
use crate::model::{PagedResult, Student};
use crate::sql::{self, to_arguments, QueryBuf};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
    /// Schema-qualified, quoted table name.
    table: String,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            table: sql::qualified_table(schema, crate::migration::STUDENTS_TABLE),
        }
    }

    async fn fetch_many(&self, q: &QueryBuf) -> Result<Vec<Student>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = sqlx::query_as_with::<Postgres, Student, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Student>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = sqlx::query_as_with::<Postgres, Student, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn execute_tx(tx: &mut sqlx::PgConnection, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let result = sqlx::query_with::<Postgres, _>(&q.sql, to_arguments(&q.params)?)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?;
        Ok(result.rows_affected())
    }

    fn change_query(&self, change: &Change) -> QueryBuf {
        match change {
            Change::Add(s) => sql::insert(&self.table, &s.name, &s.email, &s.ra, &s.cpf),
            Change::Update(s) => sql::update(&self.table, s.id, &s.name, &s.email, &s.ra, &s.cpf),
            Change::Delete(s) => sql::delete(&self.table, s.id),
        }
    }
}

/// Unique violation on `ra` is the authoritative duplicate signal.
fn map_write_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::DuplicateRa;
        }
    }
    StoreError::Unavailable(e)
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn get_all(&self) -> Result<Vec<Student>, StoreError> {
        self.fetch_many(&sql::select_all(&self.table)).await
    }

    async fn get_paged(&self, page: u32, page_size: u32, search: &str) -> Result<PagedResult<Student>, StoreError> {
        let count = sql::count_matching(&self.table, search);
        tracing::debug!(sql = %count.sql, params = ?count.params, "query");
        let total_items: i64 = sqlx::query_scalar_with::<Postgres, i64, _>(&count.sql, to_arguments(&count.params)?)
            .fetch_one(&self.pool)
            .await?;

        let offset = PagedResult::<Student>::offset(page, page_size);
        let items = self
            .fetch_many(&sql::select_page(&self.table, search, i64::from(page_size), offset))
            .await?;

        Ok(PagedResult {
            items,
            total_items,
            page,
            page_size,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        self.fetch_optional(&sql::select_by_id(&self.table, id)).await
    }

    async fn get_by_ra(&self, ra: &str) -> Result<Option<Student>, StoreError> {
        self.fetch_optional(&sql::select_by_ra(&self.table, ra)).await
    }

    async fn commit(&self, changes: ChangeSet) -> Result<bool, StoreError> {
        if changes.is_empty() {
            return Ok(false);
        }
        let mut affected = 0u64;
        let mut tx = self.pool.begin().await?;
        for change in changes.changes() {
            let q = self.change_query(change);
            affected += Self::execute_tx(&mut tx, &q).await?;
        }
        tx.commit().await?;
        tracing::debug!(affected, "commit");
        Ok(affected > 0)
    }
}

/// Create the target database when it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)
        .map_err(|e| StoreError::Unavailable(sqlx::Error::Configuration(Box::new(e))))?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ConfigError::DatabaseUrl("no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
