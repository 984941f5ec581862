//! Idempotent DDL for the students table.

use crate::error::StoreError;
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

pub const STUDENTS_TABLE: &str = "students";

/// CREATE SCHEMA / TABLE IF NOT EXISTS. `ra` carries a UNIQUE constraint so
/// concurrent creates with the same RA cannot both commit.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" BIGSERIAL PRIMARY KEY,
            "name" TEXT NOT NULL,
            "email" TEXT NOT NULL,
            "ra" TEXT NOT NULL,
            "cpf" CHAR(11) NOT NULL,
            CONSTRAINT "students_ra_key" UNIQUE ("ra")
        )
        "#,
        qualified_table(schema, STUDENTS_TABLE)
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(schema = %schema, table = STUDENTS_TABLE, "students table ready");
    Ok(())
}
