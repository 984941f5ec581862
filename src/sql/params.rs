//! Convert query parameters into sqlx `PgArguments`.

use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A value that can be bound to a PostgreSQL query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    BigInt(i64),
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::BigInt(n)
    }
}

/// Bind params in order ($1, $2, ...).
pub fn to_arguments(params: &[SqlParam]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for p in params {
        match p {
            SqlParam::Text(s) => args.add(s.clone()),
            SqlParam::BigInt(n) => args.add(*n),
        }
        .map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}
