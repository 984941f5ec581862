//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the students table.

use super::params::SqlParam;

const COLUMNS: &str = r#""id", "name", "email", "ra", "cpf""#;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

/// Escape LIKE metacharacters so `search` matches literally, then wrap in `%`.
pub fn like_pattern(search: &str) -> String {
    let mut out = String::with_capacity(search.len() + 2);
    out.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

/// Appends the substring filter on name, ra and cpf when `search` is non-blank.
fn push_search_filter(q: &mut QueryBuf, search: &str) {
    if search.trim().is_empty() {
        return;
    }
    let n = q.push_param(like_pattern(search));
    let parts: Vec<String> = ["name", "ra", "cpf"]
        .iter()
        .map(|c| format!("{} LIKE ${} ESCAPE '\\'", quoted(c), n))
        .collect();
    q.sql.push_str(&format!(" WHERE {}", parts.join(" OR ")));
}

pub fn select_all(table: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {} ORDER BY \"id\"", COLUMNS, table);
    q
}

pub fn select_by_id(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM {} WHERE \"id\" = ${}", COLUMNS, table, n);
    q
}

/// Exact match on the registration number.
pub fn select_by_ra(table: &str, ra: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(ra);
    q.sql = format!("SELECT {} FROM {} WHERE \"ra\" = ${} LIMIT 1", COLUMNS, table, n);
    q
}

/// COUNT of rows matching the search, ignoring pagination.
pub fn count_matching(table: &str, search: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", table);
    push_search_filter(&mut q, search);
    q
}

/// One page of matching rows ordered by id ascending.
pub fn select_page(table: &str, search: &str, limit: i64, offset: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", COLUMNS, table);
    push_search_filter(&mut q, search);
    let l = q.push_param(limit);
    let o = q.push_param(offset);
    q.sql.push_str(&format!(" ORDER BY \"id\" LIMIT ${} OFFSET ${}", l, o));
    q
}

pub fn insert(table: &str, name: &str, email: &str, ra: &str, cpf: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ns = [
        q.push_param(name),
        q.push_param(email),
        q.push_param(ra),
        q.push_param(cpf),
    ];
    q.sql = format!(
        "INSERT INTO {} (\"name\", \"email\", \"ra\", \"cpf\") VALUES (${}, ${}, ${}, ${})",
        table, ns[0], ns[1], ns[2], ns[3]
    );
    q
}

/// UPDATE every mutable column by id.
pub fn update(table: &str, id: i64, name: &str, email: &str, ra: &str, cpf: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ns = [
        q.push_param(name),
        q.push_param(email),
        q.push_param(ra),
        q.push_param(cpf),
    ];
    let pk = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET \"name\" = ${}, \"email\" = ${}, \"ra\" = ${}, \"cpf\" = ${} WHERE \"id\" = ${}",
        table, ns[0], ns[1], ns[2], ns[3], pk
    );
    q
}

pub fn delete(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE \"id\" = ${}", table, n);
    q
}
