//! Persisted student record and the derived paged view.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `students` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Registration number, unique across students.
    pub ra: String,
    /// Eleven numeric digits.
    pub cpf: String,
}

/// A student that storage has not assigned an id to yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub ra: String,
    pub cpf: String,
}

impl NewStudent {
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            ra: self.ra,
            cpf: self.cpf,
        }
    }
}

/// One page of rows plus the total count of matching rows.
/// `page` and `page_size` echo the request; they are never clamped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PagedResult<T> {
    /// Number of rows to skip for the requested page.
    pub fn offset(page: u32, page_size: u32) -> i64 {
        (i64::from(page) - 1).max(0).saturating_mul(i64::from(page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PagedResult::<Student>::offset(1, 10), 0);
        assert_eq!(PagedResult::<Student>::offset(3, 10), 20);
        assert_eq!(PagedResult::<Student>::offset(u32::MAX, u32::MAX), i64::MAX);
    }

    #[test]
    fn paged_result_uses_camel_case_keys() {
        let page = PagedResult::<Student> {
            items: vec![],
            total_items: 4,
            page: 2,
            page_size: 3,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({"items": [], "totalItems": 4, "page": 2, "pageSize": 3}));
    }
}
