use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::serde::deserialize_optional_i64;

/// Pagination metadata returned alongside list data.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

/// Query-string pagination parameters.
///
/// Values arrive as strings from the query layer; empty strings are treated
/// as absent. `page` takes precedence over `offset` when both are given.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(20),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }

    /// Build the response metadata for a page of `returned` rows out of `total`.
    pub fn meta(&self, total: i64, returned: usize) -> PaginationMeta {
        let offset = self.offset();
        PaginationMeta {
            total,
            limit: self.limit(),
            offset: Some(offset),
            page: self.page(),
            has_more: offset + (returned as i64) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(500),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            limit: Some(-3),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn page_wins_over_offset() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(99),
            page: Some(3),
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn negative_offset_clamped_to_zero() {
        let params = PaginationParams {
            limit: None,
            offset: Some(-10),
            page: None,
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn empty_strings_deserialize_as_absent() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn string_values_parse() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"25","offset":"50"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(0),
            page: None,
        };
        let meta = params.meta(25, 10);
        assert!(meta.has_more);
        let last = PaginationParams {
            limit: Some(10),
            offset: Some(20),
            page: None,
        };
        assert!(!last.meta(25, 5).has_more);
    }
}
