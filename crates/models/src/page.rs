use serde::{Deserialize, Serialize};

use crate::organization::Organization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Page parameters for the organization list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
    pub sort_field: String,
    pub sort_order: SortOrder,
}

impl PageRequest {
    /// First page, newest organizations first.
    pub fn newest_first(limit: i64) -> Self {
        Self {
            limit,
            offset: 0,
            sort_field: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// One page of the organization list plus the backend's total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPage {
    pub total_count: i64,

    #[serde(default)]
    pub items: Vec<Organization>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_sorts_by_creation_desc() {
        let page = PageRequest::newest_first(500);
        assert_eq!(page.limit, 500);
        assert_eq!(page.offset, 0);
        assert_eq!(page.sort_field, "createdAt");
        assert_eq!(page.sort_order, SortOrder::Desc);
    }

    #[test]
    fn empty_page_decodes_without_items() {
        let page: OrganizationPage =
            serde_json::from_value(serde_json::json!({ "totalCount": 0 })).unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }
}
