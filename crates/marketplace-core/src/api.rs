//! Wire contract of the marketplace backend.
//!
//! The catalog and chat repositories decode their fixtures through these
//! types, so a live HTTP client can replace them without touching callers.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Endpoint returning all categories.
pub const CATEGORIES_PATH: &str = "categories";
/// Endpoint returning the featured listings.
pub const FEATURED_ITEMS_PATH: &str = "featured-items";
/// Endpoint returning a filtered, paginated listing search.
pub const ITEMS_PATH: &str = "items";
/// Endpoint returning the chat conversations of the current user.
pub const CONVERSATIONS_PATH: &str = "chat/conversations";

/// Path of the item details endpoint for one listing.
#[must_use]
pub fn item_details_path(item_id: i64) -> String {
    format!("{ITEMS_PATH}/{item_id}")
}

/// Response envelope used by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Payload, present on success.
    #[serde(default)]
    pub data: Option<T>,
    /// Human-readable reason on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Builds a failed response.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwraps the envelope into the payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::Network` when the response reports failure or carries no data.
    pub fn into_result(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(Error::Network(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            )),
        }
    }
}

/// Query parameters of the `items` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsQuery {
    /// Category name to filter by.
    pub category: Option<String>,
    /// Free-text search over title and category.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for ItemsQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            page: 1,
            limit: 20,
        }
    }
}

impl ItemsQuery {
    /// Creates a query for the first page with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to one category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a free-text search term.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Selects a page.
    #[must_use]
    pub const fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Renders the non-empty parameters as `(name, value)` pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_success() {
        let response = ApiResponse::ok(vec![1, 2, 3]);
        assert_eq!(response.into_result().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_into_result_failure_uses_message() {
        let response: ApiResponse<Vec<u8>> = ApiResponse::failure("Server is down");
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Network error: Server is down");
    }

    #[test]
    fn test_success_without_data_is_failure() {
        let response: ApiResponse<u8> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(response.into_result(), Err(Error::Network(_))));
    }

    #[test]
    fn test_query_pairs_skip_empty_filters() {
        let query = ItemsQuery::new().search("  ").category("Electronics").page(2, 5);
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("category", "Electronics".to_string()),
                ("page", "2".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_item_details_path() {
        assert_eq!(item_details_path(42), "items/42");
    }
}
