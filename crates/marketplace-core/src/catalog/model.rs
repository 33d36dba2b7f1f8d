//! Catalog model types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a listing.
///
/// Shared by the summary and the detail projection of the same listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A listing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name, also the value stored on listings.
    pub name: String,
    /// Icon reference.
    pub icon: String,
    /// Accent color (`#RRGGBB`).
    pub color: String,
    /// Number of active ads in the category.
    pub ad_count: u32,
}

/// Summary projection of a listing, as shown in lists and cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    /// Listing identifier.
    pub id: ItemId,
    /// Title.
    pub title: String,
    /// Asking price.
    pub price: f64,
    /// Currency symbol.
    pub currency: String,
    /// Human-readable location.
    pub location: String,
    /// Relative posting time ("2h", "1d").
    pub time_posted: String,
    /// Cover image.
    pub image_url: String,
    /// Whether the listing is promoted.
    pub is_featured: bool,
    /// Whether the listing is trending.
    pub is_hot: bool,
    /// Category name.
    pub category: String,
    /// Item condition.
    pub condition: String,
    /// Description.
    pub description: String,
}

impl MarketplaceItem {
    /// Price without decimals, prefixed with the currency symbol.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn display_price(&self) -> String {
        format!("{}{}", self.currency, self.price.round() as i64)
    }

    /// Checks whether the title or category contains `query` (case-insensitive).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }
}

/// The person or shop selling a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Seller identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Avatar image.
    pub avatar: String,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub total_reviews: u32,
    /// Year the seller joined.
    pub member_since: String,
    /// Whether the seller's identity was verified.
    pub is_verified: bool,
    /// Typical response time.
    pub response_time: String,
}

/// One key/value row of a listing's specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

impl Specification {
    /// Creates a specification row.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Full projection of a listing, as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    /// Listing identifier.
    pub id: ItemId,
    /// Title.
    pub title: String,
    /// Asking price.
    pub price: f64,
    /// Currency symbol.
    pub currency: String,
    /// Human-readable location.
    pub location: String,
    /// Relative posting time.
    pub time_posted: String,
    /// Gallery, cover image first.
    pub images: Vec<String>,
    /// Whether the listing is promoted.
    pub is_featured: bool,
    /// Whether the listing is trending.
    pub is_hot: bool,
    /// Category name.
    pub category: String,
    /// Item condition.
    pub condition: String,
    /// Description.
    pub description: String,
    /// Seller.
    pub seller: Seller,
    /// Specification table.
    pub specifications: Vec<Specification>,
    /// View counter.
    pub views: u32,
    /// Number of users who saved the listing.
    pub favorites: u32,
    /// Whether the price is negotiable.
    pub is_negotiable: bool,
}

impl ItemDetails {
    /// Cover image, or an empty string for listings without photos.
    #[must_use]
    pub fn cover_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// Projects the listing down to its summary form.
    #[must_use]
    pub fn summary(&self) -> MarketplaceItem {
        MarketplaceItem {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            currency: self.currency.clone(),
            location: self.location.clone(),
            time_posted: self.time_posted.clone(),
            image_url: self.cover_image().to_string(),
            is_featured: self.is_featured,
            is_hot: self.is_hot,
            category: self.category.clone(),
            condition: self.condition.clone(),
            description: self.description.clone(),
        }
    }
}

/// One page of a paginated listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Number of matches across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Whether more matches exist after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = (self.page as usize).saturating_mul(self.limit as usize);
        seen < self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_details() -> ItemDetails {
        ItemDetails {
            id: ItemId(7),
            title: "Road bike".to_string(),
            price: 249.6,
            currency: "₹".to_string(),
            location: "Pune, India".to_string(),
            time_posted: "3h".to_string(),
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            is_featured: false,
            is_hot: true,
            category: "Vehicles".to_string(),
            condition: "Good".to_string(),
            description: "Light frame, new tyres".to_string(),
            seller: Seller {
                id: 1,
                name: "Asha".to_string(),
                avatar: String::new(),
                rating: 4.2,
                total_reviews: 3,
                member_since: "2023".to_string(),
                is_verified: false,
                response_time: "Within a day".to_string(),
            },
            specifications: vec![Specification::new("Frame", "Aluminium")],
            views: 10,
            favorites: 1,
            is_negotiable: true,
        }
    }

    #[test]
    fn test_summary_keeps_id_and_cover() {
        let details = sample_details();
        let summary = details.summary();
        assert_eq!(summary.id, details.id);
        assert_eq!(summary.image_url, "a.jpg");
        assert_eq!(summary.title, details.title);
    }

    #[test]
    fn test_summary_without_images() {
        let mut details = sample_details();
        details.images.clear();
        assert_eq!(details.summary().image_url, "");
    }

    #[test]
    fn test_matches_title_or_category() {
        let item = sample_details().summary();
        assert!(item.matches("ROAD"));
        assert!(item.matches("vehic"));
        assert!(!item.matches("sofa"));
    }

    #[test]
    fn test_display_price_rounds() {
        assert_eq!(sample_details().summary().display_price(), "₹250");
    }

    #[test]
    fn test_page_has_more() {
        let page = Page { items: vec![1, 2], page: 1, limit: 2, total: 3 };
        assert!(page.has_more());
        let last = Page { items: vec![3], page: 2, limit: 2, total: 3 };
        assert!(!last.has_more());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_details().summary()).unwrap();
        assert!(json.get("timePosted").is_some());
        assert!(json.get("imageUrl").is_some());
        assert_eq!(json["id"], 7);
    }
}
