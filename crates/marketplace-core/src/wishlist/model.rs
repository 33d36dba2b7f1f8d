//! Wishlist model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ItemDetails, ItemId, MarketplaceItem};

/// Snapshot of a listing taken when the user saved it.
///
/// Later changes to the listing do not update the snapshot; saving it
/// again does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Saved listing, unique within the wishlist.
    pub item_id: ItemId,
    /// Title at save time.
    pub title: String,
    /// Price at save time.
    pub price: f64,
    /// Currency symbol.
    pub currency: String,
    /// Cover image.
    pub image_url: String,
    /// Human-readable location.
    pub location: String,
    /// Category name.
    pub category: String,
    /// Item condition.
    pub condition: String,
    /// When the entry was (last) saved.
    pub added_at: DateTime<Utc>,
}

impl From<&MarketplaceItem> for WishlistEntry {
    fn from(item: &MarketplaceItem) -> Self {
        Self {
            item_id: item.id,
            title: item.title.clone(),
            price: item.price,
            currency: item.currency.clone(),
            image_url: item.image_url.clone(),
            location: item.location.clone(),
            category: item.category.clone(),
            condition: item.condition.clone(),
            added_at: Utc::now(),
        }
    }
}

impl From<&ItemDetails> for WishlistEntry {
    fn from(details: &ItemDetails) -> Self {
        Self::from(&details.summary())
    }
}

impl WishlistEntry {
    /// Rebuilds a listing card from the snapshot.
    ///
    /// Fields the snapshot does not carry are left empty.
    #[must_use]
    pub fn to_item(&self) -> MarketplaceItem {
        MarketplaceItem {
            id: self.item_id,
            title: self.title.clone(),
            price: self.price,
            currency: self.currency.clone(),
            location: self.location.clone(),
            time_posted: String::new(),
            image_url: self.image_url.clone(),
            is_featured: false,
            is_hot: false,
            category: self.category.clone(),
            condition: self.condition.clone(),
            description: String::new(),
        }
    }
}
