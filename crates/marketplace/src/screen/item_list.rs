//! Listing grid for one category, or the featured listings.

use std::collections::HashSet;
use std::sync::Arc;

use marketplace_core::{
    CategoryId, ItemId, ListingCatalog, MarketplaceItem, Result, WishlistEntry, WishlistRepository,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use super::forward_wishlist;
use crate::state::UiState;

/// State of the item list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemListState {
    /// Category shown, `None` for featured listings.
    pub category: Option<CategoryId>,
    /// Listings.
    pub items: UiState<Vec<MarketplaceItem>>,
    /// Listings currently in the wishlist.
    pub saved_ids: HashSet<ItemId>,
}

impl ItemListState {
    /// Whether a listing is in the wishlist.
    #[must_use]
    pub fn is_saved(&self, id: ItemId) -> bool {
        self.saved_ids.contains(&id)
    }
}

/// State holder for the item list screen.
pub struct ItemListScreen<C> {
    catalog: Arc<C>,
    wishlist: Arc<WishlistRepository>,
    state: Arc<watch::Sender<ItemListState>>,
    updates: JoinHandle<()>,
}

impl<C: ListingCatalog> ItemListScreen<C> {
    /// Create the screen and start following the wishlist.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(catalog: Arc<C>, wishlist: Arc<WishlistRepository>) -> Self {
        let state = Arc::new(watch::channel(ItemListState::default()).0);
        let updates = forward_wishlist(wishlist.subscribe(), Arc::clone(&state), |s, entries| {
            s.saved_ids = entries.iter().map(|e| e.item_id).collect();
        });
        Self {
            catalog,
            wishlist,
            state,
            updates,
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ItemListState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ItemListState {
        self.state.borrow().clone()
    }

    /// Load a category's listings, or the featured listings for `None`.
    pub async fn load(&self, category: Option<CategoryId>) {
        self.state.send_modify(|s| {
            s.category = category;
            s.items = UiState::Loading;
        });

        let result = match category {
            Some(id) => self.catalog.items_by_category(id).await,
            None => self.catalog.featured_items().await,
        };
        if let Err(e) = &result {
            warn!("Failed to load items: {e}");
        }
        let items = UiState::from_list(result, "Failed to load items");
        self.state.send_modify(|s| {
            // A newer load for another category wins.
            if s.category == category {
                s.items = items;
            }
        });
    }

    /// Reload the current category.
    pub async fn retry(&self) {
        let category = self.state.borrow().category;
        self.load(category).await;
    }

    /// Save or unsave a listing. Returns whether it is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be updated.
    pub async fn toggle_saved(&self, item: &MarketplaceItem) -> Result<bool> {
        let saved = self.wishlist.toggle(&WishlistEntry::from(item)).await?;
        self.state.send_modify(|s| {
            if saved {
                s.saved_ids.insert(item.id);
            } else {
                s.saved_ids.remove(&item.id);
            }
        });
        Ok(saved)
    }
}

impl<C> Drop for ItemListScreen<C> {
    fn drop(&mut self) {
        self.updates.abort();
    }
}
