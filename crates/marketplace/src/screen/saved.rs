//! Saved listings.

use std::sync::Arc;

use marketplace_core::{ItemId, Result, WishlistEntry, WishlistRepository};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use super::forward_wishlist;
use crate::state::UiState;

/// State of the saved screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedState {
    /// Saved listings, newest first.
    pub entries: UiState<Vec<WishlistEntry>>,
}

/// State holder for the saved screen.
///
/// Follows the wishlist for as long as the screen lives.
pub struct SavedScreen {
    wishlist: Arc<WishlistRepository>,
    state: Arc<watch::Sender<SavedState>>,
    updates: JoinHandle<()>,
}

impl SavedScreen {
    /// Create the screen and start following the wishlist.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(wishlist: Arc<WishlistRepository>) -> Self {
        let state = Arc::new(watch::channel(SavedState::default()).0);
        let updates = forward_wishlist(wishlist.subscribe(), Arc::clone(&state), |s, entries| {
            s.entries = UiState::from_list(Ok::<_, String>(entries.to_vec()), "");
        });
        Self {
            wishlist,
            state,
            updates,
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SavedState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SavedState {
        self.state.borrow().clone()
    }

    /// Remove one listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be updated.
    pub async fn remove(&self, item_id: ItemId) -> Result<()> {
        self.wishlist.remove(item_id).await
    }

    /// Remove every saved listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be updated.
    pub async fn clear(&self) -> Result<()> {
        self.wishlist.clear().await?;
        info!("Wishlist cleared");
        Ok(())
    }
}

impl Drop for SavedScreen {
    fn drop(&mut self) {
        self.updates.abort();
    }
}
