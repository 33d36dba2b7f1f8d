//! Home screen: categories and featured listings.

use std::sync::Arc;

use marketplace_core::{Category, ListingCatalog, MarketplaceItem};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::UiState;

/// State of the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    /// Category grid.
    pub categories: UiState<Vec<Category>>,
    /// Featured listings.
    pub featured: UiState<Vec<MarketplaceItem>>,
    /// Text in the search bar.
    pub search_query: String,
}

/// State holder for the home screen.
pub struct HomeScreen<C> {
    catalog: Arc<C>,
    state: watch::Sender<HomeState>,
}

impl<C: ListingCatalog> HomeScreen<C> {
    /// Create the screen. Nothing is loaded until [`Self::load`].
    pub fn new(catalog: Arc<C>) -> Self {
        let (state, _) = watch::channel(HomeState::default());
        Self { catalog, state }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    /// Load categories and featured listings concurrently.
    pub async fn load(&self) {
        tokio::join!(self.retry_categories(), self.retry_featured());
    }

    /// Reload the category grid.
    pub async fn retry_categories(&self) {
        self.state
            .send_modify(|s| s.categories = UiState::Loading);
        let result = self.catalog.categories().await;
        if let Err(e) = &result {
            warn!("Failed to load categories: {e}");
        }
        let categories = UiState::from_list(result, "Failed to load categories");
        debug!("Home categories loaded: success={}", categories.is_success());
        self.state.send_modify(|s| s.categories = categories);
    }

    /// Reload the featured listings.
    pub async fn retry_featured(&self) {
        self.state.send_modify(|s| s.featured = UiState::Loading);
        let result = self.catalog.featured_items().await;
        if let Err(e) = &result {
            warn!("Failed to load featured items: {e}");
        }
        let featured = UiState::from_list(result, "Failed to load featured items");
        self.state.send_modify(|s| s.featured = featured);
    }

    /// Update the search bar text.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.search_query = query);
    }
}
