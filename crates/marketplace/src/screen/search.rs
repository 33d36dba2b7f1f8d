//! Search screen.

use std::sync::Arc;

use marketplace_core::{Category, ItemsQuery, ListingCatalog, MarketplaceItem};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::UiState;

/// How many recent searches are remembered.
pub const MAX_RECENT_SEARCHES: usize = 10;

/// State of the search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Text in the search field.
    pub query: String,
    /// Category filter, by name.
    pub selected_category: Option<String>,
    /// Category chips.
    pub categories: UiState<Vec<Category>>,
    /// Results of the last search.
    pub results: UiState<Vec<MarketplaceItem>>,
    /// Previous queries, most recent first.
    pub recent_searches: Vec<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            selected_category: None,
            categories: UiState::Loading,
            results: UiState::Empty,
            recent_searches: Vec::new(),
        }
    }
}

impl SearchState {
    fn remember(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        self.recent_searches.retain(|q| q != query);
        self.recent_searches.insert(0, query.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }
}

/// State holder for the search screen.
pub struct SearchScreen<C> {
    catalog: Arc<C>,
    state: watch::Sender<SearchState>,
}

impl<C: ListingCatalog> SearchScreen<C> {
    /// Create the screen.
    pub fn new(catalog: Arc<C>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self { catalog, state }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Load the category chips.
    pub async fn load_categories(&self) {
        self.state.send_modify(|s| s.categories = UiState::Loading);
        let result = self.catalog.categories().await;
        if let Err(e) = &result {
            warn!("Failed to load categories: {e}");
        }
        let categories = UiState::from_list(result, "Failed to load categories");
        self.state.send_modify(|s| s.categories = categories);
    }

    /// Update the search field without searching.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.query = query);
    }

    /// Filter by a category (or none) and search again.
    pub async fn select_category(&self, category: Option<String>) {
        self.state.send_modify(|s| s.selected_category = category);
        self.perform_search().await;
    }

    /// Search with the current query and category.
    ///
    /// With neither set the results are `Empty` and nothing is fetched.
    pub async fn perform_search(&self) {
        let mut query = None;
        self.state.send_modify(|s| {
            let text = s.query.trim().to_string();
            if text.is_empty() && s.selected_category.is_none() {
                s.results = UiState::Empty;
                return;
            }
            s.remember(&text);
            s.results = UiState::Loading;
            let mut q = ItemsQuery::new().search(text);
            if let Some(category) = &s.selected_category {
                q = q.category(category.clone());
            }
            query = Some(q);
        });
        let Some(query) = query else {
            return;
        };

        let result = self.catalog.items(&query).await.map(|page| page.items);
        match &result {
            Ok(items) => debug!("Search {:?} returned {} items", query.search, items.len()),
            Err(e) => warn!("Search failed: {e}"),
        }
        let results = UiState::from_list(result, "Search failed");
        self.state.send_modify(|s| s.results = results);
    }

    /// Reset query, filter and results. Recent searches are kept.
    pub fn clear(&self) {
        self.state.send_modify(|s| {
            s.query.clear();
            s.selected_category = None;
            s.results = UiState::Empty;
        });
    }
}
