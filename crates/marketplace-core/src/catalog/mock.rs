//! In-memory catalog backed by bundled fixtures.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::latency::{Latency, simulate};
use super::model::{Category, CategoryId, ItemDetails, ItemId, MarketplaceItem, Page};
use super::ListingCatalog;
use crate::api::{self, ApiResponse, ItemsQuery};
use crate::sell::{ListingDraft, build_listing, validate_draft};
use crate::{Error, Result};

const CATEGORIES_FIXTURE: &str = include_str!("../../fixtures/categories.json");
const LISTINGS_FIXTURE: &str = include_str!("../../fixtures/listings.json");

/// First id handed out to submitted listings.
const FIRST_SUBMITTED_ID: i64 = 10_000;

/// Catalog serving a fixed set of categories and listings.
///
/// The fixtures never change for the lifetime of the process. Submitted
/// listings get fresh ids but are not added to the fixture set.
#[derive(Debug)]
pub struct MockCatalog {
    categories: Vec<Category>,
    listings: Vec<ItemDetails>,
    latency: Latency,
    offline: AtomicBool,
    next_id: AtomicI64,
}

impl MockCatalog {
    /// Create a catalog from the bundled fixtures.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture fails to decode.
    pub fn new(latency: Latency) -> Result<Self> {
        let categories: ApiResponse<Vec<Category>> = serde_json::from_str(CATEGORIES_FIXTURE)?;
        let listings: ApiResponse<Vec<ItemDetails>> = serde_json::from_str(LISTINGS_FIXTURE)?;
        let catalog = Self::from_parts(
            categories.into_result()?,
            listings.into_result()?,
            latency,
        );
        info!(
            "Catalog loaded: {} categories, {} listings",
            catalog.categories.len(),
            catalog.listings.len()
        );
        Ok(catalog)
    }

    /// Create a catalog from explicit data.
    #[must_use]
    pub const fn from_parts(
        categories: Vec<Category>,
        listings: Vec<ItemDetails>,
        latency: Latency,
    ) -> Self {
        Self {
            categories,
            listings,
            latency,
            offline: AtomicBool::new(false),
            next_id: AtomicI64::new(FIRST_SUBMITTED_ID),
        }
    }

    /// Simulate losing (or regaining) connectivity.
    ///
    /// While offline every request fails with `Error::Network`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Whether the catalog currently fails every request.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Waits out the simulated round trip for `path`.
    async fn round_trip(&self, path: &str, delay: Duration) -> Result<()> {
        debug!("GET {path}");
        simulate(delay).await;
        if self.is_offline() {
            warn!("GET {path} failed: offline");
            return Err(Error::Network("Network unavailable".to_string()));
        }
        Ok(())
    }

    fn summaries<'a>(
        &'a self,
        filter: impl Fn(&MarketplaceItem) -> bool + 'a,
    ) -> impl Iterator<Item = MarketplaceItem> + 'a {
        self.listings
            .iter()
            .map(ItemDetails::summary)
            .filter(move |item| filter(item))
    }

    fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}

impl ListingCatalog for MockCatalog {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.round_trip(api::CATEGORIES_PATH, self.latency.categories)
            .await?;
        Ok(self.categories.clone())
    }

    async fn featured_items(&self) -> Result<Vec<MarketplaceItem>> {
        self.round_trip(api::FEATURED_ITEMS_PATH, self.latency.featured)
            .await?;
        Ok(self.summaries(|item| item.is_featured).collect())
    }

    async fn item_details(&self, id: ItemId) -> Result<ItemDetails> {
        self.round_trip(&api::item_details_path(id.0), self.latency.details)
            .await?;
        self.listings
            .iter()
            .find(|listing| listing.id == id)
            .cloned()
            .ok_or(Error::ItemNotFound(id))
    }

    async fn search_items(&self, query: &str) -> Result<Vec<MarketplaceItem>> {
        self.round_trip(api::ITEMS_PATH, self.latency.search).await?;
        let results: Vec<_> = self.summaries(|item| item.matches(query)).collect();
        debug!("Search {:?} matched {} listings", query, results.len());
        Ok(results)
    }

    async fn items_by_category(&self, category_id: CategoryId) -> Result<Vec<MarketplaceItem>> {
        self.round_trip(api::ITEMS_PATH, self.latency.by_category)
            .await?;
        let Some(name) = self.category_name(category_id) else {
            debug!("Unknown category {category_id}");
            return Ok(Vec::new());
        };
        Ok(self
            .summaries(|item| item.category.eq_ignore_ascii_case(name))
            .collect())
    }

    async fn items(&self, query: &ItemsQuery) -> Result<Page<MarketplaceItem>> {
        self.round_trip(api::ITEMS_PATH, self.latency.items).await?;

        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let matches: Vec<_> = self
            .summaries(|item| {
                category.is_none_or(|c| item.category.eq_ignore_ascii_case(c))
                    && search.is_none_or(|s| item.matches(s))
            })
            .collect();

        let page = query.page.max(1);
        let start = (page as usize - 1).saturating_mul(query.limit as usize);
        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect();

        Ok(Page {
            items,
            page,
            limit: query.limit,
            total,
        })
    }

    async fn submit_listing(&self, draft: &ListingDraft, currency: &str) -> Result<ItemDetails> {
        let validation = validate_draft(draft);
        if !validation.is_valid() {
            return Err(Error::InvalidListing(validation));
        }
        simulate(self.latency.details).await;
        if self.is_offline() {
            return Err(Error::Network("Network unavailable".to_string()));
        }

        let id = ItemId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let listing = build_listing(draft, id, currency)?;
        info!("Listing {} submitted: {}", listing.id, listing.title);
        Ok(listing)
    }
}
