//! Listing catalog.
//!
//! Categories, listing summaries and listing details served by a mock
//! backend that simulates network latency.

mod latency;
mod mock;
mod model;

pub use latency::Latency;
pub(crate) use latency::simulate;
pub use mock::MockCatalog;
pub use model::{
    Category, CategoryId, ItemDetails, ItemId, MarketplaceItem, Page, Seller, Specification,
};

use crate::Result;
use crate::api::ItemsQuery;
use crate::sell::ListingDraft;

/// Read access to the marketplace catalog plus listing submission.
///
/// Every operation can fail; callers turn failures into an error state
/// that the user can retry.
pub trait ListingCatalog: Send + Sync {
    /// All categories.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Promoted listings for the home screen.
    async fn featured_items(&self) -> Result<Vec<MarketplaceItem>>;

    /// Full details of one listing.
    ///
    /// Fails with `Error::ItemNotFound` for unknown ids.
    async fn item_details(&self, id: ItemId) -> Result<ItemDetails>;

    /// Listings whose title or category contains `query`, ignoring case.
    async fn search_items(&self, query: &str) -> Result<Vec<MarketplaceItem>>;

    /// Listings in the category with this id.
    ///
    /// An unknown category yields an empty list.
    async fn items_by_category(&self, category_id: CategoryId) -> Result<Vec<MarketplaceItem>>;

    /// Filtered, paginated listing query.
    async fn items(&self, query: &ItemsQuery) -> Result<Page<MarketplaceItem>>;

    /// Publishes a new listing built from a validated draft.
    ///
    /// Fails with `Error::InvalidListing` if the draft does not validate.
    async fn submit_listing(&self, draft: &ListingDraft, currency: &str) -> Result<ItemDetails>;
}
