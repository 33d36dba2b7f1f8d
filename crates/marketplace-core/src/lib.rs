//! # marketplace-core
//!
//! Core business logic for the `Marketplace` classifieds client.
//!
//! This crate provides:
//! - Domain models for categories, listings and sellers
//! - **Listing Catalog** - Mock backend with simulated latency
//! - **Wishlist** - Saved listings in local storage (`SQLite`), observable
//! - **Sell Form Validation** - Field-level checks for a listing draft
//! - **Seller Chat** - Mock conversations with a one-shot cache
//! - Location data for the sell form

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod catalog;
pub mod chat;
mod error;
pub mod location;
pub mod sell;
pub mod wishlist;

pub use api::{ApiResponse, ItemsQuery};
pub use catalog::{
    Category, CategoryId, ItemDetails, ItemId, Latency, ListingCatalog, MarketplaceItem,
    MockCatalog, Page, Seller, Specification,
};
pub use chat::{ChatConversation, ChatMessage, ChatRepository, ConversationId};
pub use error::{Error, Result};
pub use location::{Coordinates, DEFAULT_COORDINATES, LocationData, Placemark};
pub use sell::{
    ContactInfo, FormField, FormValidation, LISTING_CONDITIONS, ListingDraft, MAX_IMAGES,
    ValidationError, build_listing, validate_draft,
};
pub use wishlist::{WishlistEntry, WishlistRepository};
