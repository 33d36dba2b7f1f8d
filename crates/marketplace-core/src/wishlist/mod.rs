//! Wishlist.
//!
//! Listings the user saved, kept in local storage and observable for
//! live updates.

mod model;
mod repository;

pub use model::WishlistEntry;
pub use repository::WishlistRepository;
