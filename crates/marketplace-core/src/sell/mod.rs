//! Selling an item.
//!
//! Drafts typed into the sell form, their validation, and the listing
//! built from a valid draft.

mod model;
mod submit;
mod validation;

pub use model::{ContactInfo, FormField, LISTING_CONDITIONS, ListingDraft, MAX_IMAGES};
pub use submit::build_listing;
pub use validation::{FormValidation, ValidationError, parse_price, validate_draft};
