//! Sell form model types.

use serde::{Deserialize, Serialize};

use crate::location::LocationData;

/// Conditions offered by the sell form, best first.
pub const LISTING_CONDITIONS: [&str; 5] = ["New", "Like New", "Good", "Fair", "Poor"];

/// Maximum number of photos on one listing.
pub const MAX_IMAGES: usize = 10;

/// How buyers can reach the seller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Seller's display name.
    pub name: String,
    /// Phone number, optionally with a leading `+`.
    pub phone: String,
    /// Email address. Optional, may be empty.
    pub email: String,
}

impl ContactInfo {
    /// Create contact information.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// An in-progress listing as typed into the sell form.
///
/// The price stays a string until validation so that partially typed
/// input round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    /// Listing title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price as typed.
    pub price: String,
    /// Category name.
    pub category: String,
    /// One of [`LISTING_CONDITIONS`].
    pub condition: String,
    /// Where the item can be picked up.
    pub location: Option<LocationData>,
    /// Photo URIs, cover first.
    pub images: Vec<String>,
    /// Whether the seller accepts offers.
    pub is_negotiable: bool,
    /// Seller contact details.
    pub contact: ContactInfo,
}

impl ListingDraft {
    /// Create an empty draft with the contact pre-filled.
    #[must_use]
    pub fn with_contact(contact: ContactInfo) -> Self {
        Self {
            contact,
            ..Self::default()
        }
    }

    /// Whether another photo may be attached.
    #[must_use]
    pub fn can_add_image(&self) -> bool {
        self.images.len() < MAX_IMAGES
    }
}

/// A field of the sell form that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Title input.
    Title,
    /// Description input.
    Description,
    /// Price input.
    Price,
    /// Category picker.
    Category,
    /// Condition picker.
    Condition,
    /// Location picker.
    Location,
    /// Photo strip.
    Images,
    /// Contact name, phone and email.
    Contact,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [Self; 8] = [
        Self::Title,
        Self::Description,
        Self::Price,
        Self::Category,
        Self::Condition,
        Self::Location,
        Self::Images,
        Self::Contact,
    ];

    /// Machine-readable field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::Condition => "condition",
            Self::Location => "location",
            Self::Images => "images",
            Self::Contact => "contact",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
