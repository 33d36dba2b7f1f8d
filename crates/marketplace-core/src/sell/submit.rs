//! Turning a validated draft into a published listing.

use crate::catalog::{ItemDetails, ItemId, Seller, Specification};
use crate::{Error, Result};

use super::model::ListingDraft;
use super::validation::{parse_price, validate_draft};

/// Build the listing published for `draft` under `id`.
///
/// The seller is derived from the draft's contact details and starts out
/// unrated and unverified.
///
/// # Errors
///
/// Returns `Error::InvalidListing` if the draft does not validate.
pub fn build_listing(draft: &ListingDraft, id: ItemId, currency: &str) -> Result<ItemDetails> {
    let validation = validate_draft(draft);
    if !validation.is_valid() {
        return Err(Error::InvalidListing(validation));
    }
    let price = parse_price(&draft.price).map_err(|_| Error::InvalidListing(validate_draft(draft)))?;

    let location = draft
        .location
        .as_ref()
        .map(|l| l.place_name.clone())
        .unwrap_or_default();

    let mut specifications = vec![
        Specification::new("Category", draft.category.trim()),
        Specification::new("Condition", draft.condition.trim()),
        Specification::new("Negotiable", if draft.is_negotiable { "Yes" } else { "No" }),
    ];
    if !location.is_empty() {
        specifications.push(Specification::new("Location", location.clone()));
    }

    Ok(ItemDetails {
        id,
        title: draft.title.trim().to_string(),
        price,
        currency: currency.to_string(),
        location,
        time_posted: "Just now".to_string(),
        images: draft.images.clone(),
        is_featured: false,
        is_hot: false,
        category: draft.category.trim().to_string(),
        condition: draft.condition.trim().to_string(),
        description: draft.description.trim().to_string(),
        seller: Seller {
            id: 0,
            name: draft.contact.name.trim().to_string(),
            avatar: String::new(),
            rating: 0.0,
            total_reviews: 0,
            member_since: "2024".to_string(),
            is_verified: false,
            response_time: "New seller".to_string(),
        },
        specifications,
        views: 0,
        favorites: 0,
        is_negotiable: draft.is_negotiable,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::location::LocationData;
    use crate::sell::ContactInfo;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "  Mountain bike  ".to_string(),
            description: "Barely used, 21 gears".to_string(),
            price: "4500".to_string(),
            category: "Vehicles".to_string(),
            condition: "Like New".to_string(),
            location: Some(LocationData::new("Baner Rd", 18.56, 73.78, "Pune, Maharashtra, India")),
            images: vec!["bike.jpg".to_string(), "side.jpg".to_string()],
            is_negotiable: true,
            contact: ContactInfo::new("Ravi", "9876543210", "ravi@example.com"),
        }
    }

    #[test]
    fn test_build_listing() {
        let listing = build_listing(&draft(), ItemId(10_000), "₹").unwrap();
        assert_eq!(listing.id, ItemId(10_000));
        assert_eq!(listing.title, "Mountain bike");
        assert!((listing.price - 4500.0).abs() < f64::EPSILON);
        assert_eq!(listing.location, "Pune, Maharashtra, India");
        assert_eq!(listing.time_posted, "Just now");
        assert_eq!(listing.seller.name, "Ravi");
        assert_eq!(listing.seller.response_time, "New seller");
        assert!(!listing.seller.is_verified);
        assert_eq!(listing.cover_image(), "bike.jpg");
        assert_eq!(
            listing.specifications,
            vec![
                Specification::new("Category", "Vehicles"),
                Specification::new("Condition", "Like New"),
                Specification::new("Negotiable", "Yes"),
                Specification::new("Location", "Pune, Maharashtra, India"),
            ]
        );
    }

    #[test]
    fn test_build_listing_rejects_invalid_draft() {
        let mut draft = draft();
        draft.title = "Bike".to_string();
        let err = build_listing(&draft, ItemId(1), "₹").unwrap_err();
        assert!(matches!(err, Error::InvalidListing(ref v) if v.title.is_some()));
        assert_eq!(
            err.to_string(),
            "Listing is invalid: Title must be at least 5 characters"
        );
    }
}
