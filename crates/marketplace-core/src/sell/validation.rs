//! Sell form validation.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{FormField, ListingDraft, MAX_IMAGES};

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid regex"));

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

const TITLE_LEN: (usize, usize) = (5, 100);
const DESCRIPTION_LEN: (usize, usize) = (10, 1000);
const MAX_PRICE: f64 = 10_000_000.0;

/// Validation error for a listing draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is blank.
    EmptyTitle,
    /// Title is shorter than 5 characters.
    TitleTooShort,
    /// Title is longer than 100 characters.
    TitleTooLong,
    /// Description is blank.
    EmptyDescription,
    /// Description is shorter than 10 characters.
    DescriptionTooShort,
    /// Description is longer than 1000 characters.
    DescriptionTooLong,
    /// Price is blank.
    EmptyPrice,
    /// Price is not a finite number.
    InvalidPrice,
    /// Price is zero or negative.
    NonPositivePrice,
    /// Price is above 10,000,000.
    PriceTooHigh,
    /// No category selected.
    MissingCategory,
    /// No condition selected.
    MissingCondition,
    /// No location selected.
    MissingLocation,
    /// No photos attached.
    MissingImages,
    /// More than 10 photos attached.
    TooManyImages,
    /// Contact name is blank.
    EmptyContactName,
    /// Phone number is blank.
    EmptyPhone,
    /// Phone number does not look like one.
    InvalidPhone,
    /// Email address is present but malformed.
    InvalidEmail,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "Title is required",
            Self::TitleTooShort => "Title must be at least 5 characters",
            Self::TitleTooLong => "Title must be at most 100 characters",
            Self::EmptyDescription => "Description is required",
            Self::DescriptionTooShort => "Description must be at least 10 characters",
            Self::DescriptionTooLong => "Description must be at most 1000 characters",
            Self::EmptyPrice => "Price is required",
            Self::InvalidPrice => "Please enter a valid price",
            Self::NonPositivePrice => "Price must be greater than 0",
            Self::PriceTooHigh => "Price seems too high",
            Self::MissingCategory => "Please select a category",
            Self::MissingCondition => "Please select item condition",
            Self::MissingLocation => "Please select a location",
            Self::MissingImages => "Please add at least one photo",
            Self::TooManyImages => "Maximum 10 photos allowed",
            Self::EmptyContactName => "Contact name is required",
            Self::EmptyPhone => "Phone number is required",
            Self::InvalidPhone => "Please enter a valid phone number",
            Self::InvalidEmail => "Please enter a valid email",
        }
    }

    /// Get the form field this error relates to.
    #[must_use]
    pub const fn field(&self) -> FormField {
        match self {
            Self::EmptyTitle | Self::TitleTooShort | Self::TitleTooLong => FormField::Title,
            Self::EmptyDescription | Self::DescriptionTooShort | Self::DescriptionTooLong => {
                FormField::Description
            }
            Self::EmptyPrice | Self::InvalidPrice | Self::NonPositivePrice | Self::PriceTooHigh => {
                FormField::Price
            }
            Self::MissingCategory => FormField::Category,
            Self::MissingCondition => FormField::Condition,
            Self::MissingLocation => FormField::Location,
            Self::MissingImages | Self::TooManyImages => FormField::Images,
            Self::EmptyContactName | Self::EmptyPhone | Self::InvalidPhone | Self::InvalidEmail => {
                FormField::Contact
            }
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Per-field outcome of validating a draft.
///
/// A field with no error is valid. Overall validity is derived from the
/// fields and cannot be set on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    /// Title error.
    pub title: Option<ValidationError>,
    /// Description error.
    pub description: Option<ValidationError>,
    /// Price error.
    pub price: Option<ValidationError>,
    /// Category error.
    pub category: Option<ValidationError>,
    /// Condition error.
    pub condition: Option<ValidationError>,
    /// Location error.
    pub location: Option<ValidationError>,
    /// Photo error.
    pub images: Option<ValidationError>,
    /// Contact error (name, phone or email).
    pub contact: Option<ValidationError>,
}

impl FormValidation {
    /// Whether every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Error for one field, if any.
    #[must_use]
    pub const fn error(&self, field: FormField) -> Option<ValidationError> {
        match field {
            FormField::Title => self.title,
            FormField::Description => self.description,
            FormField::Price => self.price,
            FormField::Category => self.category,
            FormField::Condition => self.condition,
            FormField::Location => self.location,
            FormField::Images => self.images,
            FormField::Contact => self.contact,
        }
    }

    /// All errors, in form order.
    pub fn errors(&self) -> impl Iterator<Item = ValidationError> + '_ {
        FormField::ALL.into_iter().filter_map(|field| self.error(field))
    }
}

impl std::fmt::Display for FormValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Validate a listing draft.
///
/// Never fails: every field is checked and the outcome returned as data.
#[must_use]
pub fn validate_draft(draft: &ListingDraft) -> FormValidation {
    FormValidation {
        title: check_length(
            &draft.title,
            TITLE_LEN,
            [
                ValidationError::EmptyTitle,
                ValidationError::TitleTooShort,
                ValidationError::TitleTooLong,
            ],
        ),
        description: check_length(
            &draft.description,
            DESCRIPTION_LEN,
            [
                ValidationError::EmptyDescription,
                ValidationError::DescriptionTooShort,
                ValidationError::DescriptionTooLong,
            ],
        ),
        price: check_price(&draft.price).err(),
        category: is_blank(&draft.category).then_some(ValidationError::MissingCategory),
        condition: is_blank(&draft.condition).then_some(ValidationError::MissingCondition),
        location: draft
            .location
            .is_none()
            .then_some(ValidationError::MissingLocation),
        images: check_images(draft.images.len()),
        contact: check_contact(&draft.contact.name, &draft.contact.phone, &draft.contact.email),
    }
}

/// Parse a typed price, applying the same rules as the form.
///
/// # Errors
///
/// Returns the price `ValidationError` when the input is rejected.
pub fn parse_price(input: &str) -> Result<f64, ValidationError> {
    check_price(input)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `errors` is `[blank, too short, too long]`.
fn check_length(
    value: &str,
    (min, max): (usize, usize),
    errors: [ValidationError; 3],
) -> Option<ValidationError> {
    if is_blank(value) {
        return Some(errors[0]);
    }
    let len = value.chars().count();
    if len < min {
        Some(errors[1])
    } else if len > max {
        Some(errors[2])
    } else {
        None
    }
}

fn check_price(input: &str) -> Result<f64, ValidationError> {
    if is_blank(input) {
        return Err(ValidationError::EmptyPrice);
    }
    let value = input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidPrice)?;
    if value <= 0.0 {
        Err(ValidationError::NonPositivePrice)
    } else if value > MAX_PRICE {
        Err(ValidationError::PriceTooHigh)
    } else {
        Ok(value)
    }
}

const fn check_images(count: usize) -> Option<ValidationError> {
    if count == 0 {
        Some(ValidationError::MissingImages)
    } else if count > MAX_IMAGES {
        Some(ValidationError::TooManyImages)
    } else {
        None
    }
}

fn check_contact(name: &str, phone: &str, email: &str) -> Option<ValidationError> {
    if is_blank(name) {
        Some(ValidationError::EmptyContactName)
    } else if is_blank(phone) {
        Some(ValidationError::EmptyPhone)
    } else if !PHONE_RE.is_match(phone) {
        Some(ValidationError::InvalidPhone)
    } else if !is_blank(email) && !EMAIL_RE.is_match(email) {
        Some(ValidationError::InvalidEmail)
    } else {
        None
    }
}
