//! Sell form.

use std::sync::Arc;

use marketplace_core::{
    Category, ContactInfo, FormValidation, ItemId, ListingCatalog, ListingDraft, LocationData,
    MAX_IMAGES, validate_draft,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::state::UiState;

/// A change made in the sell form.
#[derive(Debug, Clone, PartialEq)]
pub enum SellFormEvent {
    /// Title edited.
    TitleChanged(String),
    /// Description edited.
    DescriptionChanged(String),
    /// Price edited.
    PriceChanged(String),
    /// Category picked.
    CategoryChanged(String),
    /// Condition picked.
    ConditionChanged(String),
    /// Location picked.
    LocationChanged(LocationData),
    /// Photo attached.
    ImageAdded(String),
    /// Photo at this index removed.
    ImageRemoved(usize),
    /// Negotiable switch flipped.
    NegotiableChanged(bool),
    /// Contact details edited.
    ContactChanged(ContactInfo),
    /// Ask for errors to be shown without submitting.
    ValidateForm,
}

/// One-off outcome the rendering layer should act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellEvent {
    /// The listing was posted; open its detail page.
    NavigateToDetails(ItemId),
    /// Show a transient error message.
    ShowError(String),
}

/// State of the sell form.
#[derive(Debug, Clone, PartialEq)]
pub struct SellFormState {
    /// What the user has typed so far.
    pub draft: ListingDraft,
    validation: FormValidation,
    /// Whether field errors are displayed.
    pub show_errors: bool,
    /// Whether a submission is in flight.
    pub is_submitting: bool,
    /// Outcome waiting to be handled.
    pub event: Option<SellEvent>,
    /// Category picker options.
    pub categories: UiState<Vec<Category>>,
}

impl SellFormState {
    fn new(draft: ListingDraft) -> Self {
        Self {
            validation: validate_draft(&draft),
            draft,
            show_errors: false,
            is_submitting: false,
            event: None,
            categories: UiState::Loading,
        }
    }

    /// Validation of the current draft.
    #[must_use]
    pub const fn validation(&self) -> &FormValidation {
        &self.validation
    }

    /// Whether the current draft can be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    fn revalidate(&mut self) {
        self.validation = validate_draft(&self.draft);
    }
}

/// State holder for the sell screen.
pub struct SellScreen<C> {
    catalog: Arc<C>,
    currency: String,
    state: watch::Sender<SellFormState>,
}

impl<C: ListingCatalog> SellScreen<C> {
    /// Create an empty form, pre-filling the contact when one is known.
    pub fn new(catalog: Arc<C>, currency: impl Into<String>, contact: Option<ContactInfo>) -> Self {
        let draft = contact.map(ListingDraft::with_contact).unwrap_or_default();
        let (state, _) = watch::channel(SellFormState::new(draft));
        Self {
            catalog,
            currency: currency.into(),
            state,
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SellFormState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SellFormState {
        self.state.borrow().clone()
    }

    /// Load the category picker options.
    pub async fn load_categories(&self) {
        self.state.send_modify(|s| s.categories = UiState::Loading);
        let result = self.catalog.categories().await;
        if let Err(e) = &result {
            warn!("Failed to load categories: {e}");
        }
        let categories = UiState::from_list(result, "Failed to load categories");
        self.state.send_modify(|s| s.categories = categories);
    }

    /// Apply a form change.
    pub fn apply(&self, event: SellFormEvent) {
        self.state.send_modify(|s| {
            let draft = &mut s.draft;
            match event {
                SellFormEvent::TitleChanged(title) => draft.title = title,
                SellFormEvent::DescriptionChanged(description) => draft.description = description,
                SellFormEvent::PriceChanged(price) => draft.price = price,
                SellFormEvent::CategoryChanged(category) => draft.category = category,
                SellFormEvent::ConditionChanged(condition) => draft.condition = condition,
                SellFormEvent::LocationChanged(location) => draft.location = Some(location),
                SellFormEvent::ImageAdded(uri) => {
                    if !draft.can_add_image() {
                        s.event = Some(SellEvent::ShowError(format!(
                            "Maximum {MAX_IMAGES} images allowed"
                        )));
                        return;
                    }
                    draft.images.push(uri);
                }
                SellFormEvent::ImageRemoved(index) => {
                    if index < draft.images.len() {
                        draft.images.remove(index);
                    }
                }
                SellFormEvent::NegotiableChanged(negotiable) => {
                    draft.is_negotiable = negotiable;
                    return;
                }
                SellFormEvent::ContactChanged(contact) => draft.contact = contact,
                SellFormEvent::ValidateForm => s.show_errors = true,
            }
            s.revalidate();
        });
    }

    /// Hide field errors again.
    pub fn reset_validation_errors(&self) {
        self.state.send_modify(|s| s.show_errors = false);
    }

    /// Take the pending outcome, if any.
    pub fn take_event(&self) -> Option<SellEvent> {
        let mut event = None;
        self.state.send_if_modified(|s| {
            event = s.event.take();
            event.is_some()
        });
        event
    }

    /// Post the listing.
    ///
    /// The outcome lands in [`SellFormState::event`].
    pub async fn submit(&self) {
        let mut draft = None;
        self.state.send_modify(|s| {
            s.show_errors = true;
            if s.is_submitting {
                return;
            }
            if s.is_valid() {
                s.is_submitting = true;
                draft = Some(s.draft.clone());
            } else {
                s.event = Some(SellEvent::ShowError(
                    "Please fix the errors before submitting".to_string(),
                ));
            }
        });
        let Some(draft) = draft else {
            return;
        };

        let event = match self.catalog.submit_listing(&draft, &self.currency).await {
            Ok(listing) => {
                info!("Posted listing {}", listing.id);
                SellEvent::NavigateToDetails(listing.id)
            }
            Err(e) => {
                warn!("Failed to post listing: {e}");
                SellEvent::ShowError(format!("Failed to post ad: {e}"))
            }
        };
        self.state.send_modify(|s| {
            s.is_submitting = false;
            s.event = Some(event);
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{FormField, Latency, MockCatalog, ValidationError};

    use super::*;

    fn screen() -> (Arc<MockCatalog>, SellScreen<MockCatalog>) {
        let catalog = Arc::new(MockCatalog::new(Latency::none()).unwrap());
        let screen = SellScreen::new(
            Arc::clone(&catalog),
            "₹",
            Some(ContactInfo::new("Asha", "+911234567890", "")),
        );
        (catalog, screen)
    }

    fn fill(screen: &SellScreen<MockCatalog>) {
        screen.apply(SellFormEvent::TitleChanged("Study table".to_string()));
        screen.apply(SellFormEvent::DescriptionChanged("Solid wood, two drawers".to_string()));
        screen.apply(SellFormEvent::PriceChanged("2500".to_string()));
        screen.apply(SellFormEvent::CategoryChanged("Furniture".to_string()));
        screen.apply(SellFormEvent::ConditionChanged("Good".to_string()));
        screen.apply(SellFormEvent::LocationChanged(LocationData::new(
            "Sector 18",
            28.57,
            77.32,
            "Noida, Uttar Pradesh, India",
        )));
        screen.apply(SellFormEvent::ImageAdded("content://table.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_new_form_is_invalid_but_quiet() {
        let (_, screen) = screen();
        let state = screen.state();
        assert!(!state.is_valid());
        assert!(!state.show_errors);
        assert_eq!(state.draft.contact.name, "Asha");
        assert_eq!(state.validation().contact, None);
    }

    #[tokio::test]
    async fn test_edits_revalidate() {
        let (_, screen) = screen();
        screen.apply(SellFormEvent::TitleChanged("Lamp".to_string()));
        assert_eq!(
            screen.state().validation().error(FormField::Title),
            Some(ValidationError::TitleTooShort)
        );
        fill(&screen);
        assert!(screen.state().is_valid());
    }

    #[tokio::test]
    async fn test_image_limit() {
        let (_, screen) = screen();
        for i in 0..MAX_IMAGES {
            screen.apply(SellFormEvent::ImageAdded(format!("img{i}")));
        }
        assert!(screen.take_event().is_none());

        screen.apply(SellFormEvent::ImageAdded("one too many".to_string()));
        assert_eq!(screen.state().draft.images.len(), MAX_IMAGES);
        assert_eq!(
            screen.take_event(),
            Some(SellEvent::ShowError("Maximum 10 images allowed".to_string()))
        );
        assert!(screen.take_event().is_none());

        screen.apply(SellFormEvent::ImageRemoved(0));
        screen.apply(SellFormEvent::ImageRemoved(99));
        let state = screen.state();
        assert_eq!(state.draft.images.len(), MAX_IMAGES - 1);
        assert_eq!(state.draft.images[0], "img1");
    }

    #[tokio::test]
    async fn test_submit_invalid_shows_errors() {
        let (_, screen) = screen();
        screen.submit().await;
        let state = screen.state();
        assert!(state.show_errors);
        assert!(!state.is_submitting);
        assert_eq!(
            state.event,
            Some(SellEvent::ShowError(
                "Please fix the errors before submitting".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_submit_valid() {
        let (_, screen) = screen();
        fill(&screen);
        screen.submit().await;
        let state = screen.state();
        assert!(!state.is_submitting);
        assert!(matches!(
            state.event,
            Some(SellEvent::NavigateToDetails(ItemId(id))) if id >= 10_000
        ));
    }

    #[tokio::test]
    async fn test_submit_offline() {
        let (catalog, screen) = screen();
        fill(&screen);
        catalog.set_offline(true);
        screen.submit().await;
        assert_eq!(
            screen.take_event(),
            Some(SellEvent::ShowError(
                "Failed to post ad: Network error: Network unavailable".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_load_categories() {
        let (_, screen) = screen();
        screen.load_categories().await;
        assert_eq!(screen.state().categories.data().unwrap().len(), 8);
    }
}
