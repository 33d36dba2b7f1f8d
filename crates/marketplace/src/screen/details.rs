//! Listing detail page.

use std::sync::Arc;

use marketplace_core::{
    ChatRepository, ConversationId, ItemDetails, ItemId, ListingCatalog, Result, WishlistEntry,
    WishlistRepository,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::state::UiState;

const SHARE_FOOTER: &str = "Download MarketPlace app: https://play.google.com/store/apps/details?id=com.androstark.marketplace";

/// State of the details screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsState {
    /// Listing being shown.
    pub item_id: Option<ItemId>,
    /// Listing details.
    pub details: UiState<ItemDetails>,
    /// Whether the listing is in the wishlist.
    pub is_saved: bool,
    /// Gallery position.
    pub selected_image: usize,
}

/// What the share sheet receives for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContent {
    /// Share sheet title.
    pub title: String,
    /// Message body.
    pub text: String,
    /// Cover image, empty when the listing has none.
    pub image_url: String,
}

/// State holder for the details screen.
pub struct ItemDetailsScreen<C> {
    catalog: Arc<C>,
    wishlist: Arc<WishlistRepository>,
    chat: Arc<ChatRepository>,
    state: watch::Sender<DetailsState>,
}

impl<C: ListingCatalog> ItemDetailsScreen<C> {
    /// Create the screen.
    pub fn new(
        catalog: Arc<C>,
        wishlist: Arc<WishlistRepository>,
        chat: Arc<ChatRepository>,
    ) -> Self {
        let (state, _) = watch::channel(DetailsState::default());
        Self {
            catalog,
            wishlist,
            chat,
            state,
        }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailsState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DetailsState {
        self.state.borrow().clone()
    }

    fn loaded(&self) -> Option<ItemDetails> {
        self.state.borrow().details.data().cloned()
    }

    /// Load a listing and whether it is saved.
    pub async fn load(&self, id: ItemId) {
        self.state.send_modify(|s| {
            s.item_id = Some(id);
            s.details = UiState::Loading;
            s.selected_image = 0;
        });

        let result = self.catalog.item_details(id).await;
        if let Err(e) = &result {
            warn!("Failed to load item {id}: {e}");
        }
        let is_saved = self.wishlist.contains(id).await.unwrap_or_else(|e| {
            warn!("Failed to check wishlist for item {id}: {e}");
            false
        });

        let details = UiState::from_result(result, "Failed to load item details");
        self.state.send_modify(|s| {
            if s.item_id == Some(id) {
                s.details = details;
                s.is_saved = is_saved;
            }
        });
    }

    /// Reload the current listing.
    pub async fn retry(&self) {
        let id = self.state.borrow().item_id;
        if let Some(id) = id {
            self.load(id).await;
        }
    }

    /// Save or unsave the listing. Returns whether it is saved afterwards.
    ///
    /// Does nothing until the listing has loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the wishlist cannot be updated; the saved flag
    /// keeps its previous value.
    pub async fn toggle_saved(&self) -> Result<bool> {
        let Some(details) = self.loaded() else {
            return Ok(self.state.borrow().is_saved);
        };
        let saved = self.wishlist.toggle(&WishlistEntry::from(&details)).await?;
        self.state.send_modify(|s| s.is_saved = saved);
        Ok(saved)
    }

    /// Show another gallery image. Out-of-range indexes are ignored.
    pub fn select_image(&self, index: usize) {
        self.state.send_if_modified(|s| {
            let count = s.details.data().map_or(0, |d| d.images.len());
            if index < count && index != s.selected_image {
                s.selected_image = index;
                true
            } else {
                false
            }
        });
    }

    /// Open (or reuse) the conversation with the seller.
    ///
    /// Returns `None` until the listing has loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation cannot be created.
    pub async fn contact_seller(&self) -> Result<Option<ConversationId>> {
        let Some(details) = self.loaded() else {
            return Ok(None);
        };
        let conversation = self
            .chat
            .create_conversation(
                details.id,
                details.seller.id,
                &details.seller.name,
                &details.title,
                &format!(
                    "Hi! I'm interested in your {}. Is it still available?",
                    details.title
                ),
            )
            .await?;
        debug!("Contacting seller of item {} in conversation {}", details.id, conversation.id);
        Ok(Some(conversation.id))
    }

    /// Share sheet content for the loaded listing.
    #[must_use]
    pub fn share_content(&self) -> Option<ShareContent> {
        let details = self.loaded()?;
        let price = details.summary().display_price();
        Some(ShareContent {
            title: format!("Check out this {}", details.title),
            text: format!(
                "{}\n\n{}\n{}\n\n{SHARE_FOOTER}",
                details.title, price, details.location
            ),
            image_url: details.cover_image().to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{Latency, MockCatalog};

    use super::*;

    struct Fixture {
        catalog: Arc<MockCatalog>,
        wishlist: Arc<WishlistRepository>,
        chat: Arc<ChatRepository>,
        screen: ItemDetailsScreen<MockCatalog>,
    }

    async fn fixture() -> Fixture {
        let catalog = Arc::new(MockCatalog::new(Latency::none()).unwrap());
        let wishlist = Arc::new(WishlistRepository::in_memory().await.unwrap());
        let chat = Arc::new(ChatRepository::new(Latency::none()));
        let screen = ItemDetailsScreen::new(
            Arc::clone(&catalog),
            Arc::clone(&wishlist),
            Arc::clone(&chat),
        );
        Fixture {
            catalog,
            wishlist,
            chat,
            screen,
        }
    }

    #[tokio::test]
    async fn test_load() {
        let f = fixture().await;
        f.screen.load(ItemId(2)).await;
        let state = f.screen.state();
        assert_eq!(state.details.data().unwrap().id, ItemId(2));
        assert!(!state.is_saved);
    }

    #[tokio::test]
    async fn test_unknown_item_then_retry() {
        let f = fixture().await;
        f.screen.load(ItemId(404)).await;
        assert_eq!(
            f.screen.state().details.error_message(),
            Some("Item not found: 404")
        );

        f.catalog.set_offline(true);
        f.screen.load(ItemId(1)).await;
        assert!(f.screen.state().details.is_error());
        f.catalog.set_offline(false);
        f.screen.retry().await;
        assert!(f.screen.state().details.is_success());
    }

    #[tokio::test]
    async fn test_toggle_saved() {
        let f = fixture().await;
        assert!(!f.screen.toggle_saved().await.unwrap());

        f.screen.load(ItemId(3)).await;
        assert!(f.screen.toggle_saved().await.unwrap());
        assert!(f.wishlist.contains(ItemId(3)).await.unwrap());

        f.screen.load(ItemId(3)).await;
        assert!(f.screen.state().is_saved);
        assert!(!f.screen.toggle_saved().await.unwrap());
    }

    #[tokio::test]
    async fn test_select_image() {
        let f = fixture().await;
        f.screen.load(ItemId(1)).await;
        let count = f.screen.state().details.data().unwrap().images.len();
        assert!(count > 1);

        f.screen.select_image(1);
        assert_eq!(f.screen.state().selected_image, 1);
        f.screen.select_image(count);
        assert_eq!(f.screen.state().selected_image, 1);
    }

    #[tokio::test]
    async fn test_contact_seller() {
        let f = fixture().await;
        assert_eq!(f.screen.contact_seller().await.unwrap(), None);

        f.screen.load(ItemId(1)).await;
        assert_eq!(
            f.screen.contact_seller().await.unwrap(),
            Some(ConversationId(1))
        );

        f.screen.load(ItemId(5)).await;
        let id = f.screen.contact_seller().await.unwrap().unwrap();
        let conversation = f.chat.conversation(id).await.unwrap().unwrap();
        assert_eq!(conversation.item_id, ItemId(5));
        assert!(conversation.last_message.starts_with("Hi! I'm interested"));
    }

    #[tokio::test]
    async fn test_share_content() {
        let f = fixture().await;
        assert!(f.screen.share_content().is_none());

        f.screen.load(ItemId(1)).await;
        let details = f.screen.state().details.data().cloned().unwrap();
        let share = f.screen.share_content().unwrap();
        assert_eq!(share.title, format!("Check out this {}", details.title));
        assert!(share.text.contains(&details.location));
        assert_eq!(share.image_url, details.images[0]);
    }
}
