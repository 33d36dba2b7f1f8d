//! Application wiring.

use std::sync::Arc;

use anyhow::Context;
use marketplace_core::{ChatRepository, MockCatalog, WishlistRepository};
use tracing::info;

use crate::screen::{
    ChatScreen, HomeScreen, ItemDetailsScreen, ItemListScreen, LocationPickerScreen, SavedScreen,
    SearchScreen, SellScreen,
};
use crate::settings::AppSettings;

/// Repositories shared by every screen.
pub struct App {
    settings: AppSettings,
    catalog: Arc<MockCatalog>,
    wishlist: Arc<WishlistRepository>,
    chat: Arc<ChatRepository>,
}

impl App {
    /// Open local storage and build the repositories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the catalog
    /// fixtures fail to load.
    pub async fn bootstrap(settings: AppSettings) -> anyhow::Result<Self> {
        let db_path = settings.resolved_database_path();
        if let Some(dir) = db_path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let db_path_str = db_path
            .to_str()
            .context("database path is not valid UTF-8")?;

        let wishlist = WishlistRepository::new(db_path_str)
            .await
            .with_context(|| format!("failed to open wishlist at {}", db_path.display()))?;
        info!("Wishlist opened at {:?}", db_path);

        Self::assemble(settings, wishlist)
    }

    /// Build the repositories over an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or the catalog fixtures fail.
    pub async fn in_memory(settings: AppSettings) -> anyhow::Result<Self> {
        let wishlist = WishlistRepository::in_memory().await?;
        Self::assemble(settings, wishlist)
    }

    fn assemble(settings: AppSettings, wishlist: WishlistRepository) -> anyhow::Result<Self> {
        let latency = settings.latency();
        let catalog = MockCatalog::new(latency).context("failed to load catalog")?;
        Ok(Self {
            settings,
            catalog: Arc::new(catalog),
            wishlist: Arc::new(wishlist),
            chat: Arc::new(ChatRepository::new(latency)),
        })
    }

    /// Settings the app was started with.
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Listing catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Arc<MockCatalog> {
        &self.catalog
    }

    /// Saved listings.
    #[must_use]
    pub const fn wishlist(&self) -> &Arc<WishlistRepository> {
        &self.wishlist
    }

    /// Seller conversations.
    #[must_use]
    pub const fn chat(&self) -> &Arc<ChatRepository> {
        &self.chat
    }

    /// Home screen.
    #[must_use]
    pub fn home(&self) -> HomeScreen<MockCatalog> {
        HomeScreen::new(Arc::clone(&self.catalog))
    }

    /// Listing grid. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn item_list(&self) -> ItemListScreen<MockCatalog> {
        ItemListScreen::new(Arc::clone(&self.catalog), Arc::clone(&self.wishlist))
    }

    /// Listing detail page.
    #[must_use]
    pub fn details(&self) -> ItemDetailsScreen<MockCatalog> {
        ItemDetailsScreen::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.wishlist),
            Arc::clone(&self.chat),
        )
    }

    /// Saved listings. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn saved(&self) -> SavedScreen {
        SavedScreen::new(Arc::clone(&self.wishlist))
    }

    /// Sell form, pre-filled with the default contact.
    #[must_use]
    pub fn sell(&self) -> SellScreen<MockCatalog> {
        SellScreen::new(
            Arc::clone(&self.catalog),
            self.settings.currency.clone(),
            self.settings.default_contact.clone(),
        )
    }

    /// Search screen.
    #[must_use]
    pub fn search(&self) -> SearchScreen<MockCatalog> {
        SearchScreen::new(Arc::clone(&self.catalog))
    }

    /// Location picker.
    #[must_use]
    pub fn location_picker(&self) -> LocationPickerScreen {
        LocationPickerScreen::new()
    }

    /// Seller chat.
    #[must_use]
    pub fn chat_screen(&self) -> ChatScreen {
        ChatScreen::new(Arc::clone(&self.chat))
    }
}
