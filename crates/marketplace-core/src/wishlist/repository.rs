//! Wishlist storage repository.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::model::WishlistEntry;
use crate::Result;
use crate::catalog::ItemId;

/// Repository for saved listings.
///
/// Every successful mutation republishes the full, newest-first list to
/// subscribers.
pub struct WishlistRepository {
    pool: SqlitePool,
    entries: watch::Sender<Vec<WishlistEntry>>,
}

impl WishlistRepository {
    /// Create a new repository with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        Self::with_pool(pool).await
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        // The database lives and dies with its only connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let (entries, _) = watch::channel(Vec::new());
        let repo = Self { pool, entries };
        repo.initialize().await?;
        repo.entries.send_replace(repo.list().await?);
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS wishlist_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL UNIQUE,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                currency TEXT NOT NULL,
                image_url TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                condition TEXT NOT NULL DEFAULT '',
                added_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_wishlist_added_at ON wishlist_items(added_at)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Subscribe to the saved listings, newest first.
    ///
    /// The receiver holds the current list immediately and sees a new one
    /// after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<WishlistEntry>> {
        self.entries.subscribe()
    }

    /// Get all saved listings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<WishlistEntry>> {
        let rows = sqlx::query(
            r"
            SELECT item_id, title, price, currency, image_url, location, category, condition, added_at
            FROM wishlist_items
            ORDER BY added_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Check whether a listing is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn contains(&self, item_id: ItemId) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM wishlist_items WHERE item_id = ?")
            .bind(item_id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Number of saved listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM wishlist_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(row.get::<i64, _>("count")).unwrap_or_default())
    }

    /// Save a listing, replacing any earlier snapshot of it.
    ///
    /// The save time is set to now, so the entry moves to the front.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn add(&self, entry: &WishlistEntry) -> Result<()> {
        insert(&self.pool, entry, Utc::now()).await?;
        debug!("Saved item {} to wishlist", entry.item_id);
        self.publish().await;
        Ok(())
    }

    /// Remove a listing. Removing an unsaved listing does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn remove(&self, item_id: ItemId) -> Result<()> {
        let result = sqlx::query("DELETE FROM wishlist_items WHERE item_id = ?")
            .bind(item_id.0)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            debug!("Removed item {item_id} from wishlist");
            self.publish().await;
        }
        Ok(())
    }

    /// Flip whether a listing is saved.
    ///
    /// Returns `true` if the listing is saved afterwards. The membership
    /// check and the write run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn toggle(&self, entry: &WishlistEntry) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query("SELECT 1 FROM wishlist_items WHERE item_id = ?")
            .bind(entry.item_id.0)
            .fetch_optional(&mut *tx)
            .await?;

        let saved = if existing.is_some() {
            sqlx::query("DELETE FROM wishlist_items WHERE item_id = ?")
                .bind(entry.item_id.0)
                .execute(&mut *tx)
                .await?;
            false
        } else {
            insert(&mut *tx, entry, Utc::now()).await?;
            true
        };

        tx.commit().await?;
        debug!("Toggled item {} in wishlist: saved={saved}", entry.item_id);
        self.publish().await;
        Ok(saved)
    }

    /// Remove every saved listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn clear(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM wishlist_items")
            .execute(&self.pool)
            .await?;

        debug!("Cleared {} wishlist entries", result.rows_affected());
        self.publish().await;
        Ok(())
    }

    /// Re-read the table and push the result to subscribers.
    ///
    /// On failure subscribers keep the last good list.
    async fn publish(&self) {
        match self.list().await {
            Ok(entries) => {
                self.entries.send_replace(entries);
            }
            Err(e) => warn!("Failed to refresh wishlist: {e}"),
        }
    }
}

async fn insert<'e, E>(executor: E, entry: &WishlistEntry, added_at: DateTime<Utc>) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        r"
        INSERT OR REPLACE INTO wishlist_items
            (item_id, title, price, currency, image_url, location, category, condition, added_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(entry.item_id.0)
    .bind(&entry.title)
    .bind(entry.price)
    .bind(&entry.currency)
    .bind(&entry.image_url)
    .bind(&entry.location)
    .bind(&entry.category)
    .bind(&entry.condition)
    .bind(added_at.timestamp_millis())
    .execute(executor)
    .await?;

    Ok(())
}

fn entry_from_row(row: &SqliteRow) -> WishlistEntry {
    WishlistEntry {
        item_id: ItemId(row.get::<i64, _>("item_id")),
        title: row.get("title"),
        price: row.get("price"),
        currency: row.get("currency"),
        image_url: row.get("image_url"),
        location: row.get("location"),
        category: row.get("category"),
        condition: row.get("condition"),
        added_at: DateTime::from_timestamp_millis(row.get::<i64, _>("added_at"))
            .unwrap_or_default(),
    }
}
