//! Simulated backend latency.

use std::time::Duration;

/// Artificial delay applied to each catalog and chat operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Loading categories.
    pub categories: Duration,
    /// Loading featured listings.
    pub featured: Duration,
    /// Loading one listing's details.
    pub details: Duration,
    /// Text search.
    pub search: Duration,
    /// Listing a category.
    pub by_category: Duration,
    /// Paginated items query.
    pub items: Duration,
    /// Sending a chat message.
    pub chat_send: Duration,
    /// Opening a new conversation.
    pub chat_create: Duration,
}

impl Latency {
    /// Delays resembling a mobile network round trip.
    #[must_use]
    pub const fn realistic() -> Self {
        Self {
            categories: Duration::from_millis(500),
            featured: Duration::from_millis(800),
            details: Duration::from_millis(1000),
            search: Duration::from_millis(600),
            by_category: Duration::from_millis(600),
            items: Duration::from_millis(600),
            chat_send: Duration::from_millis(200),
            chat_create: Duration::from_millis(400),
        }
    }

    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            categories: Duration::ZERO,
            featured: Duration::ZERO,
            details: Duration::ZERO,
            search: Duration::ZERO,
            by_category: Duration::ZERO,
            items: Duration::ZERO,
            chat_send: Duration::ZERO,
            chat_create: Duration::ZERO,
        }
    }

    /// Picks realistic delays or none.
    #[must_use]
    pub const fn simulated(enabled: bool) -> Self {
        if enabled { Self::realistic() } else { Self::none() }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::realistic()
    }
}

/// Sleeps for `delay`, skipping the timer entirely for a zero delay.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
