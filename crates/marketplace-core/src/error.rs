//! Error types for the core library.

use thiserror::Error;

use crate::catalog::ItemId;
use crate::chat::ConversationId;
use crate::sell::FormValidation;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No listing exists with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// No conversation exists with this id.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// A draft was submitted while some of its fields are invalid.
    #[error("Listing is invalid: {0}")]
    InvalidListing(FormValidation),

    /// A chat message was empty.
    #[error("Message must not be empty")]
    InvalidMessage,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The (mock) backend could not be reached or rejected the request.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_) | Self::ConversationNotFound(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
