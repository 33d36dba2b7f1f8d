//! Seller chat.
//!
//! Conversations between the user and sellers. Mock only: messages stay
//! in memory.

mod model;
mod repository;

pub use model::{CURRENT_USER_ID, ChatConversation, ChatMessage, ConversationId};
pub use repository::ChatRepository;
