//! Seller chat.

use std::sync::Arc;

use marketplace_core::{ChatConversation, ChatMessage, ChatRepository, ConversationId, Result};
use tokio::sync::watch;
use tracing::warn;

use crate::state::UiState;

/// State of the chat screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    /// Conversation list.
    pub conversations: UiState<Vec<ChatConversation>>,
    /// Conversation being read.
    pub open: Option<ChatConversation>,
}

/// State holder for the chat screen.
pub struct ChatScreen {
    chat: Arc<ChatRepository>,
    state: watch::Sender<ChatState>,
}

impl ChatScreen {
    /// Create the screen.
    #[must_use]
    pub fn new(chat: Arc<ChatRepository>) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self { chat, state }
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ChatState {
        self.state.borrow().clone()
    }

    /// Load the conversation list.
    pub async fn load(&self) {
        self.state
            .send_modify(|s| s.conversations = UiState::Loading);
        let result = self.chat.conversations().await;
        if let Err(e) = &result {
            warn!("Failed to load conversations: {e}");
        }
        let conversations = UiState::from_list(result, "Failed to load conversations");
        self.state.send_modify(|s| s.conversations = conversations);
    }

    /// Open a conversation and mark it read.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConversationNotFound` for unknown ids.
    pub async fn open(&self, id: ConversationId) -> Result<()> {
        self.chat.mark_read(id).await?;
        let conversation = self.chat.conversation(id).await?;
        self.state.send_modify(|s| s.open = conversation);
        self.refresh_list().await;
        Ok(())
    }

    /// Close the open conversation.
    pub fn close(&self) {
        self.state.send_modify(|s| s.open = None);
    }

    /// Send a message in the open conversation.
    ///
    /// Returns `None` when no conversation is open.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidMessage` for blank text.
    pub async fn send(&self, text: &str) -> Result<Option<ChatMessage>> {
        let Some(id) = self.state.borrow().open.as_ref().map(|c| c.id) else {
            return Ok(None);
        };
        let message = self.chat.send_message(id, text).await?;
        let conversation = self.chat.conversation(id).await?;
        self.state.send_modify(|s| {
            if s.open.as_ref().is_some_and(|c| c.id == id) {
                s.open = conversation;
            }
        });
        self.refresh_list().await;
        Ok(Some(message))
    }

    async fn refresh_list(&self) {
        if let Ok(conversations) = self.chat.conversations().await {
            self.state.send_modify(|s| {
                s.conversations = UiState::from_list(Ok::<_, String>(conversations), "");
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{Error, Latency};

    use super::*;

    fn screen() -> ChatScreen {
        ChatScreen::new(Arc::new(ChatRepository::new(Latency::none())))
    }

    #[tokio::test]
    async fn test_load() {
        let screen = screen();
        screen.load().await;
        assert_eq!(screen.state().conversations.data().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_open_marks_read() {
        let screen = screen();
        screen.open(ConversationId(1)).await.unwrap();
        let state = screen.state();
        assert!(state.open.as_ref().unwrap().is_read);
        assert!(state.conversations.data().unwrap()[0].is_read);

        assert!(screen.open(ConversationId(42)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_send() {
        let screen = screen();
        assert!(screen.send("hello").await.unwrap().is_none());

        screen.open(ConversationId(2)).await.unwrap();
        let message = screen.send("Still for sale?").await.unwrap().unwrap();
        let open = screen.state().open.unwrap();
        assert_eq!(open.messages.last().unwrap(), &message);
        assert_eq!(open.last_message, "Still for sale?");

        assert!(matches!(screen.send(" ").await, Err(Error::InvalidMessage)));

        screen.close();
        assert!(screen.state().open.is_none());
    }
}
