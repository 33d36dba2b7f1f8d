//! Mock chat repository.

use chrono::Local;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::model::{
    CURRENT_USER_ID, ChatConversation, ChatMessage, ConversationId, ConversationsPayload,
};
use crate::api::{self, ApiResponse};
use crate::catalog::{ItemId, Latency, simulate};
use crate::{Error, Result};

const CONVERSATIONS_FIXTURE: &str = include_str!("../../fixtures/conversations.json");

/// Conversations loaded so far.
#[derive(Debug)]
enum ConversationCache {
    /// Nothing fetched yet.
    Unpopulated,
    /// Fetched once, then kept up to date locally.
    Populated(Vec<ChatConversation>),
}

/// Repository for seller conversations.
///
/// Conversations are fetched once and then served and updated from
/// memory. Nothing is sent anywhere.
#[derive(Debug)]
pub struct ChatRepository {
    cache: Mutex<ConversationCache>,
    latency: Latency,
}

impl ChatRepository {
    /// Create a repository that has not fetched anything yet.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            cache: Mutex::new(ConversationCache::Unpopulated),
            latency,
        }
    }

    /// Run `f` over the cached conversations, fetching them first if needed.
    async fn with_conversations<R>(
        &self,
        f: impl FnOnce(&mut Vec<ChatConversation>) -> R,
    ) -> Result<R> {
        let mut cache = self.cache.lock().await;
        if matches!(*cache, ConversationCache::Unpopulated) {
            debug!("GET {}", api::CONVERSATIONS_PATH);
            let response: ApiResponse<ConversationsPayload> =
                serde_json::from_str(CONVERSATIONS_FIXTURE)?;
            let conversations = response.into_result()?.conversations;
            info!("Loaded {} conversations", conversations.len());
            *cache = ConversationCache::Populated(conversations);
        }
        match &mut *cache {
            ConversationCache::Populated(conversations) => Ok(f(conversations)),
            ConversationCache::Unpopulated => Ok(f(&mut Vec::new())),
        }
    }

    /// All conversations.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversations cannot be fetched.
    pub async fn conversations(&self) -> Result<Vec<ChatConversation>> {
        self.with_conversations(|conversations| conversations.clone())
            .await
    }

    /// One conversation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversations cannot be fetched.
    pub async fn conversation(&self, id: ConversationId) -> Result<Option<ChatConversation>> {
        self.with_conversations(|conversations| {
            conversations.iter().find(|c| c.id == id).cloned()
        })
        .await
    }

    /// The conversation about a listing, if one was started.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversations cannot be fetched.
    pub async fn conversation_for_item(&self, item_id: ItemId) -> Result<Option<ChatConversation>> {
        self.with_conversations(|conversations| {
            conversations.iter().find(|c| c.item_id == item_id).cloned()
        })
        .await
    }

    /// Mark a conversation as read.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConversationNotFound` for unknown ids.
    pub async fn mark_read(&self, id: ConversationId) -> Result<()> {
        self.with_conversations(|conversations| {
            conversations
                .iter_mut()
                .find(|c| c.id == id)
                .map(|c| c.is_read = true)
                .ok_or(Error::ConversationNotFound(id))
        })
        .await?
    }

    /// Send a message from the current user.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidMessage` for blank text and
    /// `Error::ConversationNotFound` for unknown ids.
    pub async fn send_message(&self, id: ConversationId, text: &str) -> Result<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidMessage);
        }
        simulate(self.latency.chat_send).await;

        let message = self
            .with_conversations(|conversations| {
                let conversation = conversations
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(Error::ConversationNotFound(id))?;
                let message = outgoing(conversation.next_message_id(), text);
                conversation.push(message.clone());
                Ok::<_, Error>(message)
            })
            .await??;

        debug!("Sent message {} in conversation {id}", message.id);
        Ok(message)
    }

    /// Start a conversation about a listing.
    ///
    /// Returns the existing conversation when one about `item_id` is
    /// already open. A blank `initial_message` starts it without messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversations cannot be fetched.
    pub async fn create_conversation(
        &self,
        item_id: ItemId,
        seller_id: i64,
        seller_name: &str,
        item_title: &str,
        initial_message: &str,
    ) -> Result<ChatConversation> {
        simulate(self.latency.chat_create).await;

        self.with_conversations(|conversations| {
            if let Some(existing) = conversations.iter().find(|c| c.item_id == item_id) {
                debug!("Reusing conversation {} for item {item_id}", existing.id);
                return existing.clone();
            }

            let id = ConversationId(i64::try_from(conversations.len()).unwrap_or(i64::MAX) + 1);
            let mut conversation = ChatConversation {
                id,
                seller_id,
                seller_name: seller_name.to_string(),
                seller_avatar: String::new(),
                item_id,
                item_title: item_title.to_string(),
                item_image: String::new(),
                last_message: String::new(),
                last_message_time: String::new(),
                is_read: true,
                messages: Vec::new(),
            };
            let initial_message = initial_message.trim();
            if !initial_message.is_empty() {
                conversation.push(outgoing(1, initial_message));
            }

            info!("Started conversation {id} with {seller_name} about item {item_id}");
            conversations.push(conversation.clone());
            conversation
        })
        .await
    }
}

fn outgoing(id: i64, text: &str) -> ChatMessage {
    ChatMessage {
        id,
        sender_id: CURRENT_USER_ID,
        sender_name: "You".to_string(),
        message: text.to_string(),
        timestamp: Local::now().format("%H:%M").to_string(),
        is_from_current_user: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn repo() -> ChatRepository {
        ChatRepository::new(Latency::none())
    }

    #[tokio::test]
    async fn test_loads_fixture_once() {
        let repo = repo();
        let conversations = repo.conversations().await.unwrap();
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].item_id, ItemId(1));

        repo.send_message(ConversationId(1), "Tomorrow?").await.unwrap();
        let reloaded = repo.conversation(ConversationId(1)).await.unwrap().unwrap();
        assert_eq!(reloaded.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_send_message_updates_preview() {
        let repo = repo();
        let message = repo
            .send_message(ConversationId(2), "  Ok, thanks  ")
            .await
            .unwrap();
        assert_eq!(message.id, 3);
        assert_eq!(message.message, "Ok, thanks");
        assert!(message.is_from_current_user);

        let conversation = repo.conversation(ConversationId(2)).await.unwrap().unwrap();
        assert_eq!(conversation.last_message, "Ok, thanks");
        assert_eq!(conversation.messages.last().unwrap(), &message);
    }

    #[tokio::test]
    async fn test_send_message_errors() {
        let repo = repo();
        assert!(matches!(
            repo.send_message(ConversationId(1), "   ").await,
            Err(Error::InvalidMessage)
        ));
        let err = repo.send_message(ConversationId(9), "Hi").await.unwrap_err();
        assert!(matches!(err, Error::ConversationNotFound(ConversationId(9))));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_conversation() {
        let repo = repo();
        let created = repo
            .create_conversation(ItemId(5), 105, "Priya", "Used Bicycle", "Is it available?")
            .await
            .unwrap();
        assert_eq!(created.id, ConversationId(3));
        assert_eq!(created.messages.len(), 1);
        assert_eq!(created.last_message, "Is it available?");

        let found = repo.conversation_for_item(ItemId(5)).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_create_conversation_reuses_existing() {
        let repo = repo();
        let existing = repo
            .create_conversation(ItemId(1), 101, "John Smith", "iPhone", "Hello again")
            .await
            .unwrap();
        assert_eq!(existing.id, ConversationId(1));
        assert_eq!(existing.messages.len(), 2);
        assert_eq!(repo.conversations().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_read() {
        let repo = repo();
        repo.mark_read(ConversationId(1)).await.unwrap();
        assert!(repo.conversation(ConversationId(1)).await.unwrap().unwrap().is_read);
        assert!(repo.mark_read(ConversationId(7)).await.is_err());
    }
}
