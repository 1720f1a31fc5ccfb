// Repository traits for thread messaging.
// Use cases only see these, so the Postgres store and the in-memory store
// are interchangeable.

use bazaar_core::entities::{messages, threads};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// Position in a thread's message log, newest-first order is
/// `(created_at DESC, message_id DESC)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCursor {
    pub created_at: DateTimeWithTimeZone,
    pub message_id: i64,
}

impl MessageCursor {
    pub fn of(message: &messages::Model) -> Self {
        Self {
            created_at: message.created_at,
            message_id: message.message_id,
        }
    }

    /// True when `message` sorts strictly after the cursor in newest-first order.
    pub fn is_before(&self, message: &messages::Model) -> bool {
        (message.created_at, message.message_id) < (self.created_at, self.message_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewThread {
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub body: Option<String>,
    pub image_urls: Vec<String>,
}

#[::async_trait::async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn find_by_id(&self, thread_id: Uuid) -> anyhow::Result<Option<threads::Model>>;
    async fn find_for_listing(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
    ) -> anyhow::Result<Option<threads::Model>>;
    async fn create(&self, thread: NewThread) -> anyhow::Result<threads::Model>;
    /// Refresh the denormalized `last_message` and `updated_at` columns.
    async fn record_last_message(
        &self,
        thread_id: Uuid,
        last_message: Option<String>,
        updated_at: DateTimeWithTimeZone,
    ) -> anyhow::Result<()>;
}

#[::async_trait::async_trait]
pub trait MessageRepository: Send + Sync {
    /// Up to `limit` most recent messages of the thread, newest first.
    async fn list_recent(&self, thread_id: Uuid, limit: u64) -> anyhow::Result<Vec<messages::Model>>;
    /// Up to `limit` messages strictly older than `before`, newest first.
    async fn list_before(
        &self,
        thread_id: Uuid,
        before: Option<MessageCursor>,
        limit: u64,
    ) -> anyhow::Result<Vec<messages::Model>>;
    async fn insert(&self, message: NewMessage) -> anyhow::Result<messages::Model>;
    /// Compare-and-set of `read_by`: the write only lands if the stored set
    /// still equals `expected`, otherwise an error is returned.
    async fn update_read_by(
        &self,
        message_id: i64,
        expected: &[Uuid],
        read_by: &[Uuid],
    ) -> anyhow::Result<()>;
    /// Messages of the thread sent by someone else and not yet read by `user_id`.
    async fn count_unread(&self, thread_id: Uuid, user_id: Uuid) -> anyhow::Result<u64>;
}
