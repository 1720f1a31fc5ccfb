// In-process implementation of the messaging repositories used by the test
// suites. Store failures can be injected per message or for listing.

use std::collections::{HashMap, HashSet};

use bazaar_core::entities::{messages, threads};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use super::traits::{MessageCursor, MessageRepository, NewMessage, NewThread, ThreadRepository};

#[derive(Default)]
struct State {
    threads: HashMap<Uuid, threads::Model>,
    messages: Vec<messages::Model>,
    next_message_id: i64,
    failing_read_by_updates: HashSet<i64>,
    fail_listing: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `update_read_by` for `message_id` fail until cleared.
    pub fn fail_read_by_update(&self, message_id: i64) {
        self.state.lock().failing_read_by_updates.insert(message_id);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock();
        state.failing_read_by_updates.clear();
        state.fail_listing = false;
    }

    /// Make message listing fail, simulating an unavailable store.
    pub fn fail_listing(&self) {
        self.state.lock().fail_listing = true;
    }

    pub fn message(&self, message_id: i64) -> Option<messages::Model> {
        self.state
            .lock()
            .messages
            .iter()
            .find(|m| m.message_id == message_id)
            .cloned()
    }

    pub fn thread(&self, thread_id: Uuid) -> Option<threads::Model> {
        self.state.lock().threads.get(&thread_id).cloned()
    }

    fn thread_messages_desc(state: &State, thread_id: Uuid) -> Vec<messages::Model> {
        let mut found: Vec<messages::Model> = state
            .messages
            .iter()
            .filter(|m| m.thread_id == thread_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (b.created_at, b.message_id).cmp(&(a.created_at, a.message_id))
        });
        found
    }
}

#[::async_trait::async_trait]
impl ThreadRepository for InMemoryStore {
    async fn find_by_id(&self, thread_id: Uuid) -> anyhow::Result<Option<threads::Model>> {
        Ok(self.thread(thread_id))
    }

    async fn find_for_listing(
        &self,
        listing_id: Uuid,
        buyer_id: Uuid,
        seller_id: Uuid,
    ) -> anyhow::Result<Option<threads::Model>> {
        Ok(self
            .state
            .lock()
            .threads
            .values()
            .find(|t| t.listing_id == listing_id && t.buyer_id == buyer_id && t.seller_id == seller_id)
            .cloned())
    }

    async fn create(&self, thread: NewThread) -> anyhow::Result<threads::Model> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let model = threads::Model {
            thread_id: Uuid::new_v4(),
            listing_id: thread.listing_id,
            buyer_id: thread.buyer_id,
            seller_id: thread.seller_id,
            last_message: None,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().threads.insert(model.thread_id, model.clone());
        Ok(model)
    }

    async fn record_last_message(
        &self,
        thread_id: Uuid,
        last_message: Option<String>,
        updated_at: DateTimeWithTimeZone,
    ) -> anyhow::Result<()> {
        if let Some(thread) = self.state.lock().threads.get_mut(&thread_id) {
            thread.last_message = last_message;
            thread.updated_at = updated_at;
        }
        Ok(())
    }
}

#[::async_trait::async_trait]
impl MessageRepository for InMemoryStore {
    async fn list_recent(&self, thread_id: Uuid, limit: u64) -> anyhow::Result<Vec<messages::Model>> {
        self.list_before(thread_id, None, limit).await
    }

    async fn list_before(
        &self,
        thread_id: Uuid,
        before: Option<MessageCursor>,
        limit: u64,
    ) -> anyhow::Result<Vec<messages::Model>> {
        let state = self.state.lock();
        if state.fail_listing {
            anyhow::bail!("message store unavailable");
        }

        Ok(Self::thread_messages_desc(&state, thread_id)
            .into_iter()
            .filter(|m| before.map_or(true, |cursor| cursor.is_before(m)))
            .take(limit as usize)
            .collect())
    }

    async fn insert(&self, message: NewMessage) -> anyhow::Result<messages::Model> {
        let mut state = self.state.lock();
        state.next_message_id += 1;

        // Microsecond precision like timestamptz. The wall clock may step
        // back, so keep created_at non-decreasing like a serial log.
        let now = Utc::now();
        let mut created_at: DateTimeWithTimeZone = DateTime::from_timestamp_micros(now.timestamp_micros())
            .unwrap_or(now)
            .into();
        if let Some(last) = state.messages.last() {
            created_at = created_at.max(last.created_at);
        }

        let model = messages::Model {
            message_id: state.next_message_id,
            thread_id: message.thread_id,
            sender_id: message.sender_id,
            body: message.body,
            image_urls: message.image_urls,
            created_at,
            read_by: Vec::new(),
        };
        state.messages.push(model.clone());
        Ok(model)
    }

    async fn update_read_by(
        &self,
        message_id: i64,
        expected: &[Uuid],
        read_by: &[Uuid],
    ) -> anyhow::Result<()> {
        let mut state = self.state.lock();
        if state.failing_read_by_updates.contains(&message_id) {
            anyhow::bail!("simulated write failure for message {}", message_id);
        }

        let message = state
            .messages
            .iter_mut()
            .find(|m| m.message_id == message_id)
            .ok_or_else(|| anyhow::anyhow!("message {} not found", message_id))?;

        if message.read_by != expected {
            anyhow::bail!("read_by of message {} changed concurrently", message_id);
        }
        message.read_by = read_by.to_vec();
        Ok(())
    }

    async fn count_unread(&self, thread_id: Uuid, user_id: Uuid) -> anyhow::Result<u64> {
        Ok(self
            .state
            .lock()
            .messages
            .iter()
            .filter(|m| m.thread_id == thread_id && m.sender_id != user_id && !m.is_read_by(user_id))
            .count() as u64)
    }
}
