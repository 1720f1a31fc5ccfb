use infrastructure::events::{EventPublisher, ThreadEvent};
use infrastructure::repositories::MessageRepository;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::dtos::MarkReadResponse;
use crate::{AppError, AppResult};

#[cfg(test)]
#[path = "mark_read_test.rs"]
mod tests;

/// Only the most recent messages of a thread are eligible for read tracking.
/// Older ones are never marked, keeping each call's work bounded.
pub const READ_RECEIPT_WINDOW: u64 = 500;

pub struct MarkThreadReadUseCase;

impl MarkThreadReadUseCase {
    /// Add `user_id` to `read_by` of every unread message in the recent window.
    ///
    /// The caller must already have checked that `user_id` participates in the
    /// thread. Each message is written on its own: a failed write is logged and
    /// skipped, and `updated` counts attempted writes, so it is an upper bound
    /// on what actually landed.
    #[instrument(skip(messages, events))]
    pub async fn execute(
        messages: &dyn MessageRepository,
        events: &dyn EventPublisher,
        thread_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<MarkReadResponse> {
        let recent = messages
            .list_recent(thread_id, READ_RECEIPT_WINDOW)
            .await
            .map_err(AppError::Store)?;

        let unread: Vec<_> = recent.iter().filter(|m| !m.is_read_by(user_id)).collect();

        let mut failed = 0usize;
        for message in &unread {
            let read_by = message.read_by_with(user_id);
            if let Err(e) = messages
                .update_read_by(message.message_id, &message.read_by, &read_by)
                .await
            {
                failed += 1;
                warn!(message_id = message.message_id, error = %e, "Failed to persist read receipt");
            }
        }

        let updated = unread.len();
        debug!(fetched = recent.len(), updated, failed, "Marked thread as read");

        if updated > 0 {
            super::notify(events, ThreadEvent::MessagesRead { thread_id, user_id, updated }).await;
        }

        Ok(MarkReadResponse { ok: true, updated })
    }
}
