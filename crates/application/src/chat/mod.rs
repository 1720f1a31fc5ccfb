pub mod access;
pub mod cursor;
pub mod dtos;
pub mod get_thread;
pub mod list_messages;
pub mod mark_read;
pub mod open_thread;
pub mod send_message;
pub mod unread_count;

use infrastructure::events::{EventPublisher, ThreadEvent};

/// Publish without failing the caller; realtime delivery is best effort.
pub(crate) async fn notify(events: &dyn EventPublisher, event: ThreadEvent) {
    if let Err(e) = events.publish(&event).await {
        tracing::warn!(channel = %event.channel(), error = %e, "Failed to publish thread event");
    }
}

#[cfg(test)]
#[path = "use_cases_test.rs"]
mod tests;
