use infrastructure::events::{EventPublisher, ThreadEvent};
use infrastructure::repositories::{MessageRepository, NewMessage, ThreadRepository};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use super::access::load_thread_for;
use super::dtos::{MessageResponse, SendMessageRequest};
use crate::{AppError, AppResult};

pub struct SendMessageUseCase;

impl SendMessageUseCase {
    #[instrument(skip(threads, messages, events, req))]
    pub async fn execute(
        threads: &dyn ThreadRepository,
        messages: &dyn MessageRepository,
        events: &dyn EventPublisher,
        thread_id: Uuid,
        sender_id: Uuid,
        req: SendMessageRequest,
    ) -> AppResult<MessageResponse> {
        req.validate()?;
        load_thread_for(threads, thread_id, sender_id).await?;

        let body = req.body.filter(|b| !b.trim().is_empty());
        let message = messages
            .insert(NewMessage {
                thread_id,
                sender_id,
                body: body.clone(),
                image_urls: req.image_urls,
            })
            .await
            .map_err(AppError::Store)?;

        // The message is already stored; a stale preview must not fail the send.
        if let Err(e) = threads
            .record_last_message(thread_id, body, message.created_at)
            .await
        {
            tracing::warn!(error = %e, "Failed to update thread preview");
        }

        super::notify(
            events,
            ThreadEvent::MessageCreated {
                thread_id,
                message_id: message.message_id,
                sender_id,
            },
        )
        .await;

        Ok(message.into())
    }
}
