use infrastructure::repositories::{MessageCursor, MessageRepository};
use uuid::Uuid;

use super::cursor::{decode_cursor, encode_cursor};
use super::dtos::{ListMessagesQuery, MessagePageResponse};
use crate::{AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 100;

pub struct ListMessagesUseCase;

impl ListMessagesUseCase {
    /// One page of the thread, newest first. Follow `next_cursor` for older messages.
    pub async fn execute(
        messages: &dyn MessageRepository,
        thread_id: Uuid,
        query: ListMessagesQuery,
    ) -> AppResult<MessagePageResponse> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let before = query.cursor.as_deref().map(decode_cursor).transpose()?;

        let page = messages
            .list_before(thread_id, before, limit)
            .await
            .map_err(AppError::Store)?;

        let next_cursor = if page.len() as u64 == limit {
            page.last().map(|m| encode_cursor(&MessageCursor::of(m)))
        } else {
            None
        };

        Ok(MessagePageResponse {
            messages: page.into_iter().map(Into::into).collect(),
            next_cursor,
        })
    }
}
