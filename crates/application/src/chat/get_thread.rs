use infrastructure::repositories::{MessageRepository, ThreadRepository};
use uuid::Uuid;

use super::access::load_thread_for;
use super::dtos::ThreadDetailResponse;
use super::unread_count::UnreadCountUseCase;
use crate::AppResult;

pub struct GetThreadUseCase;

impl GetThreadUseCase {
    pub async fn execute(
        threads: &dyn ThreadRepository,
        messages: &dyn MessageRepository,
        thread_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<ThreadDetailResponse> {
        let thread = load_thread_for(threads, thread_id, user_id).await?;
        let unread = UnreadCountUseCase::execute(messages, thread_id, user_id).await?.unread;

        Ok(ThreadDetailResponse {
            thread: thread.into(),
            unread,
        })
    }
}
