use infrastructure::repositories::MessageRepository;
use uuid::Uuid;

use super::dtos::UnreadCountResponse;
use crate::{AppError, AppResult};

pub struct UnreadCountUseCase;

impl UnreadCountUseCase {
    pub async fn execute(
        messages: &dyn MessageRepository,
        thread_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<UnreadCountResponse> {
        let unread = messages
            .count_unread(thread_id, user_id)
            .await
            .map_err(AppError::Store)?;
        Ok(UnreadCountResponse { unread })
    }
}
