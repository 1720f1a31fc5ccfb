use bazaar_core::entities::threads;
use infrastructure::repositories::ThreadRepository;
use uuid::Uuid;

use crate::{AppError, AppResult};

/// Load a thread on behalf of `user_id`, who must be one of its participants.
pub async fn load_thread_for(
    threads: &dyn ThreadRepository,
    thread_id: Uuid,
    user_id: Uuid,
) -> AppResult<threads::Model> {
    let thread = threads
        .find_by_id(thread_id)
        .await
        .map_err(AppError::Store)?
        .ok_or_else(|| AppError::NotFound("Thread not found".to_string()))?;

    if !thread.is_participant(user_id) {
        return Err(AppError::Authorization("Not a participant of this thread".to_string()));
    }

    Ok(thread)
}
