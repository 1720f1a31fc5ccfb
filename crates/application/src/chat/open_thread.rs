use infrastructure::repositories::{NewThread, ThreadRepository};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dtos::{OpenThreadRequest, ThreadResponse};
use crate::{AppError, AppResult};

pub struct OpenThreadUseCase;

impl OpenThreadUseCase {
    /// Find the buyer's thread with the seller about a listing, or start one.
    #[instrument(skip(threads))]
    pub async fn execute(
        threads: &dyn ThreadRepository,
        buyer_id: Uuid,
        req: OpenThreadRequest,
    ) -> AppResult<ThreadResponse> {
        if buyer_id == req.seller_id {
            return Err(AppError::Validation("Cannot open a thread with yourself".to_string()));
        }

        if let Some(existing) = threads
            .find_for_listing(req.listing_id, buyer_id, req.seller_id)
            .await
            .map_err(AppError::Store)?
        {
            return Ok(existing.into());
        }

        let thread = threads
            .create(NewThread {
                listing_id: req.listing_id,
                buyer_id,
                seller_id: req.seller_id,
            })
            .await
            .map_err(AppError::Store)?;

        info!(thread_id = %thread.thread_id, "Thread opened");
        Ok(thread.into())
    }
}
