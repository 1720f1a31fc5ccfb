use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppError, AppResult};

// ============ JWT Claims ============

/// Claims of an access token minted by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Authentication("Invalid user ID".to_string()))
    }
}
