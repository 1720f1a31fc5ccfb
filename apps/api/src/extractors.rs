use actix_web::{FromRequest, HttpMessage};
use application::auth::Claims;
use application::{AppError, AppResult};
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::handlers::error_handler::HttpAppError;

/// Authenticated caller, resolved by `AuthMiddleware` from the bearer token.
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> AppResult<Uuid> {
        self.0.user_id()
    }
}

impl FromRequest for AuthUser {
    type Error = HttpAppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthUser(claims.clone()))),
            None => ready(Err(AppError::Authentication("Missing bearer token".to_string()).into())),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
