pub mod auth;
pub mod chat;
pub mod error;

pub use error::{AppError, AppResult, ErrorResponse};
