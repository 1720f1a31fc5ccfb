pub mod dtos;
pub mod tokens;

pub use dtos::Claims;
pub use tokens::{issue_access_token, verify_access_token};
