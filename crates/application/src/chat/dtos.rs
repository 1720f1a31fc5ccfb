use bazaar_core::entities::{messages, threads};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

// ============ Threads ============

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenThreadRequest {
    pub listing_id: Uuid,
    pub seller_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ThreadResponse {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub last_message: Option<String>,
    // Using String for ISO dates to match the web clients
    pub created_at: String,
    pub updated_at: String,
}

impl From<threads::Model> for ThreadResponse {
    fn from(thread: threads::Model) -> Self {
        ThreadResponse {
            id: thread.thread_id,
            listing_id: thread.listing_id,
            buyer_id: thread.buyer_id,
            seller_id: thread.seller_id,
            last_message: thread.last_message,
            created_at: thread.created_at.to_rfc3339(),
            updated_at: thread.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadDetailResponse {
    #[serde(flatten)]
    pub thread: ThreadResponse,
    pub unread: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

// ============ Messages ============

#[derive(Debug, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_has_content", skip_on_field_errors = false))]
pub struct SendMessageRequest {
    #[serde(default)]
    #[validate(length(max = 4000, message = "Message body must be at most 4000 characters"))]
    pub body: Option<String>,
    #[serde(default)]
    #[validate(
        length(max = 10, message = "A message can carry at most 10 images"),
        custom(function = "validate_image_urls")
    )]
    pub image_urls: Vec<String>,
}

fn validate_has_content(req: &SendMessageRequest) -> Result<(), ValidationError> {
    let has_body = req.body.as_deref().is_some_and(|b| !b.trim().is_empty());
    if has_body || !req.image_urls.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new("empty_message").with_message("Message needs a body or an image".into()))
    }
}

fn validate_image_urls(urls: &[String]) -> Result<(), ValidationError> {
    let all_valid = urls.iter().all(|raw| {
        raw.validate_url() && has_http_scheme(raw) && !raw.chars().any(char::is_whitespace)
    });
    if all_valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_image_url").with_message("Image URLs must be http(s) URLs".into()))
    }
}

// Schemes are case-insensitive
fn has_http_scheme(raw: &str) -> bool {
    raw.split_once("://")
        .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case("https") || scheme.eq_ignore_ascii_case("http"))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub id: i64,
    pub thread_id: Uuid,
    pub sender_id: Uuid,
    pub body: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: String,
    pub read_by: Vec<Uuid>,
}

impl From<messages::Model> for MessageResponse {
    fn from(message: messages::Model) -> Self {
        MessageResponse {
            id: message.message_id,
            thread_id: message.thread_id,
            sender_id: message.sender_id,
            body: message.body,
            image_urls: message.image_urls,
            created_at: message.created_at.to_rfc3339(),
            read_by: message.read_by,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<u64>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagePageResponse {
    pub messages: Vec<MessageResponse>,
    pub next_cursor: Option<String>,
}

// ============ Read receipts ============

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MarkReadResponse {
    pub ok: bool,
    pub updated: usize,
}
