use chrono::DateTime;
use infrastructure::repositories::MessageCursor;

use crate::{AppError, AppResult};

// Token format: "<created_at unix micros>_<message_id>". Micros match the
// precision of timestamptz so a token always round-trips exactly.

pub fn encode_cursor(cursor: &MessageCursor) -> String {
    format!("{}_{}", cursor.created_at.timestamp_micros(), cursor.message_id)
}

pub fn decode_cursor(token: &str) -> AppResult<MessageCursor> {
    let invalid = || AppError::Validation(format!("Invalid cursor: {}", token));

    let (micros, message_id) = token.split_once('_').ok_or_else(invalid)?;
    let micros: i64 = micros.parse()?;
    let message_id: i64 = message_id.parse()?;
    let created_at = DateTime::from_timestamp_micros(micros).ok_or_else(invalid)?;

    Ok(MessageCursor {
        created_at: created_at.fixed_offset(),
        message_id,
    })
}
