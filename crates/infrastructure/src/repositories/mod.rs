// Storage abstraction for threads and messages.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::InMemoryStore;
pub use postgres::{PostgresMessageRepository, PostgresThreadRepository};
pub use traits::{MessageCursor, MessageRepository, NewMessage, NewThread, ThreadRepository};
