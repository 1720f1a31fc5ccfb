use std::sync::Arc;

use infrastructure::database::DatabaseConnections;
use infrastructure::events::{EventPublisher, NoopEventPublisher, RedisEventPublisher};
use infrastructure::repositories::{
    InMemoryStore, MessageRepository, PostgresMessageRepository, PostgresThreadRepository,
    ThreadRepository,
};

/// Store and broker handles shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub threads: Arc<dyn ThreadRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub events: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn from_connections(connections: &DatabaseConnections) -> Self {
        Self {
            threads: Arc::new(PostgresThreadRepository::new(connections.postgres.clone())),
            messages: Arc::new(PostgresMessageRepository::new(connections.postgres.clone())),
            events: Arc::new(RedisEventPublisher::new(connections.redis.clone())),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            threads: store.clone(),
            messages: store,
            events: Arc::new(NoopEventPublisher),
        }
    }
}
