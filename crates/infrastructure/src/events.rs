use redis::aio::MultiplexedConnection;
use serde::Serialize;
use uuid::Uuid;

/// Realtime notification fanned out to the participants of a thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ThreadEvent {
    MessageCreated {
        thread_id: Uuid,
        message_id: i64,
        sender_id: Uuid,
    },
    MessagesRead {
        thread_id: Uuid,
        user_id: Uuid,
        updated: usize,
    },
}

impl ThreadEvent {
    pub fn thread_id(&self) -> Uuid {
        match self {
            ThreadEvent::MessageCreated { thread_id, .. } | ThreadEvent::MessagesRead { thread_id, .. } => {
                *thread_id
            }
        }
    }

    pub fn channel(&self) -> String {
        format!("thread:{}", self.thread_id())
    }
}

#[::async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &ThreadEvent) -> anyhow::Result<()>;
}

pub struct RedisEventPublisher {
    conn: MultiplexedConnection,
}

impl RedisEventPublisher {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[::async_trait::async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: &ThreadEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.conn.clone();
        redis::cmd("PUBLISH")
            .arg(event.channel())
            .arg(payload)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }
}

/// Drops every event. Used when no broker is configured.
pub struct NoopEventPublisher;

#[::async_trait::async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, _event: &ThreadEvent) -> anyhow::Result<()> {
        Ok(())
    }
}
