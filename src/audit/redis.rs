// Redis-backed audit sink
//
// Appends each event to a Redis list acting as the audit queue. Consumers
// pop from the other end.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{AuditError, EventPublisher};

/// Default name of the audit queue
pub const DEFAULT_AUDIT_QUEUE: &str = "audit_log";

/// Publisher pushing audit events onto a Redis list
#[derive(Clone)]
pub struct RedisPublisher {
    conn: ConnectionManager,
    queue: String,
}

impl RedisPublisher {
    /// Connect to Redis and target `queue`
    pub async fn connect(redis_url: &str, queue: impl Into<String>) -> Result<Self, AuditError> {
        let client =
            redis::Client::open(redis_url).map_err(|e| AuditError::Publish(e.to_string()))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AuditError::Publish(e.to_string()))?;

        let queue = queue.into();
        tracing::info!(queue = %queue, "Connected audit publisher to Redis");

        Ok(Self { conn, queue })
    }
}

#[async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), AuditError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .rpush(&self.queue, payload)
            .await
            .map_err(|e| AuditError::Publish(e.to_string()))?;

        tracing::debug!(queue = %self.queue, "Published audit event");
        Ok(())
    }
}
