// Audit trail
//
// Records who did what to which entity. Publishing is best effort: a failed
// publish is logged and never fails the operation that produced the event.

pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use self::redis::RedisPublisher;

/// Audit action tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "ACTION_REGISTER")]
    Register,
    #[serde(rename = "ACTION_TOKEN_REQUEST")]
    TokenRequest,
    #[serde(rename = "ACTION_REFRESH_TOKEN")]
    RefreshToken,
    #[serde(rename = "ACTION_CREATE")]
    Create,
    #[serde(rename = "ACTION_UPDATE")]
    Update,
    #[serde(rename = "ACTION_DELETE")]
    Delete,
}

/// Audited entity tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    #[serde(rename = "ENTITY_USER")]
    User,
    #[serde(rename = "ENTITY_ACTOR")]
    Actor,
}

/// A single audit record as it goes on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: Action,
    pub entity: Entity,
    #[serde(rename = "entityId")]
    pub entity_id: i64,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(action: Action, entity: Entity, entity_id: i64) -> Self {
        Self {
            action,
            entity,
            entity_id,
            timestamp: Utc::now(),
        }
    }

    /// JSON encoding used by every publisher
    pub fn to_bytes(&self) -> Result<Vec<u8>, AuditError> {
        serde_json::to_vec(self).map_err(AuditError::from)
    }
}

/// Audit publishing failures
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Failed to serialize audit event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to publish audit event: {0}")]
    Publish(String),
}

/// Sink for serialized audit events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, payload: Vec<u8>) -> Result<(), AuditError>;
}

/// Audit logger handed to services
///
/// Without a publisher, events are only traced.
#[derive(Clone, Default)]
pub struct AuditLogger {
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl AuditLogger {
    /// Create a logger that forwards to `publisher`
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            publisher: Some(publisher),
        }
    }

    /// Create a logger with no sink
    pub fn disabled() -> Self {
        Self { publisher: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_some()
    }

    /// Record an event, swallowing any failure
    pub async fn log(&self, action: Action, entity: Entity, entity_id: i64) {
        let event = AuditEvent::new(action, entity, entity_id);

        let Some(publisher) = &self.publisher else {
            tracing::debug!(?action, ?entity, entity_id, "Audit publisher disabled, event dropped");
            return;
        };

        let result = match event.to_bytes() {
            Ok(payload) => publisher.publish(payload).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::warn!(?action, ?entity, entity_id, "Audit event not published: {}", e);
        }
    }
}
