use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the audit trail. Storage of the trail is an external
/// concern behind the [`AuditSink`](crate::domain::ports::AuditSink) port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub entity_type: String,
    pub entity_id: u32,
    pub actor_id: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        action: &str,
        entity_type: &str,
        entity_id: u32,
        actor_id: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            actor_id,
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
