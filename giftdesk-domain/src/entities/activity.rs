// Activity log entry entity
// Immutable once appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActivityId, ActivityKind, ActorId, EventId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    pub event_id: EventId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub performed_by: ActorId,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLogEntry {
    pub fn new(
        event_id: EventId,
        kind: ActivityKind,
        performed_by: ActorId,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            event_id,
            kind,
            performed_by,
            details,
            timestamp: Utc::now(),
        }
    }
}
