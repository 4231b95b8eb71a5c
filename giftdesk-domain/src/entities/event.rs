// Event entity
// A checkpoint location guests check into. Main events own an inventory pool
// that their secondary (child) events draw from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EventId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub is_main_event: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<EventId>,
    #[serde(default)]
    pub pickup_field_preferences: serde_json::Value,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn main(id: impl Into<EventId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_main_event: true,
            parent_event_id: None,
            pickup_field_preferences: serde_json::Value::Null,
            is_archived: false,
            created_at: Utc::now(),
        }
    }

    pub fn secondary(
        id: impl Into<EventId>,
        name: impl Into<String>,
        parent_event_id: impl Into<EventId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_main_event: false,
            parent_event_id: Some(parent_event_id.into()),
            pickup_field_preferences: serde_json::Value::Null,
            is_archived: false,
            created_at: Utc::now(),
        }
    }

    /// Id of the event whose inventory pool this event draws from.
    pub fn pool_id(&self) -> &EventId {
        if self.is_main_event {
            return &self.id;
        }
        self.parent_event_id.as_ref().unwrap_or(&self.id)
    }
}
