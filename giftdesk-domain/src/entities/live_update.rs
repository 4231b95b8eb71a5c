// Live update broadcast payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EventId;

pub const CHECKIN_UPDATE: &str = "checkin_update";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveUpdate {
    #[serde(rename = "eventId")]
    pub event_id: EventId,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
}

impl LiveUpdate {
    pub fn checkin_update(event_id: EventId) -> Self {
        Self {
            event_id,
            kind: CHECKIN_UPDATE.to_string(),
            timestamp: Utc::now(),
        }
    }
}
