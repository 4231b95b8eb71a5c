// Check-in record entity
// System of record for what a guest was given at one event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorId, CheckinId, EventId, GuestId, InventoryId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    pub id: CheckinId,
    pub guest_id: GuestId,
    pub event_id: EventId,
    #[serde(default)]
    pub gifts_distributed: Vec<GiftLine>,
    pub checked_in_by: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftLine {
    pub inventory_id: InventoryId,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckinRecord {
    pub fn has_gifts(&self) -> bool {
        !self.gifts_distributed.is_empty()
    }

    /// Total units of `inventory_id` this record holds.
    pub fn quantity_of(&self, inventory_id: &InventoryId) -> i64 {
        self.gifts_distributed
            .iter()
            .filter(|line| &line.inventory_id == inventory_id)
            .map(|line| line.quantity)
            .sum()
    }
}
