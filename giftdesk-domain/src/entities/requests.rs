// Inbound request payloads for the check-in engine

use serde::{Deserialize, Serialize};

use crate::value_objects::{CheckinId, EventId, GuestId, InventoryId};

fn default_quantity() -> i64 {
    1
}

/// One gift line as sent by a client. `inventory_id` may be blank when the
/// client had nothing to choose from; such lines are skipped, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedGift {
    #[serde(default = "blank_inventory_id")]
    pub inventory_id: InventoryId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn blank_inventory_id() -> InventoryId {
    InventoryId(String::new())
}

impl SelectedGift {
    pub fn new(inventory_id: impl Into<InventoryId>, quantity: i64) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            quantity,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    pub guest_id: GuestId,
    pub event_id: EventId,
    #[serde(default)]
    pub selected_gifts: Vec<SelectedGift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_field_preferences: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGiftSelection {
    pub event_id: EventId,
    #[serde(default)]
    pub selected_gifts: Vec<SelectedGift>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCheckinRequest {
    pub guest_id: GuestId,
    pub checkins: Vec<EventGiftSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// How an undo request names its check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinLocator {
    ById(CheckinId),
    ByGuestEvent { guest_id: GuestId, event_id: EventId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoCheckinRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_id: Option<CheckinId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<GuestId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl UndoCheckinRequest {
    /// Prefers the record id; falls back to the guest and event pair.
    pub fn locator(&self) -> Option<CheckinLocator> {
        if let Some(id) = self.checkin_id.as_ref().filter(|id| !id.is_blank()) {
            return Some(CheckinLocator::ById(id.clone()));
        }
        match (&self.guest_id, &self.event_id) {
            (Some(guest_id), Some(event_id)) if !guest_id.is_blank() && !event_id.is_blank() => {
                Some(CheckinLocator::ByGuestEvent {
                    guest_id: guest_id.clone(),
                    event_id: event_id.clone(),
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGiftsRequest {
    #[serde(default)]
    pub gifts: Vec<SelectedGift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustmentRequest {
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_gift_defaults_blank_id_and_single_unit() {
        let gift: SelectedGift = serde_json::from_str("{}").expect("parse");
        assert!(gift.inventory_id.is_blank());
        assert_eq!(gift.quantity, 1);
    }

    #[test]
    fn undo_locator_prefers_checkin_id() {
        let request = UndoCheckinRequest {
            checkin_id: Some(CheckinId::from("c1")),
            guest_id: Some(GuestId::from("g1")),
            event_id: Some(EventId::from("e1")),
            reason: None,
        };
        assert_eq!(
            request.locator(),
            Some(CheckinLocator::ById(CheckinId::from("c1")))
        );
    }

    #[test]
    fn undo_locator_falls_back_to_guest_and_event() {
        let request = UndoCheckinRequest {
            checkin_id: Some(CheckinId::from(" ")),
            guest_id: Some(GuestId::from("g1")),
            event_id: Some(EventId::from("e1")),
            reason: None,
        };
        assert_eq!(
            request.locator(),
            Some(CheckinLocator::ByGuestEvent {
                guest_id: GuestId::from("g1"),
                event_id: EventId::from("e1"),
            })
        );
    }

    #[test]
    fn undo_locator_requires_both_guest_and_event() {
        let request = UndoCheckinRequest {
            checkin_id: None,
            guest_id: Some(GuestId::from("g1")),
            event_id: None,
            reason: None,
        };
        assert_eq!(request.locator(), None);
    }
}
