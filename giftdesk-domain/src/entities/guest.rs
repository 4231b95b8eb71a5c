// Guest entity and its embedded check-in projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{CheckinRecord, GiftLine};
use crate::value_objects::{ActorId, CheckinId, EventId, GuestId, InventoryId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub event_id: EventId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub event_checkins: Vec<EventCheckin>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCheckin {
    pub event_id: EventId,
    /// Exact link to the check-in record. Older entries may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_id: Option<CheckinId>,
    pub checked_in: bool,
    pub checked_in_at: DateTime<Utc>,
    pub checked_in_by: ActorId,
    #[serde(default)]
    pub gifts_received: Vec<GiftReceived>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_field_preferences_at_checkin: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftReceived {
    pub inventory_id: InventoryId,
    pub quantity: i64,
    pub distributed_at: DateTime<Utc>,
}

impl EventCheckin {
    /// A check-in only counts once at least one gift has been handed out.
    pub fn is_complete(&self) -> bool {
        self.checked_in && !self.gifts_received.is_empty()
    }
}

impl Guest {
    pub fn new(
        event_id: impl Into<EventId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: GuestId::generate(),
            event_id: event_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            event_checkins: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn is_checked_into(&self, event_id: &EventId) -> bool {
        self.event_checkins
            .iter()
            .any(|entry| &entry.event_id == event_id && entry.is_complete())
    }

    /// Derived on every read; never stored.
    pub fn has_checked_in(&self) -> bool {
        self.event_checkins.iter().any(EventCheckin::is_complete)
    }

    /// Writes the projection entry for `record`. An entry already linked to
    /// the record, or an unfinished entry for the same event, is replaced in
    /// place; otherwise a new entry is appended. Returns the entry index.
    pub fn project_checkin(
        &mut self,
        record: &CheckinRecord,
        pickup_field_preferences: Option<serde_json::Value>,
        at: DateTime<Utc>,
    ) -> usize {
        let entry = EventCheckin {
            event_id: record.event_id.clone(),
            checkin_id: Some(record.id.clone()),
            checked_in: true,
            checked_in_at: at,
            checked_in_by: record.checked_in_by.clone(),
            gifts_received: gifts_received(&record.gifts_distributed, &[], at),
            pickup_field_preferences_at_checkin: pickup_field_preferences,
        };
        let existing = self
            .event_checkins
            .iter()
            .position(|candidate| candidate.checkin_id.as_ref() == Some(&record.id))
            .or_else(|| {
                self.event_checkins.iter().position(|candidate| {
                    candidate.event_id == record.event_id && !candidate.is_complete()
                })
            });
        self.updated_at = at;
        match existing {
            Some(index) => {
                self.event_checkins[index] = entry;
                index
            }
            None => {
                self.event_checkins.push(entry);
                self.event_checkins.len() - 1
            }
        }
    }

    /// Rewrites `giftsReceived` of one entry. Units the guest already held
    /// keep their original hand-out time.
    pub fn replace_gifts(&mut self, index: usize, lines: &[GiftLine], at: DateTime<Utc>) -> bool {
        let Some(entry) = self.event_checkins.get_mut(index) else {
            return false;
        };
        entry.gifts_received = gifts_received(lines, &entry.gifts_received, at);
        self.updated_at = at;
        true
    }

    pub fn remove_entry(&mut self, index: usize, at: DateTime<Utc>) -> Option<EventCheckin> {
        if index >= self.event_checkins.len() {
            return None;
        }
        self.updated_at = at;
        Some(self.event_checkins.remove(index))
    }

    /// Drops every entry for `event_id`; returns how many were removed.
    pub fn remove_event_entries(&mut self, event_id: &EventId, at: DateTime<Utc>) -> usize {
        let before = self.event_checkins.len();
        self.event_checkins.retain(|entry| &entry.event_id != event_id);
        let removed = before - self.event_checkins.len();
        if removed > 0 {
            self.updated_at = at;
        }
        removed
    }

    pub fn view(self) -> GuestView {
        GuestView {
            has_checked_in: self.has_checked_in(),
            guest: self,
        }
    }
}

fn gifts_received(lines: &[GiftLine], previous: &[GiftReceived], at: DateTime<Utc>) -> Vec<GiftReceived> {
    lines
        .iter()
        .map(|line| GiftReceived {
            inventory_id: line.inventory_id.clone(),
            quantity: line.quantity,
            distributed_at: previous
                .iter()
                .find(|gift| gift.inventory_id == line.inventory_id)
                .map(|gift| gift.distributed_at)
                .unwrap_or(at),
        })
        .collect()
}

/// Read model of a guest with its derived summary flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestView {
    #[serde(flatten)]
    pub guest: Guest,
    pub has_checked_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(event: &str, checked_in: bool, gifts: usize) -> EventCheckin {
        EventCheckin {
            event_id: EventId::from(event),
            checkin_id: None,
            checked_in,
            checked_in_at: Utc::now(),
            checked_in_by: ActorId::from("staff"),
            gifts_received: (0..gifts)
                .map(|idx| GiftReceived {
                    inventory_id: InventoryId::from(format!("inv-{idx}")),
                    quantity: 1,
                    distributed_at: Utc::now(),
                })
                .collect(),
            pickup_field_preferences_at_checkin: None,
        }
    }

    #[test]
    fn zero_gift_entry_does_not_count_as_checked_in() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("m", true, 0));
        assert!(!guest.is_checked_into(&EventId::from("m")));
        assert!(!guest.has_checked_in());
    }

    #[test]
    fn completed_entry_counts_only_for_its_event() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("s", true, 2));
        assert!(guest.is_checked_into(&EventId::from("s")));
        assert!(!guest.is_checked_into(&EventId::from("m")));
        assert!(guest.has_checked_in());
    }

    #[test]
    fn unchecked_entry_with_gifts_is_not_complete() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("m", false, 1));
        assert!(!guest.has_checked_in());
    }

    fn record(id: &str, event: &str, gifts: &[(&str, i64)]) -> CheckinRecord {
        let now = Utc::now();
        CheckinRecord {
            id: CheckinId::from(id),
            guest_id: GuestId::from("g"),
            event_id: EventId::from(event),
            gifts_distributed: gifts
                .iter()
                .map(|(item, quantity)| GiftLine {
                    inventory_id: InventoryId::from(*item),
                    quantity: *quantity,
                    notes: None,
                })
                .collect(),
            checked_in_by: ActorId::from("staff"),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn projecting_reuses_unfinished_entry_for_event() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("m", true, 0));
        guest.event_checkins.push(entry("s", true, 1));
        let index = guest.project_checkin(&record("c1", "m", &[("x", 2)]), None, Utc::now());
        assert_eq!(index, 0);
        assert_eq!(guest.event_checkins.len(), 2);
        assert_eq!(guest.event_checkins[0].checkin_id, Some(CheckinId::from("c1")));
        assert!(guest.is_checked_into(&EventId::from("m")));
    }

    #[test]
    fn replacing_gifts_keeps_hand_out_time_of_kept_items() {
        let mut guest = Guest::new("m", "A", "Smith");
        let first = Utc::now() - chrono::Duration::minutes(5);
        guest.project_checkin(&record("c1", "m", &[("x", 1)]), None, first);
        let later = Utc::now();
        let lines = record("c1", "m", &[("x", 2), ("y", 1)]).gifts_distributed;
        assert!(guest.replace_gifts(0, &lines, later));
        let gifts = &guest.event_checkins[0].gifts_received;
        assert_eq!(gifts[0].distributed_at, first);
        assert_eq!(gifts[0].quantity, 2);
        assert_eq!(gifts[1].distributed_at, later);
    }

    #[test]
    fn removing_event_entries_counts_removed() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("s", true, 1));
        guest.event_checkins.push(entry("s", true, 0));
        guest.event_checkins.push(entry("m", true, 1));
        assert_eq!(guest.remove_event_entries(&EventId::from("s"), Utc::now()), 2);
        assert_eq!(guest.event_checkins.len(), 1);
    }

    #[test]
    fn view_serializes_derived_flag() {
        let mut guest = Guest::new("m", "A", "Smith");
        guest.event_checkins.push(entry("m", true, 1));
        let json = serde_json::to_value(guest.view()).expect("serialize");
        assert_eq!(json["hasCheckedIn"], serde_json::Value::Bool(true));
        assert_eq!(json["firstName"], "A");
    }
}
