// Inventory item entity
// One row per (event, type, style, size, gender) variant. The counter and its
// history only change through `apply_adjustment` and `recount_to`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorId, EventId, InventoryAction, InventoryId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: InventoryId,
    /// Pool owner: always the main event's id.
    pub event_id: EventId,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub qty_warehouse: i64,
    #[serde(default)]
    pub qty_on_site: i64,
    /// Stock received into the pool; ground truth baseline for recounts.
    pub starting_inventory: i64,
    pub current_inventory: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_event_count: Option<i64>,
    #[serde(default)]
    pub inventory_history: Vec<InventoryHistoryEntry>,
    #[serde(default)]
    pub allocated_events: BTreeSet<EventId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryHistoryEntry {
    pub action: InventoryAction,
    /// Signed change applied to the counter.
    pub quantity: i64,
    pub previous_count: i64,
    pub new_count: i64,
    pub performed_by: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub event_id: EventId,
    pub item_type: String,
    pub style: String,
    pub size: String,
    pub gender: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountChange {
    /// Overwrite the counter.
    SetTo(i64),
    /// Move the counter by a signed amount.
    Delta(i64),
    /// Move both the counter and the starting baseline.
    Restock(i64),
    /// Overwrite the counter and shift the baseline by the same amount, so a
    /// physical recount survives the next drift correction.
    Rebase(i64),
}

#[derive(Debug, Clone)]
pub struct InventoryAdjustment {
    pub change: CountChange,
    pub action: InventoryAction,
    pub performed_by: ActorId,
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(
        event_id: impl Into<EventId>,
        item_type: impl Into<String>,
        style: impl Into<String>,
        starting_inventory: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: InventoryId::generate(),
            event_id: event_id.into(),
            item_type: item_type.into(),
            style: style.into(),
            size: String::new(),
            gender: String::new(),
            qty_warehouse: 0,
            qty_on_site: starting_inventory,
            starting_inventory,
            current_inventory: starting_inventory,
            post_event_count: None,
            inventory_history: Vec::new(),
            allocated_events: BTreeSet::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn variant_key(&self) -> VariantKey {
        VariantKey {
            event_id: self.event_id.clone(),
            item_type: self.item_type.trim().to_lowercase(),
            style: self.style.trim().to_lowercase(),
            size: self.size.trim().to_lowercase(),
            gender: self.gender.trim().to_lowercase(),
        }
    }

    pub fn display_name(&self) -> String {
        [&self.item_type, &self.style, &self.size, &self.gender]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether `event_id` (whose pool is `pool_id`) may draw from this item.
    /// The main event always may; secondary events need an allocation.
    pub fn is_drawable_by(&self, event_id: &EventId, pool_id: &EventId) -> bool {
        if &self.event_id != pool_id {
            return false;
        }
        event_id == pool_id || self.allocated_events.contains(event_id)
    }

    pub fn post_event_variance(&self) -> Option<i64> {
        self.post_event_count
            .map(|count| count - self.current_inventory)
    }

    /// Applies one adjustment and appends exactly one history entry.
    pub fn apply_adjustment(&mut self, adjustment: &InventoryAdjustment) -> &InventoryHistoryEntry {
        let previous = self.current_inventory;
        let next = match adjustment.change {
            CountChange::SetTo(value) => value,
            CountChange::Delta(delta) => previous + delta,
            CountChange::Restock(delta) => {
                self.starting_inventory += delta;
                previous + delta
            }
            CountChange::Rebase(value) => {
                self.starting_inventory += value - previous;
                value
            }
        };
        self.current_inventory = next;
        self.updated_at = adjustment.at;
        self.inventory_history.push(InventoryHistoryEntry {
            action: adjustment.action,
            quantity: next - previous,
            previous_count: previous,
            new_count: next,
            performed_by: adjustment.performed_by.clone(),
            reason: adjustment.reason.clone(),
            timestamp: adjustment.at,
        });
        &self.inventory_history[self.inventory_history.len() - 1]
    }

    /// Sets the counter to `starting_inventory - distributed`. Returns the
    /// drift that was corrected, or `None` when the counter already agreed.
    pub fn recount_to(
        &mut self,
        distributed: i64,
        performed_by: &ActorId,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> Option<i64> {
        let expected = self.starting_inventory - distributed;
        let drift = self.current_inventory - expected;
        if drift == 0 {
            return None;
        }
        self.apply_adjustment(&InventoryAdjustment {
            change: CountChange::SetTo(expected),
            action: InventoryAction::Recount,
            performed_by: performed_by.clone(),
            reason,
            at,
        });
        Some(drift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustment(change: CountChange) -> InventoryAdjustment {
        InventoryAdjustment {
            change,
            action: InventoryAction::Checkin,
            performed_by: ActorId::from("staff-1"),
            reason: None,
            at: Utc::now(),
        }
    }

    #[test]
    fn delta_adjustment_records_previous_and_new_counts() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 10);
        let entry = item.apply_adjustment(&adjustment(CountChange::Delta(-3))).clone();
        assert_eq!(item.current_inventory, 7);
        assert_eq!(entry.previous_count, 10);
        assert_eq!(entry.new_count, 7);
        assert_eq!(entry.quantity, -3);
        assert_eq!(item.inventory_history.len(), 1);
    }

    #[test]
    fn counter_may_go_negative() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 1);
        item.apply_adjustment(&adjustment(CountChange::Delta(-4)));
        assert_eq!(item.current_inventory, -3);
    }

    #[test]
    fn restock_moves_baseline_with_counter() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 5);
        item.apply_adjustment(&adjustment(CountChange::Delta(-2)));
        item.apply_adjustment(&adjustment(CountChange::Restock(10)));
        assert_eq!(item.starting_inventory, 15);
        assert_eq!(item.current_inventory, 13);
    }

    #[test]
    fn recount_only_writes_history_on_drift() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 10);
        item.apply_adjustment(&adjustment(CountChange::Delta(-2)));
        let actor = ActorId::from("system");
        assert_eq!(item.recount_to(2, &actor, None, Utc::now()), None);
        assert_eq!(item.inventory_history.len(), 1);

        item.apply_adjustment(&adjustment(CountChange::SetTo(42)));
        assert_eq!(item.recount_to(2, &actor, None, Utc::now()), Some(34));
        assert_eq!(item.current_inventory, 8);
        let last = item.inventory_history.last().expect("recount entry");
        assert_eq!(last.action, InventoryAction::Recount);
    }

    #[test]
    fn rebase_keeps_recount_in_agreement() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 10);
        item.apply_adjustment(&adjustment(CountChange::Delta(-2)));
        item.apply_adjustment(&adjustment(CountChange::Rebase(5)));
        assert_eq!(item.starting_inventory, 7);
        assert_eq!(item.recount_to(2, &ActorId::from("system"), None, Utc::now()), None);
        assert_eq!(item.current_inventory, 5);
    }

    #[test]
    fn secondary_event_needs_allocation() {
        let mut item = InventoryItem::new("m", "tote", "canvas", 10);
        let main = EventId::from("m");
        let side = EventId::from("s");
        assert!(item.is_drawable_by(&main, &main));
        assert!(!item.is_drawable_by(&side, &main));
        item.allocated_events.insert(side.clone());
        assert!(item.is_drawable_by(&side, &main));
        assert!(!item.is_drawable_by(&side, &EventId::from("other")));
    }

    #[test]
    fn variant_key_ignores_case_and_padding() {
        let mut a = InventoryItem::new("m", "Shirt", "Crew", 1);
        a.size = "M ".to_string();
        let mut b = InventoryItem::new("m", "shirt", " crew", 1);
        b.size = "m".to_string();
        assert_eq!(a.variant_key(), b.variant_key());
        assert_eq!(a.display_name(), "Shirt Crew M");
    }
}
