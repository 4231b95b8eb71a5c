// Results returned by engine operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{CheckinRecord, GiftLine, GuestView, InventoryItem};
use crate::value_objects::{CheckinId, EventId, GuestId, InventoryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    BlankReference,
    UnknownItem,
    NonPositiveQuantity,
    OutsidePool,
    NotAllocated,
    Inactive,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::BlankReference => "empty inventory reference",
            SkipReason::UnknownItem => "inventory item not found",
            SkipReason::NonPositiveQuantity => "quantity must be positive",
            SkipReason::OutsidePool => "item belongs to another event's pool",
            SkipReason::NotAllocated => "item is not allocated to this event",
            SkipReason::Inactive => "item is inactive",
        };
        f.write_str(text)
    }
}

/// A gift line that was dropped instead of applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedGift {
    pub index: usize,
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    AlreadyCheckedIn,
    EventNotFound,
    DuplicateEventInBatch,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::AlreadyCheckedIn => "guest already checked into this event",
            RejectReason::EventNotFound => "event not found",
            RejectReason::DuplicateEventInBatch => "event appears more than once in the batch",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedCheckin {
    pub checkin: CheckinRecord,
    pub guest: GuestView,
    pub skipped: Vec<SkippedGift>,
    /// True when an earlier zero-gift record was updated instead of creating one.
    pub reused: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckinOutcome {
    Committed(Box<CommittedCheckin>),
    Rejected {
        guest_id: GuestId,
        event_id: EventId,
        reason: RejectReason,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCheckinResult {
    pub event_id: EventId,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_id: Option<CheckinId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedGift>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCheckinOutcome {
    pub results: Vec<EventCheckinResult>,
    pub guest: GuestView,
}

impl BatchCheckinOutcome {
    pub fn committed_count(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDelta {
    pub inventory_id: InventoryId,
    pub delta: i64,
}

/// Result of undoing or deleting a check-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversalOutcome {
    pub checkin_id: CheckinId,
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub restored: Vec<GiftLine>,
    pub projection_entries_removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGiftsOutcome {
    pub checkin: CheckinRecord,
    pub previous_gifts: Vec<GiftLine>,
    pub deltas: Vec<ItemDelta>,
    pub skipped: Vec<SkippedGift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeOutcome {
    pub item: InventoryItem,
    /// `previous - corrected`; zero when no drift was found.
    pub drift: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEventCountOutcome {
    pub item: InventoryItem,
    pub variance: i64,
}
