// Activity log entry kinds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Checkin,
    UndoCheckin,
    UpdateCheckinGifts,
    DeleteCheckin,
    InventoryAdjustment,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Checkin => "checkin",
            ActivityKind::UndoCheckin => "undo_checkin",
            ActivityKind::UpdateCheckinGifts => "update_checkin_gifts",
            ActivityKind::DeleteCheckin => "delete_checkin",
            ActivityKind::InventoryAdjustment => "inventory_adjustment",
        }
    }
}
