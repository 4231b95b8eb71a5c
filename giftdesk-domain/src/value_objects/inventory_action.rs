// Inventory history action kinds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    Initial,
    Checkin,
    UndoCheckin,
    EditCheckin,
    DeleteCheckin,
    ManualSet,
    Restock,
    Recount,
}

impl InventoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryAction::Initial => "initial",
            InventoryAction::Checkin => "checkin",
            InventoryAction::UndoCheckin => "undo_checkin",
            InventoryAction::EditCheckin => "edit_checkin",
            InventoryAction::DeleteCheckin => "delete_checkin",
            InventoryAction::ManualSet => "manual_set",
            InventoryAction::Restock => "restock",
            InventoryAction::Recount => "recount",
        }
    }
}
