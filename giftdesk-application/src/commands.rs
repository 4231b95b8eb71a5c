// Engine write paths

pub mod checkin_commands;
pub mod inventory_commands;
pub mod reconcile_commands;

use std::collections::HashMap;

use giftdesk_domain::{InventoryId, InventoryItem};

use crate::{AppError, AppState};

/// Loads the referenced items keyed by id. Blank and unknown ids are absent
/// from the map.
pub(crate) async fn load_inventory(
    state: &AppState,
    mut ids: Vec<InventoryId>,
) -> Result<HashMap<InventoryId, InventoryItem>, AppError> {
    ids.retain(|id| !id.is_blank());
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let items = state.inventory.find_many(&ids).await.map_err(AppError::Internal)?;
    Ok(items.into_iter().map(|item| (item.id.clone(), item)).collect())
}
