use serde::Serialize;

use giftdesk_domain::{Event, EventId, InventoryId, InventoryItem};

use crate::{AppError, AppState};

/// The pool an event draws from, with the events sharing it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolOverview {
    pub pool_id: EventId,
    pub events: Vec<Event>,
    pub items: Vec<InventoryItem>,
}

pub async fn get_item(state: &AppState, item_id: &InventoryId) -> Result<InventoryItem, AppError> {
    state
        .inventory
        .find_by_id(item_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("inventory item '{}'", item_id)))
}

/// Active items the event may hand out.
pub async fn list_drawable_items(
    state: &AppState,
    event_id: &EventId,
) -> Result<Vec<InventoryItem>, AppError> {
    let event = find_event(state, event_id).await?;
    let pool_id = event.pool_id().clone();
    let mut items = state
        .inventory
        .list_pool(&pool_id)
        .await
        .map_err(AppError::Internal)?
        .into_iter()
        .filter(|item| item.is_active && item.is_drawable_by(&event.id, &pool_id))
        .collect::<Vec<_>>();
    items.sort_by_key(|item| item.display_name().to_lowercase());
    Ok(items)
}

pub async fn pool_overview(state: &AppState, event_id: &EventId) -> Result<PoolOverview, AppError> {
    let event = find_event(state, event_id).await?;
    let pool_id = event.pool_id().clone();
    let mut events = match state.events.find_by_id(&pool_id).await.map_err(AppError::Internal)? {
        Some(main) => vec![main],
        None => Vec::new(),
    };
    let mut children = state
        .events
        .find_children(&pool_id)
        .await
        .map_err(AppError::Internal)?;
    children.sort_by(|a, b| a.name.cmp(&b.name));
    events.extend(children);
    let mut items = state
        .inventory
        .list_pool(&pool_id)
        .await
        .map_err(AppError::Internal)?;
    items.sort_by_key(|item| item.display_name().to_lowercase());
    Ok(PoolOverview {
        pool_id,
        events,
        items,
    })
}

async fn find_event(state: &AppState, event_id: &EventId) -> Result<Event, AppError> {
    state
        .events
        .find_by_id(event_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", event_id)))
}
