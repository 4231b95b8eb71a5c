use serde_json::json;
use tracing::info;

use giftdesk_domain::{
    normalize_optional_text, ActivityKind, ActivityLogEntry, Actor, CountChange, EventId,
    InventoryAction, InventoryId, InventoryItem, PostEventCountOutcome, RecomputeOutcome,
};

use crate::{activity, ledger, AppError, AppState};

/// Overwrites an item's counter after a physical count. The recount
/// baseline moves with it so the value survives the next reconciliation.
pub async fn set_inventory_count(
    state: &AppState,
    actor: &Actor,
    item_id: &InventoryId,
    new_count: i64,
    reason: Option<String>,
) -> Result<InventoryItem, AppError> {
    let reason = normalize_optional_text(reason);
    let item = ledger::apply(
        state,
        item_id,
        new_count,
        InventoryAction::ManualSet,
        &actor.id,
        reason.clone(),
    )
    .await?;
    audit_adjustment(state, actor, &item, "manual_set", new_count, reason).await;
    Ok(item)
}

/// Stock arriving into or leaving the pool.
pub async fn restock_item(
    state: &AppState,
    actor: &Actor,
    item_id: &InventoryId,
    delta: i64,
    reason: Option<String>,
) -> Result<InventoryItem, AppError> {
    if delta == 0 {
        return Err(AppError::BadRequest("restock delta must not be zero".to_string()));
    }
    let reason = normalize_optional_text(reason);
    let item = ledger::adjust(
        state,
        item_id,
        CountChange::Restock(delta),
        InventoryAction::Restock,
        &actor.id,
        reason.clone(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("inventory item '{}'", item_id)))?;
    audit_adjustment(state, actor, &item, "restock", delta, reason).await;
    Ok(item)
}

pub async fn recompute_item(
    state: &AppState,
    actor: &Actor,
    item_id: &InventoryId,
) -> Result<RecomputeOutcome, AppError> {
    let outcome = ledger::recompute(state, item_id, &actor.id).await?;
    info!(
        "recompute requested: item={} drift={} now={}",
        item_id, outcome.drift, outcome.item.current_inventory
    );
    Ok(outcome)
}

/// Recomputes every item in the pool the event draws from.
pub async fn reconcile_event_pool(
    state: &AppState,
    actor: &Actor,
    event_id: &EventId,
) -> Result<Vec<RecomputeOutcome>, AppError> {
    let event = state
        .events
        .find_by_id(event_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", event_id)))?;
    let corrected = ledger::reconcile_pool(state, event.pool_id(), &actor.id).await?;
    info!(
        "pool reconciled: event={} pool={} corrected={}",
        event.id,
        event.pool_id(),
        corrected.len()
    );
    Ok(corrected)
}

pub async fn record_post_event_count(
    state: &AppState,
    actor: &Actor,
    item_id: &InventoryId,
    count: i64,
) -> Result<PostEventCountOutcome, AppError> {
    if count < 0 {
        return Err(AppError::BadRequest("post-event count must not be negative".to_string()));
    }
    let item = state
        .inventory
        .set_post_event_count(item_id, count)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("inventory item '{}'", item_id)))?;
    let variance = item.post_event_variance().unwrap_or_default();
    activity::emit(
        state,
        ActivityLogEntry::new(
            item.event_id.clone(),
            ActivityKind::InventoryAdjustment,
            actor.id.clone(),
            json!({
                "operation": "post_event_count",
                "inventoryId": item.id,
                "name": item.display_name(),
                "postEventCount": count,
                "currentInventory": item.current_inventory,
                "variance": variance,
            }),
        ),
    )
    .await;
    if variance != 0 {
        info!("post-event variance: item={} variance={}", item.id, variance);
    }
    Ok(PostEventCountOutcome { item, variance })
}

async fn audit_adjustment(
    state: &AppState,
    actor: &Actor,
    item: &InventoryItem,
    operation: &str,
    amount: i64,
    reason: Option<String>,
) {
    state.metrics.record_inventory_adjustment();
    activity::emit(
        state,
        ActivityLogEntry::new(
            item.event_id.clone(),
            ActivityKind::InventoryAdjustment,
            actor.id.clone(),
            json!({
                "operation": operation,
                "inventoryId": item.id,
                "name": item.display_name(),
                "amount": amount,
                "currentInventory": item.current_inventory,
                "reason": reason,
            }),
        ),
    )
    .await;
    info!(
        "inventory {}: item={} amount={} now={}",
        operation, item.id, amount, item.current_inventory
    );
}
