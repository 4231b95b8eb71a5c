//! Inventory ledger operations.
//!
//! Every change to an item's counter goes through this module, which in turn
//! goes through [`InventoryRepository::adjust`] or
//! [`InventoryRepository::recount`]; each call appends one history entry.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use tracing::{debug, warn};

use giftdesk_domain::{
    ActorId, CountChange, EventId, InventoryAction, InventoryAdjustment, InventoryId,
    InventoryItem, RecomputeOutcome,
};

use crate::{AppError, AppState};

/// Attribution for repairs the service runs on its own.
pub const SYSTEM_ACTOR: &str = "system";

const DRIFT_REASON: &str = "drift correction";

/// Deltas that reached the store, split by whether the item still existed.
#[derive(Debug, Clone, Default)]
pub struct AppliedDeltas {
    pub applied: BTreeSet<InventoryId>,
    pub missing: BTreeSet<InventoryId>,
}

/// Overwrites the counter with `new_count`. Negative values are accepted.
/// The recount baseline shifts by the same amount, so the value survives
/// the next reconciliation.
pub async fn apply(
    state: &AppState,
    item_id: &InventoryId,
    new_count: i64,
    action: InventoryAction,
    actor: &ActorId,
    reason: Option<String>,
) -> Result<InventoryItem, AppError> {
    adjust(state, item_id, CountChange::Rebase(new_count), action, actor, reason)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("inventory item '{}'", item_id)))
}

/// Moves the counter by `delta` in one store-side critical section.
pub async fn apply_delta(
    state: &AppState,
    item_id: &InventoryId,
    delta: i64,
    action: InventoryAction,
    actor: &ActorId,
    reason: Option<String>,
) -> Result<Option<InventoryItem>, AppError> {
    adjust(state, item_id, CountChange::Delta(delta), action, actor, reason).await
}

/// Applies one combined delta per item. Items that no longer exist are
/// reported back instead of failing the whole operation.
pub async fn apply_deltas(
    state: &AppState,
    deltas: &BTreeMap<InventoryId, i64>,
    action: InventoryAction,
    actor: &ActorId,
    reason: Option<String>,
) -> Result<AppliedDeltas, AppError> {
    let mut outcome = AppliedDeltas::default();
    for (item_id, delta) in deltas {
        if *delta == 0 {
            continue;
        }
        match apply_delta(state, item_id, *delta, action, actor, reason.clone()).await? {
            Some(item) => {
                debug!(
                    "ledger {}: item={} delta={} now={}",
                    action.as_str(),
                    item_id,
                    delta,
                    item.current_inventory
                );
                outcome.applied.insert(item_id.clone());
            }
            None => {
                warn!("ledger {}: item {} vanished, delta {} skipped", action.as_str(), item_id, delta);
                outcome.missing.insert(item_id.clone());
            }
        }
    }
    Ok(outcome)
}

/// Re-derives the counter from the active check-in records.
pub async fn recompute(
    state: &AppState,
    item_id: &InventoryId,
    actor: &ActorId,
) -> Result<RecomputeOutcome, AppError> {
    let recount = state
        .inventory
        .recount(item_id, actor, Some(DRIFT_REASON.to_string()))
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("inventory item '{}'", item_id)))?;
    let drift = recount.drift.unwrap_or_default();
    if drift != 0 {
        state.metrics.record_drift_correction();
        warn!(
            "inventory drift corrected: item={} drift={} distributed={} now={}",
            item_id, drift, recount.distributed, recount.item.current_inventory
        );
    }
    Ok(RecomputeOutcome {
        item: recount.item,
        drift,
    })
}

/// Recomputes every touched item. Failures are logged and never surface:
/// the counters they would have fixed are repaired by the next recompute.
pub async fn recompute_touched<'a, I>(state: &AppState, item_ids: I, actor: &ActorId)
where
    I: IntoIterator<Item = &'a InventoryId>,
{
    for item_id in item_ids {
        if let Err(err) = recompute(state, item_id, actor).await {
            warn!("recompute after write failed for item {}: {}", item_id, err);
        }
    }
}

/// Recomputes every item in an event's pool and returns the ones that drifted.
pub async fn reconcile_pool(
    state: &AppState,
    pool_id: &EventId,
    actor: &ActorId,
) -> Result<Vec<RecomputeOutcome>, AppError> {
    let items = state
        .inventory
        .list_pool(pool_id)
        .await
        .map_err(AppError::Internal)?;
    let mut corrected = Vec::new();
    for item in items {
        match recompute(state, &item.id, actor).await {
            Ok(outcome) if outcome.drift != 0 => corrected.push(outcome),
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(corrected)
}

pub(crate) async fn adjust(
    state: &AppState,
    item_id: &InventoryId,
    change: CountChange,
    action: InventoryAction,
    actor: &ActorId,
    reason: Option<String>,
) -> Result<Option<InventoryItem>, AppError> {
    if item_id.is_blank() {
        return Ok(None);
    }
    let adjustment = InventoryAdjustment {
        change,
        action,
        performed_by: actor.clone(),
        reason,
        at: Utc::now(),
    };
    state
        .inventory
        .adjust(item_id, adjustment)
        .await
        .map_err(AppError::Internal)
}
