use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use giftdesk_domain::{
    locate_projection_entry, net_edit_deltas, normalize_optional_text, quantities_by_item,
    referenced_ids, retain_resolvable, select_edit_gifts, ActivityKind, ActivityLogEntry, Actor,
    CheckinId, CheckinLocator, CheckinRecord, GiftLine, InventoryAction, ProjectionMatch,
    ReversalOutcome, UndoCheckinRequest, UpdateGiftsOutcome, UpdateGiftsRequest,
};

use super::load_inventory;
use crate::{activity, ledger, AppError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reversal {
    Undo,
    Delete,
}

impl Reversal {
    fn action(self) -> InventoryAction {
        match self {
            Reversal::Undo => InventoryAction::UndoCheckin,
            Reversal::Delete => InventoryAction::DeleteCheckin,
        }
    }

    fn activity(self) -> ActivityKind {
        match self {
            Reversal::Undo => ActivityKind::UndoCheckin,
            Reversal::Delete => ActivityKind::DeleteCheckin,
        }
    }
}

/// Reverses a check-in: every unit goes back to the pool and the record is
/// removed. Open to any actor.
pub async fn undo_checkin(
    state: &AppState,
    actor: &Actor,
    request: UndoCheckinRequest,
) -> Result<ReversalOutcome, AppError> {
    let locator = request.locator().ok_or_else(|| {
        AppError::BadRequest("checkinId or guestId and eventId are required".to_string())
    })?;
    let record = match &locator {
        CheckinLocator::ById(id) => state.checkins.find_by_id(id).await,
        CheckinLocator::ByGuestEvent { guest_id, event_id } => {
            state.checkins.find_by_guest_event(guest_id, event_id).await
        }
    }
    .map_err(AppError::Internal)?
    .ok_or_else(|| AppError::NotFound(format!("check-in {:?}", locator)))?;

    let outcome = reverse(state, actor, record, Reversal::Undo, request.reason).await?;
    state.metrics.record_undo();
    Ok(outcome)
}

/// Admin-only hard delete. Same inventory reversal as undo, but every
/// projection entry for the event goes.
pub async fn delete_checkin(
    state: &AppState,
    actor: &Actor,
    checkin_id: &CheckinId,
    reason: Option<String>,
) -> Result<ReversalOutcome, AppError> {
    if !actor.is_admin() {
        return Err(AppError::PermissionDenied(
            "deleting a check-in requires the admin role".to_string(),
        ));
    }
    let record = state
        .checkins
        .find_by_id(checkin_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("check-in '{}'", checkin_id)))?;

    let outcome = reverse(state, actor, record, Reversal::Delete, reason).await?;
    state.metrics.record_delete();
    Ok(outcome)
}

/// Replaces the gift list of a check-in, moving only the net difference
/// per item through the ledger.
pub async fn update_checkin_gifts(
    state: &AppState,
    actor: &Actor,
    checkin_id: &CheckinId,
    request: UpdateGiftsRequest,
) -> Result<UpdateGiftsOutcome, AppError> {
    let mut record = state
        .checkins
        .find_by_id(checkin_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("check-in '{}'", checkin_id)))?;
    let event = state
        .events
        .find_by_id(&record.event_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", record.event_id)))?;
    let reason = normalize_optional_text(request.reason);

    let mut ids = referenced_ids(&request.gifts);
    ids.extend(record.gifts_distributed.iter().map(|line| line.inventory_id.clone()));
    let items = load_inventory(state, ids).await?;

    let previous = retain_resolvable(&record.gifts_distributed, &items);
    let mut selection = select_edit_gifts(&request.gifts, &event, &items, &previous);
    let deltas = net_edit_deltas(&previous, &selection.lines);
    let by_item = deltas
        .iter()
        .map(|delta| (delta.inventory_id.clone(), delta.delta))
        .collect::<BTreeMap<_, _>>();
    let applied =
        ledger::apply_deltas(state, &by_item, InventoryAction::EditCheckin, &actor.id, reason.clone()).await?;
    selection.drop_missing(&request.gifts, &applied.missing);

    let now = Utc::now();
    let previous_gifts = std::mem::replace(&mut record.gifts_distributed, selection.lines.clone());
    record.updated_at = now;
    state.checkins.save(&record).await.map_err(AppError::Internal)?;

    let guest = match state.guests.find_by_id(&record.guest_id).await.map_err(AppError::Internal)? {
        Some(mut guest) => {
            match locate_projection_entry(&guest.event_checkins, &record, state.projection_match_tolerance()) {
                Some(found) => {
                    let index = found.index();
                    if let ProjectionMatch::Window(_) = found {
                        guest.event_checkins[index].checkin_id = Some(record.id.clone());
                    }
                    guest.replace_gifts(index, &record.gifts_distributed, now);
                    state.guests.save(&guest).await.map_err(AppError::Internal)?;
                }
                None => warn!(
                    "gift edit: no projection entry for checkin={} guest={}",
                    record.id, record.guest_id
                ),
            }
            Some(guest)
        }
        None => {
            warn!("gift edit: guest {} missing for checkin={}", record.guest_id, record.id);
            None
        }
    };

    activity::emit(
        state,
        ActivityLogEntry::new(
            record.event_id.clone(),
            ActivityKind::UpdateCheckinGifts,
            actor.id.clone(),
            json!({
                "checkinId": record.id,
                "guestId": record.guest_id,
                "before": previous_gifts,
                "after": record.gifts_distributed,
                "deltas": deltas,
                "reason": reason,
            }),
        ),
    )
    .await;
    ledger::recompute_touched(state, applied.applied.iter(), &actor.id).await;
    activity::notify_live(state, &event).await;
    state.metrics.record_edit();
    info!(
        "check-in gifts updated: checkin={} lines {} -> {} deltas={}",
        record.id,
        previous_gifts.len(),
        record.gifts_distributed.len(),
        deltas.len()
    );

    Ok(UpdateGiftsOutcome {
        checkin: record,
        previous_gifts,
        deltas,
        skipped: selection.skipped,
        guest: guest.map(|guest| guest.view()),
    })
}

async fn reverse(
    state: &AppState,
    actor: &Actor,
    record: CheckinRecord,
    mode: Reversal,
    reason: Option<String>,
) -> Result<ReversalOutcome, AppError> {
    let reason = normalize_optional_text(reason);
    let ids = record
        .gifts_distributed
        .iter()
        .map(|line| line.inventory_id.clone())
        .collect();
    let items = load_inventory(state, ids).await?;
    let restored = retain_resolvable(&record.gifts_distributed, &items);
    let applied = ledger::apply_deltas(
        state,
        &quantities_by_item(&restored),
        mode.action(),
        &actor.id,
        reason.clone(),
    )
    .await?;
    let restored = restored
        .into_iter()
        .filter(|line| applied.applied.contains(&line.inventory_id))
        .collect::<Vec<GiftLine>>();

    let now = Utc::now();
    let mut removed = 0;
    let guest = match state.guests.find_by_id(&record.guest_id).await.map_err(AppError::Internal)? {
        Some(mut guest) => {
            removed = match mode {
                Reversal::Undo => {
                    locate_projection_entry(&guest.event_checkins, &record, state.projection_match_tolerance())
                        .and_then(|found| guest.remove_entry(found.index(), now))
                        .map(|_| 1)
                        .unwrap_or(0)
                }
                Reversal::Delete => guest.remove_event_entries(&record.event_id, now),
            };
            if removed > 0 {
                state.guests.save(&guest).await.map_err(AppError::Internal)?;
            } else {
                warn!(
                    "{}: no projection entry for checkin={} guest={}",
                    mode.action().as_str(),
                    record.id,
                    record.guest_id
                );
            }
            Some(guest)
        }
        None => {
            warn!("{}: guest {} missing for checkin={}", mode.action().as_str(), record.guest_id, record.id);
            None
        }
    };

    activity::emit(
        state,
        ActivityLogEntry::new(
            record.event_id.clone(),
            mode.activity(),
            actor.id.clone(),
            json!({
                "checkinId": record.id,
                "guestId": record.guest_id,
                "guestName": guest.as_ref().map(|guest| guest.full_name()),
                "restoredGifts": restored,
                "reason": reason,
            }),
        ),
    )
    .await;

    state.checkins.delete(&record.id).await.map_err(AppError::Internal)?;
    ledger::recompute_touched(state, applied.applied.iter(), &actor.id).await;

    match state.events.find_by_id(&record.event_id).await {
        Ok(Some(event)) => activity::notify_live(state, &event).await,
        Ok(None) => {}
        Err(err) => warn!("{}: event lookup for live update failed: {}", mode.action().as_str(), err),
    }
    info!(
        "check-in reversed: mode={} checkin={} guest={} event={} restored_lines={}",
        mode.action().as_str(),
        record.id,
        record.guest_id,
        record.event_id,
        restored.len()
    );

    Ok(ReversalOutcome {
        checkin_id: record.id,
        guest_id: record.guest_id,
        event_id: record.event_id,
        restored,
        projection_entries_removed: removed,
        guest: guest.map(|guest| guest.view()),
    })
}
