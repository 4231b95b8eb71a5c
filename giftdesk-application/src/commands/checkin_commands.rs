use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use giftdesk_domain::{
    accumulate, normalize_optional_text, referenced_ids, select_gifts, ActivityKind,
    ActivityLogEntry, Actor, BatchCheckinOutcome, CheckinFlow, CheckinId, CheckinOutcome,
    CheckinRecord, CheckinRequest, CommittedCheckin, Event, EventCheckinResult, EventId, GiftLine,
    GiftSelection, Guest, GuestId, InventoryAction, MultiCheckinRequest, RejectReason,
    SelectedGift, SkippedGift,
};

use super::load_inventory;
use crate::{activity, ledger, AppError, AppState};

/// Checks a guest into one event, handing out the selected gifts.
pub async fn check_in(
    state: &AppState,
    actor: &Actor,
    request: CheckinRequest,
) -> Result<CheckinOutcome, AppError> {
    let mut guest = load_guest(state, &request.guest_id).await?;
    let event = state
        .events
        .find_by_id(&request.event_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("event '{}'", request.event_id)))?;

    let mut flow = CheckinFlow::new(guest.id.clone(), event.id.clone());
    let existing = state
        .checkins
        .find_by_guest_event(&guest.id, &event.id)
        .await
        .map_err(AppError::Internal)?;
    if already_checked_in(&guest, &event.id, existing.as_ref()) {
        flow.reject(RejectReason::AlreadyCheckedIn)?;
        state.metrics.record_rejection();
        info!("check-in rejected: guest={} event={} already checked in", guest.id, event.id);
        return Ok(CheckinOutcome::Rejected {
            guest_id: guest.id,
            event_id: event.id,
            reason: RejectReason::AlreadyCheckedIn,
        });
    }

    let items = load_inventory(state, referenced_ids(&request.selected_gifts)).await?;
    let mut selection = select_gifts(&request.selected_gifts, &event, &items);
    flow.validate()?;

    let mut deltas = BTreeMap::new();
    accumulate(&mut deltas, &selection.lines, -1);
    let applied = ledger::apply_deltas(state, &deltas, InventoryAction::Checkin, &actor.id, None).await?;
    selection.drop_missing(&request.selected_gifts, &applied.missing);

    let now = Utc::now();
    let reused = existing.is_some();
    let record = build_record(existing, &guest, &event, actor, &selection.lines, request.notes.clone(), now);
    state.checkins.save(&record).await.map_err(AppError::Internal)?;

    let preferences = request
        .pickup_field_preferences
        .clone()
        .or_else(|| Some(event.pickup_field_preferences.clone()).filter(|value| !value.is_null()));
    guest.project_checkin(&record, preferences, now);
    state.guests.save(&guest).await.map_err(AppError::Internal)?;

    ledger::recompute_touched(state, applied.applied.iter(), &actor.id).await;
    flow.commit()?;

    emit_checkin(state, actor, &guest, &event, &record, &selection.skipped).await;
    activity::notify_live(state, &event).await;
    state.metrics.record_checkin();
    info!(
        "check-in committed: guest={} event={} checkin={} gifts={} skipped={} reused={}",
        guest.id,
        event.id,
        record.id,
        record.gifts_distributed.len(),
        selection.skipped.len(),
        reused
    );

    Ok(CheckinOutcome::Committed(Box::new(CommittedCheckin {
        checkin: record,
        guest: guest.view(),
        skipped: selection.skipped,
        reused,
    })))
}

struct PendingEvent {
    slot: usize,
    flow: CheckinFlow,
    event: Event,
    existing: Option<CheckinRecord>,
    selected: Vec<SelectedGift>,
    selection: GiftSelection,
}

/// Checks a guest into several events at once. Each event succeeds or fails
/// on its own; deltas for the same item are summed and applied once.
pub async fn check_in_many(
    state: &AppState,
    actor: &Actor,
    request: MultiCheckinRequest,
) -> Result<BatchCheckinOutcome, AppError> {
    let mut guest = load_guest(state, &request.guest_id).await?;
    if request.checkins.is_empty() {
        return Err(AppError::BadRequest("checkins must not be empty".to_string()));
    }

    let all_selected = request
        .checkins
        .iter()
        .flat_map(|selection| selection.selected_gifts.iter().cloned())
        .collect::<Vec<_>>();
    let items = load_inventory(state, referenced_ids(&all_selected)).await?;

    let mut results: Vec<Option<EventCheckinResult>> = Vec::with_capacity(request.checkins.len());
    let mut pending = Vec::new();
    let mut seen = BTreeSet::new();
    for target in request.checkins {
        let slot = results.len();
        let mut flow = CheckinFlow::new(guest.id.clone(), target.event_id.clone());
        let reason = match resolve_target(state, &guest, &target.event_id, &mut seen).await? {
            Ok((event, existing)) => {
                let selection = select_gifts(&target.selected_gifts, &event, &items);
                flow.validate()?;
                results.push(None);
                pending.push(PendingEvent {
                    slot,
                    flow,
                    event,
                    existing,
                    selected: target.selected_gifts,
                    selection,
                });
                continue;
            }
            Err(reason) => reason,
        };
        flow.reject(reason)?;
        state.metrics.record_rejection();
        results.push(Some(rejected(&target.event_id, reason)));
    }

    let mut deltas = BTreeMap::new();
    for entry in &pending {
        accumulate(&mut deltas, &entry.selection.lines, -1);
    }
    let applied = ledger::apply_deltas(
        state,
        &deltas,
        InventoryAction::Checkin,
        &actor.id,
        Some(format!("batch of {} events", pending.len())),
    )
    .await?;

    let now = Utc::now();
    let mut committed = Vec::with_capacity(pending.len());
    for mut entry in pending {
        entry.selection.drop_missing(&entry.selected, &applied.missing);
        let record = build_record(
            entry.existing.take(),
            &guest,
            &entry.event,
            actor,
            &entry.selection.lines,
            request.notes.clone(),
            now,
        );
        state.checkins.save(&record).await.map_err(AppError::Internal)?;
        let preferences = Some(entry.event.pickup_field_preferences.clone()).filter(|value| !value.is_null());
        guest.project_checkin(&record, preferences, now);
        entry.flow.commit()?;
        committed.push((entry, record));
    }
    state.guests.save(&guest).await.map_err(AppError::Internal)?;

    ledger::recompute_touched(state, applied.applied.iter(), &actor.id).await;

    for (entry, record) in committed {
        emit_checkin(state, actor, &guest, &entry.event, &record, &entry.selection.skipped).await;
        activity::notify_live(state, &entry.event).await;
        state.metrics.record_checkin();
        results[entry.slot] = Some(EventCheckinResult {
            event_id: entry.event.id.clone(),
            success: true,
            message: format!("checked in with {} gift line(s)", record.gifts_distributed.len()),
            checkin_id: Some(record.id.clone()),
            skipped: entry.selection.skipped,
        });
    }

    let outcome = BatchCheckinOutcome {
        results: results.into_iter().flatten().collect(),
        guest: guest.view(),
    };
    info!(
        "batch check-in: guest={} committed={} total={}",
        outcome.guest.guest.id,
        outcome.committed_count(),
        outcome.results.len()
    );
    Ok(outcome)
}

/// Loads one batch target, or says why it cannot be checked into.
async fn resolve_target(
    state: &AppState,
    guest: &Guest,
    event_id: &EventId,
    seen: &mut BTreeSet<EventId>,
) -> Result<Result<(Event, Option<CheckinRecord>), RejectReason>, AppError> {
    if !seen.insert(event_id.clone()) {
        return Ok(Err(RejectReason::DuplicateEventInBatch));
    }
    let Some(event) = state.events.find_by_id(event_id).await.map_err(AppError::Internal)? else {
        return Ok(Err(RejectReason::EventNotFound));
    };
    let existing = state
        .checkins
        .find_by_guest_event(&guest.id, &event.id)
        .await
        .map_err(AppError::Internal)?;
    if already_checked_in(guest, &event.id, existing.as_ref()) {
        return Ok(Err(RejectReason::AlreadyCheckedIn));
    }
    Ok(Ok((event, existing)))
}

async fn load_guest(state: &AppState, guest_id: &GuestId) -> Result<Guest, AppError> {
    state
        .guests
        .find_by_id(guest_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("guest '{}'", guest_id)))
}

/// The projection is the primary guard; a record that already holds gifts
/// blocks too, in case the projection lags behind.
fn already_checked_in(guest: &Guest, event_id: &EventId, existing: Option<&CheckinRecord>) -> bool {
    guest.is_checked_into(event_id) || existing.map(CheckinRecord::has_gifts).unwrap_or(false)
}

fn build_record(
    existing: Option<CheckinRecord>,
    guest: &Guest,
    event: &Event,
    actor: &Actor,
    lines: &[GiftLine],
    notes: Option<String>,
    now: DateTime<Utc>,
) -> CheckinRecord {
    let notes = normalize_optional_text(notes);
    match existing {
        Some(mut record) => {
            record.gifts_distributed = lines.to_vec();
            record.checked_in_by = actor.id.clone();
            if notes.is_some() {
                record.notes = notes;
            }
            record.updated_at = now;
            record
        }
        None => CheckinRecord {
            id: CheckinId::generate(),
            guest_id: guest.id.clone(),
            event_id: event.id.clone(),
            gifts_distributed: lines.to_vec(),
            checked_in_by: actor.id.clone(),
            notes,
            created_at: now,
            updated_at: now,
        },
    }
}

fn rejected(event_id: &EventId, reason: RejectReason) -> EventCheckinResult {
    EventCheckinResult {
        event_id: event_id.clone(),
        success: false,
        message: reason.message().to_string(),
        checkin_id: None,
        skipped: Vec::new(),
    }
}

async fn emit_checkin(
    state: &AppState,
    actor: &Actor,
    guest: &Guest,
    event: &Event,
    record: &CheckinRecord,
    skipped: &[SkippedGift],
) {
    activity::emit(
        state,
        ActivityLogEntry::new(
            event.id.clone(),
            ActivityKind::Checkin,
            actor.id.clone(),
            json!({
                "checkinId": record.id,
                "guestId": guest.id,
                "guestName": guest.full_name(),
                "eventName": event.name,
                "gifts": record.gifts_distributed,
                "skipped": skipped,
            }),
        ),
    )
    .await;
}
