use tracing::warn;

use giftdesk_domain::{ActivityLogEntry, Event, LiveUpdate, LiveUpdateChannel};

use crate::AppState;

/// Appends an audit entry. A failing feed never fails the operation.
pub async fn emit(state: &AppState, entry: ActivityLogEntry) {
    let kind = entry.kind;
    let event_id = entry.event_id.clone();
    if let Err(err) = state.activity_feed.append(entry).await {
        warn!(
            "activity log append failed: kind={} event={} err={}",
            kind.as_str(),
            event_id,
            err
        );
    }
}

/// Tells dashboards of `event` (and of its pool owner) to refresh.
pub async fn notify_live(state: &AppState, event: &Event) {
    let mut targets = vec![event.id.clone()];
    if event.pool_id() != &event.id {
        targets.push(event.pool_id().clone());
    }
    for event_id in targets {
        if let Err(err) = state
            .live_updates
            .notify(LiveUpdate::checkin_update(event_id.clone()))
            .await
        {
            warn!("live update notify failed: event={} err={}", event_id, err);
        }
    }
}
