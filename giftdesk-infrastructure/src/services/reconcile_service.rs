use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use giftdesk_application::{ledger, AppState};
use giftdesk_domain::{ActorId, EventId};

use crate::repositories::MemoryStore;

/// Recounts every pool on a fixed interval. Zero disables the loop.
pub async fn schedule_reconciliation(state: AppState, store: Arc<MemoryStore>) {
    let seconds = state.config.reconcile_interval_seconds;
    if seconds == 0 {
        info!("periodic reconciliation disabled");
        return;
    }
    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));
    // first tick fires immediately; startup state was just loaded
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let corrected = reconcile_all_pools(&state, &store).await;
        if corrected > 0 {
            warn!("periodic reconciliation corrected {} item(s)", corrected);
        }
    }
}

/// One pass over every main event's pool. Returns how many items drifted.
pub async fn reconcile_all_pools(state: &AppState, store: &MemoryStore) -> usize {
    let actor = ActorId::from(ledger::SYSTEM_ACTOR);
    let pools = store
        .list_events()
        .await
        .into_iter()
        .filter(|event| event.pool_id() == &event.id)
        .map(|event| event.id)
        .collect::<Vec<EventId>>();

    let mut corrected = 0;
    for pool_id in pools {
        match ledger::reconcile_pool(state, &pool_id, &actor).await {
            Ok(outcomes) => corrected += outcomes.len(),
            Err(err) => error!("reconciliation failed: pool={} err={}", pool_id, err),
        }
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdesk_application::{LiveUpdateHub, Metrics};
    use giftdesk_domain::{
        CountChange, Event, InventoryAction, InventoryAdjustment, InventoryItem,
        InventoryRepository, RuntimeConfig,
    };

    use crate::services::MemoryActivityFeed;

    #[tokio::test]
    async fn pass_repairs_only_drifted_items() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_event(Event::main("m", "Main")).await;
        store.upsert_event(Event::secondary("s", "Side", "m")).await;
        let drifted = InventoryItem::new("m", "tote", "canvas", 8);
        let drifted_id = drifted.id.clone();
        store.insert(drifted).await.expect("seed");
        store
            .insert(InventoryItem::new("m", "hat", "cap", 4))
            .await
            .expect("seed");
        store
            .adjust(
                &drifted_id,
                InventoryAdjustment {
                    change: CountChange::SetTo(3),
                    action: InventoryAction::ManualSet,
                    performed_by: ActorId::from("test"),
                    reason: None,
                    at: chrono::Utc::now(),
                },
            )
            .await
            .expect("corrupt");

        let state = AppState {
            config: RuntimeConfig::default(),
            events: store.clone(),
            guests: store.clone(),
            inventory: store.clone(),
            checkins: store.clone(),
            activity_feed: Arc::new(MemoryActivityFeed::default()),
            live_updates: Arc::new(LiveUpdateHub::default()),
            metrics: Arc::new(Metrics::default()),
        };

        assert_eq!(reconcile_all_pools(&state, &store).await, 1);
        assert_eq!(state.metrics.drift_corrections(), 1);
        assert_eq!(reconcile_all_pools(&state, &store).await, 0);
    }
}
