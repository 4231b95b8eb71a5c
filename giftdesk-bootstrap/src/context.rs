use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use giftdesk_application::{AppState, LiveUpdateHub, Metrics};
use giftdesk_infrastructure::{
    AppConfig, MemoryActivityFeed, MemoryStore, SnapshotFileRepository, StoreSnapshot,
};

pub struct AppContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub activity: Arc<MemoryActivityFeed>,
    pub snapshots: Option<SnapshotFileRepository>,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let snapshots = config
            .snapshot_path
            .as_ref()
            .map(|path| SnapshotFileRepository::new(path.clone()));
        let mut snapshot = match &snapshots {
            Some(repo) => repo.load().await?,
            None => StoreSnapshot::default(),
        };
        info!(
            "state loaded: events={} guests={} items={} checkins={}",
            snapshot.events.len(),
            snapshot.guests.len(),
            snapshot.inventory.len(),
            snapshot.checkins.len()
        );

        let activity = Arc::new(MemoryActivityFeed::with_entries(
            config.activity_log_capacity,
            std::mem::take(&mut snapshot.activity),
        ));
        let store = Arc::new(MemoryStore::from_snapshot(snapshot)?);

        let state = AppState {
            config: runtime_config,
            events: store.clone(),
            guests: store.clone(),
            inventory: store.clone(),
            checkins: store.clone(),
            activity_feed: activity.clone(),
            live_updates: Arc::new(LiveUpdateHub::new(config.live_update_buffer)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self {
            state,
            store,
            activity,
            snapshots,
        })
    }

    /// Writes the store and activity log back to the snapshot file, if any.
    pub async fn persist(&self) -> Result<()> {
        let Some(repo) = &self.snapshots else {
            return Ok(());
        };
        let mut snapshot = self.store.snapshot().await;
        snapshot.activity = self.activity.entries().await;
        repo.save(&snapshot).await?;
        info!("state saved to {}", repo.path());
        Ok(())
    }
}
