use async_trait::async_trait;

use crate::entities::{ActivityLogEntry, LiveUpdate};

/// One-way audit sink. The engine never reads entries back.
#[async_trait]
pub trait ActivityFeed: Send + Sync {
    async fn append(&self, entry: ActivityLogEntry) -> anyhow::Result<()>;
}

/// Best-effort broadcast to dashboards.
#[async_trait]
pub trait LiveUpdateChannel: Send + Sync {
    async fn notify(&self, update: LiveUpdate) -> anyhow::Result<()>;
}
