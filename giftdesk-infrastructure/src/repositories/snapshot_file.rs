use std::path::Path;

use anyhow::Result;
use tokio::fs;
use tracing::info;

use crate::repositories::StoreSnapshot;
use crate::utils::ensure_parent_dir;

/// JSON file holding a [`StoreSnapshot`].
pub struct SnapshotFileRepository {
    path: String,
}

impl SnapshotFileRepository {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Missing file means an empty store.
    pub async fn load(&self) -> Result<StoreSnapshot> {
        if !Path::new(&self.path).exists() {
            info!("snapshot {} not found, starting empty", self.path);
            return Ok(StoreSnapshot::default());
        }
        let content = fs::read_to_string(&self.path).await?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Writes through a temp file so a crash never leaves half a snapshot.
    pub async fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        ensure_parent_dir(&self.path).await?;
        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = format!("{}.tmp", self.path);
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
