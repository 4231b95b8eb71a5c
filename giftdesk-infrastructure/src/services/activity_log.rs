use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use giftdesk_domain::{ActivityFeed, ActivityLogEntry, EventId};

/// Append-only activity log kept in memory. Oldest entries fall off once
/// `capacity` is reached; zero means unbounded.
pub struct MemoryActivityFeed {
    capacity: usize,
    entries: RwLock<VecDeque<ActivityLogEntry>>,
}

impl MemoryActivityFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::new()),
        }
    }

    pub fn with_entries(capacity: usize, entries: Vec<ActivityLogEntry>) -> Self {
        let mut entries = VecDeque::from(entries);
        if capacity > 0 {
            while entries.len() > capacity {
                entries.pop_front();
            }
        }
        Self {
            capacity,
            entries: RwLock::new(entries),
        }
    }

    pub async fn entries(&self) -> Vec<ActivityLogEntry> {
        self.entries.read().await.iter().cloned().collect()
    }

    /// Newest first.
    pub async fn recent_for_event(&self, event_id: &EventId, limit: usize) -> Vec<ActivityLogEntry> {
        self.entries
            .read()
            .await
            .iter()
            .rev()
            .filter(|entry| &entry.event_id == event_id)
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for MemoryActivityFeed {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl ActivityFeed for MemoryActivityFeed {
    async fn append(&self, entry: ActivityLogEntry) -> anyhow::Result<()> {
        let mut entries = self.entries.write().await;
        entries.push_back(entry);
        if self.capacity > 0 && entries.len() > self.capacity {
            entries.pop_front();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdesk_domain::{ActivityKind, ActorId};

    fn entry(event: &str) -> ActivityLogEntry {
        ActivityLogEntry::new(
            EventId::from(event),
            ActivityKind::Checkin,
            ActorId::from("staff"),
            serde_json::json!({}),
        )
    }

    #[tokio::test]
    async fn bounded_feed_drops_oldest() {
        let feed = MemoryActivityFeed::new(2);
        let first = entry("a");
        let first_id = first.id.clone();
        feed.append(first).await.expect("append");
        feed.append(entry("b")).await.expect("append");
        feed.append(entry("c")).await.expect("append");
        let entries = feed.entries().await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.id != first_id));
    }

    #[tokio::test]
    async fn recent_for_event_filters_and_reverses() {
        let feed = MemoryActivityFeed::default();
        feed.append(entry("a")).await.expect("append");
        feed.append(entry("b")).await.expect("append");
        let last = entry("a");
        let last_id = last.id.clone();
        feed.append(last).await.expect("append");
        let recent = feed.recent_for_event(&EventId::from("a"), 5).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, last_id);
    }
}
