use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use giftdesk_domain::{EventId, LiveUpdate, LiveUpdateChannel};

/// Per-event broadcast of dashboard refresh signals.
pub struct LiveUpdateHub {
    buffer: usize,
    channels: RwLock<HashMap<EventId, broadcast::Sender<LiveUpdate>>>,
}

impl LiveUpdateHub {
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer: buffer.max(1),
            channels: RwLock::new(HashMap::new()),
        }
    }

    pub async fn subscribe(&self, event_id: &EventId) -> broadcast::Receiver<LiveUpdate> {
        let mut channels = self.channels.write().await;
        channels
            .entry(event_id.clone())
            .or_insert_with(|| {
                let (tx, _rx) = broadcast::channel(self.buffer);
                tx
            })
            .subscribe()
    }

    pub async fn subscriber_count(&self, event_id: &EventId) -> usize {
        self.channels
            .read()
            .await
            .get(event_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for LiveUpdateHub {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl LiveUpdateChannel for LiveUpdateHub {
    async fn notify(&self, update: LiveUpdate) -> anyhow::Result<()> {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(&update.event_id) {
            // no receivers is not an error
            let _ = tx.send(update);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_hear_their_event() {
        let hub = LiveUpdateHub::new(8);
        let mut main = hub.subscribe(&EventId::from("m")).await;
        let mut side = hub.subscribe(&EventId::from("s")).await;

        hub.notify(LiveUpdate::checkin_update(EventId::from("m")))
            .await
            .expect("notify");

        let update = main.recv().await.expect("main update");
        assert_eq!(update.kind, giftdesk_domain::CHECKIN_UPDATE);
        assert!(side.try_recv().is_err());
    }

    #[tokio::test]
    async fn notify_without_subscribers_succeeds() {
        let hub = LiveUpdateHub::default();
        assert!(hub
            .notify(LiveUpdate::checkin_update(EventId::from("nobody")))
            .await
            .is_ok());
        assert_eq!(hub.subscriber_count(&EventId::from("nobody")).await, 0);
    }
}
