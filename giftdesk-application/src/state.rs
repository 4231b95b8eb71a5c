use std::sync::Arc;

use giftdesk_domain::ports::{
    ActivityFeed, CheckinRepository, EventDirectory, GuestRepository, InventoryRepository,
};
use giftdesk_domain::RuntimeConfig;

use crate::{LiveUpdateHub, Metrics};

const MAX_TOLERANCE_SECONDS: u64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub events: Arc<dyn EventDirectory>,
    pub guests: Arc<dyn GuestRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub checkins: Arc<dyn CheckinRepository>,
    pub activity_feed: Arc<dyn ActivityFeed>,
    pub live_updates: Arc<LiveUpdateHub>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Window for matching projection entries that carry no record id.
    pub fn projection_match_tolerance(&self) -> chrono::Duration {
        let seconds = self.config.projection_match_tolerance_seconds.min(MAX_TOLERANCE_SECONDS);
        chrono::Duration::seconds(seconds as i64)
    }
}
