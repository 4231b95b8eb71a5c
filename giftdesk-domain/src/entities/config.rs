// Runtime configuration shared by all layers

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROJECTION_MATCH_TOLERANCE_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub snapshot_path: Option<String>,
    pub reconcile_interval_seconds: u64,
    pub projection_match_tolerance_seconds: u64,
    pub live_update_buffer: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            snapshot_path: None,
            reconcile_interval_seconds: 0,
            projection_match_tolerance_seconds: DEFAULT_PROJECTION_MATCH_TOLERANCE_SECONDS,
            live_update_buffer: 64,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
