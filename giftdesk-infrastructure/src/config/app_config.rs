use std::env;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use giftdesk_domain::{RuntimeConfig, DEFAULT_PROJECTION_MATCH_TOLERANCE_SECONDS};

use crate::config::validation::{validate_bind_addr, validate_positive};
use crate::utils::resolve_path;

pub const CONFIG_ENV: &str = "GIFTDESK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub snapshot_path: Option<String>,
    pub reconcile_interval_seconds: u64,
    pub projection_match_tolerance_seconds: u64,
    pub live_update_buffer: usize,
    pub activity_log_capacity: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            snapshot_path: Some("./giftdesk_state.json".to_string()),
            reconcile_interval_seconds: 300,
            projection_match_tolerance_seconds: DEFAULT_PROJECTION_MATCH_TOLERANCE_SECONDS,
            live_update_buffer: 64,
            activity_log_capacity: 50_000,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    /// Reads `GIFTDESK_CONFIG` (or `./config.toml`).
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(path) = &self.snapshot_path {
            if path.trim().is_empty() {
                self.snapshot_path = None;
            }
        }
        if self.live_update_buffer == 0 {
            self.live_update_buffer = 1;
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(path) = &self.snapshot_path {
            self.snapshot_path = Some(resolve_path(base, path));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        validate_positive("max_body_bytes", self.max_body_bytes)?;
        validate_positive("request_timeout_seconds", self.request_timeout_seconds)?;
        validate_positive(
            "projection_match_tolerance_seconds",
            self.projection_match_tolerance_seconds,
        )?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            snapshot_path: self.snapshot_path.clone(),
            reconcile_interval_seconds: self.reconcile_interval_seconds,
            projection_match_tolerance_seconds: self.projection_match_tolerance_seconds,
            live_update_buffer: self.live_update_buffer,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("GIFTDESK_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("GIFTDESK_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("GIFTDESK_SNAPSHOT_PATH") {
            self.snapshot_path = Some(value);
        }
        if let Ok(value) = env::var("GIFTDESK_RECONCILE_INTERVAL_SECONDS") {
            self.reconcile_interval_seconds = value.parse().unwrap_or(self.reconcile_interval_seconds);
        }
        if let Ok(value) = env::var("GIFTDESK_PROJECTION_MATCH_TOLERANCE_SECONDS") {
            self.projection_match_tolerance_seconds =
                value.parse().unwrap_or(self.projection_match_tolerance_seconds);
        }
        if let Ok(value) = env::var("GIFTDESK_LIVE_UPDATE_BUFFER") {
            self.live_update_buffer = value.parse().unwrap_or(self.live_update_buffer);
        }
        if let Ok(value) = env::var("GIFTDESK_ACTIVITY_LOG_CAPACITY") {
            self.activity_log_capacity = value.parse().unwrap_or(self.activity_log_capacity);
        }
        if let Ok(value) = env::var("GIFTDESK_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("GIFTDESK_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("bind_addr = \"0.0.0.0:9000\"\napi_token = \" \"\n")
            .expect("parse");
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.projection_match_tolerance_seconds, 60);
        let mut config = config;
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_bind_addr_fails_validation() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn relative_snapshot_path_resolves_against_config_dir() {
        let mut config = AppConfig {
            snapshot_path: Some("data/state.json".to_string()),
            ..AppConfig::default()
        };
        config.resolve_paths(Some(Path::new("/srv/giftdesk")));
        assert_eq!(config.snapshot_path.as_deref(), Some("/srv/giftdesk/data/state.json"));
    }
}
