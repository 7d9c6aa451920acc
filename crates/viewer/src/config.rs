//! Viewer configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};

use stockview_core::{DEFAULT_LOW_STOCK_THRESHOLD, NotificationSettings};
use stockview_observability::LogFormat;

pub const SNAPSHOT_PATH_VAR: &str = "STOCKVIEW_SNAPSHOT_PATH";
pub const POLL_INTERVAL_VAR: &str = "STOCKVIEW_POLL_INTERVAL_MS";
pub const NOTIFICATIONS_VAR: &str = "STOCKVIEW_NOTIFICATIONS";
pub const THRESHOLD_VAR: &str = "STOCKVIEW_LOW_STOCK_THRESHOLD";
pub const LOG_FORMAT_VAR: &str = "STOCKVIEW_LOG_FORMAT";

const DEFAULT_SNAPSHOT_PATH: &str = "products.json";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub snapshot_path: PathBuf,
    pub poll_interval: Duration,
    pub settings: NotificationSettings,
    pub log_format: LogFormat,
}

impl ViewerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let snapshot_path = lookup(SNAPSHOT_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        let poll_ms = match lookup(POLL_INTERVAL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{POLL_INTERVAL_VAR} must be an integer, got {raw:?}"))?,
            None => DEFAULT_POLL_INTERVAL_MS,
        };
        if poll_ms == 0 {
            bail!("{POLL_INTERVAL_VAR} must be greater than zero");
        }

        let notifications_enabled = match lookup(NOTIFICATIONS_VAR) {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("{NOTIFICATIONS_VAR} must be true or false, got {raw:?}"))?,
            None => false,
        };

        let threshold = match lookup(THRESHOLD_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{THRESHOLD_VAR} must be an integer, got {raw:?}"))?,
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };
        let settings = NotificationSettings::new(notifications_enabled, threshold)
            .with_context(|| format!("invalid {THRESHOLD_VAR}"))?;

        let log_format = log_format_from_lookup(&lookup);

        Ok(Self {
            snapshot_path,
            poll_interval: Duration::from_millis(poll_ms),
            settings,
            log_format,
        })
    }
}

/// Log format alone, so logging can start before the rest of the
/// configuration is validated.
pub fn log_format_from_env() -> LogFormat {
    log_format_from_lookup(|key| std::env::var(key).ok())
}

pub fn log_format_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LogFormat {
    lookup(LOG_FORMAT_VAR)
        .map(|v| LogFormat::from_name(&v))
        .unwrap_or_default()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
