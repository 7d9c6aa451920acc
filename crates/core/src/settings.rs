//! Notification settings injected by the hosting application.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Default quantity at or below which a product triggers a low-stock notice.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Accepted range for [`NotificationSettings::low_stock_threshold`].
pub const LOW_STOCK_THRESHOLD_RANGE: core::ops::RangeInclusive<u32> = 1..=50;

/// User-owned notification preferences.
///
/// The threshold is a display/notification concern and has nothing to do with
/// a product's `reorder_level`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    notifications_enabled: bool,
    low_stock_threshold: u32,
}

impl NotificationSettings {
    pub fn new(notifications_enabled: bool, low_stock_threshold: u32) -> DomainResult<Self> {
        if !LOW_STOCK_THRESHOLD_RANGE.contains(&low_stock_threshold) {
            return Err(DomainError::validation(format!(
                "low_stock_threshold must be within {}..={} (got {low_stock_threshold})",
                LOW_STOCK_THRESHOLD_RANGE.start(),
                LOW_STOCK_THRESHOLD_RANGE.end(),
            )));
        }
        Ok(Self {
            notifications_enabled,
            low_stock_threshold,
        })
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
