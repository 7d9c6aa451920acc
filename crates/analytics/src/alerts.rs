//! Lowest-stock alert list and low-stock notification notices.

use serde::Serialize;

use stockview_catalog::{Product, StockStatus, classify};
use stockview_core::{NotificationSettings, ProductId};

/// Number of entries on the dashboard alert list.
pub const DEFAULT_ALERT_LIMIT: usize = 5;

/// Low and critical products, lowest quantity first.
///
/// The sort is stable, so equal quantities keep their collection order.
pub fn low_stock_alerts(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut alerts: Vec<&Product> = products
        .iter()
        .filter(|p| classify(p).needs_attention())
        .collect();
    alerts.sort_by_key(|p| p.quantity());
    alerts.truncate(limit);
    alerts
}

/// A product at or below the user's notification threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockNotice {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub status: StockStatus,
}

/// Notices for every product with `quantity <= low_stock_threshold`, in
/// collection order. Empty when notifications are disabled.
pub fn low_stock_notices(products: &[Product], settings: &NotificationSettings) -> Vec<LowStockNotice> {
    if !settings.notifications_enabled() {
        return Vec::new();
    }
    let threshold = i64::from(settings.low_stock_threshold());

    products
        .iter()
        .filter(|p| p.quantity() <= threshold)
        .map(|p| LowStockNotice {
            product_id: p.id_typed().clone(),
            name: p.name().to_string(),
            quantity: p.quantity(),
            status: classify(p),
        })
        .collect()
}
