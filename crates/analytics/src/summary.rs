//! Collection-level dashboard statistics.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use stockview_catalog::{Product, StockStatus, classify};

/// Dashboard statistics for one product snapshot.
///
/// Monetary totals are exact decimal sums; only `stock_health_percent` is
/// rounded. A total that does not fit its type is clamped to the type's
/// bound and `totals_saturated` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AnalyticsSummary {
    pub total_products: usize,
    pub total_units: i64,
    /// Σ price × quantity.
    pub inventory_value: Decimal,
    /// Σ purchase_price × quantity (absent purchase price counts as zero).
    pub inventory_cost: Decimal,
    /// `inventory_value - inventory_cost`.
    pub potential_profit: Decimal,
    /// Distinct non-empty categories.
    pub categories: usize,
    pub critical: usize,
    pub low: usize,
    pub adequate: usize,
    pub overstocked: usize,
    /// Adequate + overstocked.
    pub in_stock: usize,
    /// `round(in_stock / total_products * 100)`, 0 for an empty collection.
    pub stock_health_percent: u32,
    /// At least one of `total_units`, `inventory_value`, `inventory_cost` or
    /// `potential_profit` overflowed and holds a clamped value.
    pub totals_saturated: bool,
}

impl AnalyticsSummary {
    pub fn count(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::Critical => self.critical,
            StockStatus::Low => self.low,
            StockStatus::Adequate => self.adequate,
            StockStatus::Overstocked => self.overstocked,
        }
    }
}

/// Recompute every statistic from scratch. Pure; empty input yields the
/// all-zero summary.
pub fn summarize(products: &[Product]) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary {
        total_products: products.len(),
        ..AnalyticsSummary::default()
    };
    let mut categories: HashSet<&str> = HashSet::new();

    for product in products {
        let quantity = Decimal::from(product.quantity());
        let value = clamp(
            product.price().checked_mul(quantity),
            || product.price().saturating_mul(quantity),
            &mut summary.totals_saturated,
        );
        let cost_price = product.purchase_price().unwrap_or(Decimal::ZERO);
        let cost = clamp(
            cost_price.checked_mul(quantity),
            || cost_price.saturating_mul(quantity),
            &mut summary.totals_saturated,
        );

        summary.total_units = clamp(
            summary.total_units.checked_add(product.quantity()),
            || summary.total_units.saturating_add(product.quantity()),
            &mut summary.totals_saturated,
        );
        summary.inventory_value = clamp(
            summary.inventory_value.checked_add(value),
            || summary.inventory_value.saturating_add(value),
            &mut summary.totals_saturated,
        );
        summary.inventory_cost = clamp(
            summary.inventory_cost.checked_add(cost),
            || summary.inventory_cost.saturating_add(cost),
            &mut summary.totals_saturated,
        );

        if let Some(category) = product.category().filter(|c| !c.is_empty()) {
            categories.insert(category);
        }

        match classify(product) {
            StockStatus::Critical => summary.critical += 1,
            StockStatus::Low => summary.low += 1,
            StockStatus::Adequate => summary.adequate += 1,
            StockStatus::Overstocked => summary.overstocked += 1,
        }
    }

    summary.potential_profit = clamp(
        summary.inventory_value.checked_sub(summary.inventory_cost),
        || summary.inventory_value.saturating_sub(summary.inventory_cost),
        &mut summary.totals_saturated,
    );
    if summary.totals_saturated {
        warn!(
            products = summary.total_products,
            "inventory totals overflowed and were clamped"
        );
    }
    summary.categories = categories.len();
    summary.in_stock = summary.adequate + summary.overstocked;
    summary.stock_health_percent = health_percent(summary.in_stock, summary.total_products);

    summary
}

/// Checked result, or the saturated fallback with the overflow recorded.
fn clamp<T>(checked: Option<T>, saturated: impl FnOnce() -> T, overflowed: &mut bool) -> T {
    checked.unwrap_or_else(|| {
        *overflowed = true;
        saturated()
    })
}

/// Round-half-up percentage in integer arithmetic.
fn health_percent(in_stock: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (in_stock, total) = (in_stock as u128, total as u128);
    ((in_stock * 200 + total) / (total * 2)) as u32
}
