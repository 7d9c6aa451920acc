//! Stock-status classification.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Stock health category derived from a product's levels. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Adequate,
    Overstocked,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::Critical,
        StockStatus::Low,
        StockStatus::Adequate,
        StockStatus::Overstocked,
    ];

    /// User-facing badge text.
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::Critical => "Out of Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Adequate => "In Stock",
            StockStatus::Overstocked => "Overstocked",
        }
    }

    /// Adequate and overstocked products both count as "in stock".
    pub fn is_in_stock(self) -> bool {
        matches!(self, StockStatus::Adequate | StockStatus::Overstocked)
    }

    /// Statuses that belong on the low-stock alert list.
    pub fn needs_attention(self) -> bool {
        matches!(self, StockStatus::Critical | StockStatus::Low)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Adequate => "adequate",
            StockStatus::Overstocked => "overstocked",
        })
    }
}

/// Classify a product. Total and pure; reads only the three stock levels.
pub fn classify(product: &Product) -> StockStatus {
    classify_levels(
        product.quantity(),
        product.reorder_level(),
        product.max_stock(),
    )
}

/// Decision table behind [`classify`]. First match wins:
///
/// 1. `quantity <= 0` is critical.
/// 2. `quantity <= reorder_level` is low (boundary included).
/// 3. a strictly positive `max_stock` that `quantity` exceeds is overstocked.
/// 4. anything else is adequate.
///
/// A `max_stock` of zero disables the ceiling, same as `None`. When
/// `reorder_level` exceeds `max_stock` the ranges overlap and rule 2 wins.
pub fn classify_levels(quantity: i64, reorder_level: i64, max_stock: Option<i64>) -> StockStatus {
    if quantity <= 0 {
        return StockStatus::Critical;
    }
    if quantity <= reorder_level {
        return StockStatus::Low;
    }
    match max_stock {
        Some(ceiling) if ceiling > 0 && quantity > ceiling => StockStatus::Overstocked,
        _ => StockStatus::Adequate,
    }
}
