//! `stockview-analytics`
//!
//! **Responsibility:** derive dashboard statistics from a product snapshot.
//!
//! Everything here is a pure function of its input collection; the only state
//! is the optional [`SummaryCache`], keyed on snapshot identity.

pub mod alerts;
pub mod memo;
pub mod summary;

pub use alerts::{DEFAULT_ALERT_LIMIT, LowStockNotice, low_stock_alerts, low_stock_notices};
pub use memo::SummaryCache;
pub use summary::{AnalyticsSummary, summarize};
