//! Product catalog domain module (read-only).
//!
//! Product records as delivered by the upstream billing system, the
//! stock-status classifier, and list filtering. Deterministic domain logic
//! only (no IO, no feed plumbing).

pub mod filter;
pub mod product;
pub mod status;

pub use filter::ProductFilter;
pub use product::{FsnClass, Product};
pub use status::{StockStatus, classify, classify_levels};
