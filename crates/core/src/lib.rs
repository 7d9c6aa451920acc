//! `stockview-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no feed plumbing).

pub mod entity;
pub mod error;
pub mod id;
pub mod settings;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use settings::{DEFAULT_LOW_STOCK_THRESHOLD, NotificationSettings};
