//! Full-collection snapshots delivered by the feed.

use std::collections::HashSet;
use std::sync::Arc;

use stockview_catalog::Product;
use stockview_core::{Entity, ProductId};

use crate::error::FeedError;

/// Point-in-time copy of the whole product collection.
///
/// Clones share one allocation; that allocation is the snapshot's identity
/// for memoization purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    revision: u64,
    products: Arc<[Product]>,
}

impl ProductSnapshot {
    /// Wrap a collection in feed order.
    ///
    /// Duplicate ids break an upstream guarantee; they are logged and kept.
    pub fn new(revision: u64, products: Vec<Product>) -> Self {
        let duplicates = duplicate_ids(&products);
        if !duplicates.is_empty() {
            tracing::warn!(
                revision,
                duplicates = ?duplicates,
                "snapshot contains duplicate product ids"
            );
        }

        Self {
            revision,
            products: products.into(),
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Shared handle to the collection (snapshot identity).
    pub fn shared(&self) -> &Arc<[Product]> {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn duplicate_ids(products: &[Product]) -> Vec<&ProductId> {
    let mut seen: HashSet<&ProductId> = HashSet::with_capacity(products.len());
    products
        .iter()
        .map(Entity::id)
        .filter(|id| !seen.insert(*id))
        .collect()
}

/// Message carried by a [`SnapshotFeed`](crate::bus::SnapshotFeed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMessage {
    /// The upstream collection changed; here is all of it.
    Snapshot(ProductSnapshot),
    /// The subscription failed and will deliver nothing further.
    Failed(FeedError),
}
