//! Snapshot-keyed memoization of [`summarize`].

use std::sync::Arc;

use stockview_catalog::Product;

use crate::summary::{AnalyticsSummary, summarize};

/// Caches the summary of the most recent snapshot.
///
/// The key is the snapshot allocation itself: re-rendering the same
/// `Arc<[Product]>` skips recomputation, any other snapshot recomputes. The
/// cached `Arc` is held so its address cannot be reused while cached.
#[derive(Debug, Default)]
pub struct SummaryCache {
    entry: Option<(Arc<[Product]>, AnalyticsSummary)>,
    hits: u64,
    misses: u64,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary_for(&mut self, products: &Arc<[Product]>) -> &AnalyticsSummary {
        let fresh = !matches!(&self.entry, Some((cached, _)) if Arc::ptr_eq(cached, products));

        if fresh {
            self.misses += 1;
            tracing::trace!(products = products.len(), "summary cache miss");
            self.entry = None;
        } else {
            self.hits += 1;
        }

        let (_, summary) = self
            .entry
            .get_or_insert_with(|| (Arc::clone(products), summarize(products)));
        summary
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal::Decimal;

    fn snapshot(quantities: &[i64]) -> Arc<[Product]> {
        quantities
            .iter()
            .enumerate()
            .map(|(i, q)| {
                Product::new(
                    format!("p{i}").parse().unwrap(),
                    format!("Product {i}"),
                    Decimal::ONE,
                    *q,
                    5,
                    DateTime::from_timestamp(1_714_557_600, 0).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn same_snapshot_hits_cache() {
        let mut cache = SummaryCache::new();
        let snap = snapshot(&[0, 9]);

        let first = cache.summary_for(&snap).clone();
        let second = cache.summary_for(&Arc::clone(&snap)).clone();

        assert_eq!(first, second);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn equal_but_distinct_snapshot_recomputes() {
        let mut cache = SummaryCache::new();
        let a = snapshot(&[0, 9]);
        let b = snapshot(&[0, 9]);

        cache.summary_for(&a);
        let summary = cache.summary_for(&b).clone();

        assert_eq!(summary, summarize(&b));
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn new_snapshot_replaces_cached_summary() {
        let mut cache = SummaryCache::new();
        cache.summary_for(&snapshot(&[9, 9]));
        let summary = cache.summary_for(&snapshot(&[0])).clone();
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.total_products, 1);
    }
}
