//! Dashboard state: feed session + memoized analytics + notification tracking.

use std::collections::HashSet;

use serde::Serialize;

use stockview_analytics::{
    AnalyticsSummary, DEFAULT_ALERT_LIMIT, LowStockNotice, SummaryCache, low_stock_alerts,
    low_stock_notices,
};
use stockview_catalog::{StockStatus, classify};
use stockview_core::{NotificationSettings, ProductId};
use stockview_feed::{FeedMessage, FeedSession, FeedState};

/// One row of the lowest-stock alert list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRow {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub status: StockStatus,
    pub label: &'static str,
}

/// Everything the presentation layer reads for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DashboardView {
    Loading,
    Ready {
        revision: u64,
        summary: AnalyticsSummary,
        alerts: Vec<AlertRow>,
        /// Products that crossed the notification threshold since the
        /// previous snapshot.
        new_notices: Vec<LowStockNotice>,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug)]
pub struct Dashboard {
    session: FeedSession,
    cache: SummaryCache,
    settings: NotificationSettings,
    notified: HashSet<ProductId>,
    pending_notices: Vec<LowStockNotice>,
}

impl Dashboard {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            session: FeedSession::new(),
            cache: SummaryCache::new(),
            settings,
            notified: HashSet::new(),
            pending_notices: Vec::new(),
        }
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// Feed hook. Returns the fresh view when the message changed state.
    pub fn on_message(&mut self, message: FeedMessage) -> Option<DashboardView> {
        if !self.session.apply(message) {
            return None;
        }
        self.track_notices();
        Some(self.render())
    }

    /// Leave the failed state; the caller is expected to resubscribe.
    pub fn retry(&mut self) -> bool {
        self.session.retry()
    }

    pub fn render(&mut self) -> DashboardView {
        match self.session.state() {
            FeedState::Loading => DashboardView::Loading,
            FeedState::Failed { message, .. } => DashboardView::Failed {
                message: message.clone(),
            },
            FeedState::Live(snapshot) => {
                let summary = self.cache.summary_for(snapshot.shared()).clone();
                let alerts = low_stock_alerts(snapshot.products(), DEFAULT_ALERT_LIMIT)
                    .into_iter()
                    .map(|p| {
                        let status = classify(p);
                        AlertRow {
                            product_id: p.id_typed().clone(),
                            name: p.name().to_string(),
                            quantity: p.quantity(),
                            status,
                            label: status.label(),
                        }
                    })
                    .collect();

                DashboardView::Ready {
                    revision: snapshot.revision(),
                    summary,
                    alerts,
                    new_notices: self.pending_notices.clone(),
                }
            }
        }
    }

    /// Recompute which products sit under the threshold. Only ids absent from
    /// the previous snapshot's set are reported, so a product is notified once
    /// per dip below the threshold.
    fn track_notices(&mut self) {
        let Some(snapshot) = self.session.snapshot() else {
            self.pending_notices.clear();
            return;
        };

        let current = low_stock_notices(snapshot.products(), &self.settings);
        let fresh: Vec<LowStockNotice> = current
            .iter()
            .filter(|n| !self.notified.contains(&n.product_id))
            .cloned()
            .collect();

        self.notified = current.into_iter().map(|n| n.product_id).collect();
        self.pending_notices = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use stockview_catalog::Product;
    use stockview_feed::{FEED_FAILURE_MESSAGE, FeedError, ProductSnapshot};

    fn product(id: &str, quantity: i64) -> Product {
        Product::new(
            id.parse().unwrap(),
            format!("Product {id}"),
            Decimal::from(100),
            quantity,
            5,
            DateTime::from_timestamp(1_714_557_600, 0).unwrap(),
        )
    }

    fn snapshot(revision: u64, products: Vec<Product>) -> FeedMessage {
        FeedMessage::Snapshot(ProductSnapshot::new(revision, products))
    }

    fn notice_ids(view: &DashboardView) -> Vec<String> {
        match view {
            DashboardView::Ready { new_notices, .. } => {
                new_notices.iter().map(|n| n.product_id.to_string()).collect()
            }
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn renders_loading_before_first_snapshot() {
        let mut dashboard = Dashboard::new(NotificationSettings::default());
        assert_eq!(dashboard.render(), DashboardView::Loading);
    }

    #[test]
    fn ready_view_carries_summary_and_alerts() {
        let mut dashboard = Dashboard::new(NotificationSettings::default());
        let view = dashboard
            .on_message(snapshot(1, vec![product("a", 0), product("b", 3), product("c", 30)]))
            .unwrap();

        match view {
            DashboardView::Ready {
                revision,
                summary,
                alerts,
                new_notices,
            } => {
                assert_eq!(revision, 1);
                assert_eq!(summary.total_products, 3);
                assert_eq!(summary.stock_health_percent, 33);
                let labels: Vec<&str> = alerts.iter().map(|a| a.label).collect();
                assert_eq!(labels, vec!["Out of Stock", "Low Stock"]);
                assert!(new_notices.is_empty());
            }
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn rerender_of_same_snapshot_hits_cache() {
        let mut dashboard = Dashboard::new(NotificationSettings::default());
        dashboard.on_message(snapshot(1, vec![product("a", 9)]));
        dashboard.render();
        dashboard.render();
        assert_eq!(dashboard.cache().misses(), 1);
        assert_eq!(dashboard.cache().hits(), 2);
    }

    #[test]
    fn notices_fire_once_per_dip() {
        let settings = NotificationSettings::new(true, 5).unwrap();
        let mut dashboard = Dashboard::new(settings);

        let first = dashboard
            .on_message(snapshot(1, vec![product("a", 2), product("b", 9)]))
            .unwrap();
        assert_eq!(notice_ids(&first), vec!["a"]);

        let second = dashboard
            .on_message(snapshot(2, vec![product("a", 1), product("b", 4)]))
            .unwrap();
        assert_eq!(notice_ids(&second), vec!["b"]);

        // a recovers, then dips again
        dashboard.on_message(snapshot(3, vec![product("a", 20), product("b", 4)]));
        let fourth = dashboard
            .on_message(snapshot(4, vec![product("a", 3), product("b", 4)]))
            .unwrap();
        assert_eq!(notice_ids(&fourth), vec!["a"]);
    }

    #[test]
    fn failure_renders_message_and_ignores_later_snapshots() {
        let mut dashboard = Dashboard::new(NotificationSettings::default());
        let view = dashboard
            .on_message(FeedMessage::Failed(FeedError::Disconnected))
            .unwrap();
        assert_eq!(
            view,
            DashboardView::Failed {
                message: FEED_FAILURE_MESSAGE.to_string()
            }
        );

        assert!(dashboard.on_message(snapshot(1, Vec::new())).is_none());
        assert!(dashboard.retry());
        assert_eq!(dashboard.render(), DashboardView::Loading);
    }
}
