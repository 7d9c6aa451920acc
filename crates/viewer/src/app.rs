//! Wiring: file source → snapshot feed → dashboard → view sink.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, anyhow};
use tracing::{error, info, warn};

use stockview_feed::{
    FeedError, FeedMessage, FeedWorker, FileSnapshotSource, InMemorySnapshotFeed, WorkerHandle,
};

use crate::config::ViewerConfig;
use crate::dashboard::{Dashboard, DashboardView};

type ViewSink = Box<dyn FnMut(&DashboardView) + Send>;

/// Dashboard plus the sink it renders into, shared by the consumer thread and
/// [`Pipeline::retry`].
struct Screen {
    dashboard: Dashboard,
    sink: ViewSink,
}

impl Screen {
    fn on_message(&mut self, message: FeedMessage) {
        if let Some(view) = self.dashboard.on_message(message) {
            (self.sink)(&view);
        }
    }
}

/// Running source and consumer threads.
pub struct Pipeline {
    feed: Arc<InMemorySnapshotFeed>,
    screen: Arc<Mutex<Screen>>,
    snapshot_path: PathBuf,
    poll_interval: Duration,
    watch: Option<WorkerHandle>,
    consumer: WorkerHandle,
    failures: mpsc::Receiver<FeedError>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("snapshot_path", &self.snapshot_path)
            .field("poll_interval", &self.poll_interval)
            .field("watching", &self.watch.is_some())
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Start watching `config.snapshot_path`, handing every new view to `sink`.
    pub fn spawn<S>(config: &ViewerConfig, sink: S) -> anyhow::Result<Self>
    where
        S: FnMut(&DashboardView) + Send + 'static,
    {
        let feed = Arc::new(InMemorySnapshotFeed::new());
        let (failure_tx, failures) = mpsc::channel();
        let screen = Arc::new(Mutex::new(Screen {
            dashboard: Dashboard::new(config.settings),
            sink: Box::new(sink),
        }));

        // Subscribe the consumer before the source publishes its first snapshot.
        let shared = Arc::clone(&screen);
        let consumer = FeedWorker::spawn("dashboard-consumer", &*feed, move |message| {
            let failure = match &message {
                FeedMessage::Failed(err) => Some(err.clone()),
                FeedMessage::Snapshot(_) => None,
            };
            shared
                .lock()
                .map_err(|_| "dashboard lock poisoned")?
                .on_message(message);
            match failure {
                Some(err) => failure_tx.send(err).map_err(|_| "pipeline owner gone"),
                None => Ok(()),
            }
        })
        .context("failed to start dashboard consumer")?;

        let mut pipeline = Self {
            feed,
            screen,
            snapshot_path: config.snapshot_path.clone(),
            poll_interval: config.poll_interval,
            watch: None,
            consumer,
            failures,
        };
        pipeline.start_watch()?;
        Ok(pipeline)
    }

    fn start_watch(&mut self) -> anyhow::Result<()> {
        let watch = FileSnapshotSource::new(&self.snapshot_path)
            .spawn_watch(Arc::clone(&self.feed), self.poll_interval)
            .context("failed to start snapshot watch")?;
        self.watch = Some(watch);
        Ok(())
    }

    /// Block until the feed reports a failure.
    pub fn wait_for_failure(&self) -> Option<FeedError> {
        self.failures.recv().ok()
    }

    /// User-initiated retry after a failure: the dashboard returns to
    /// Loading and a fresh watch resubscribes to the snapshot file.
    ///
    /// Returns `Ok(false)` when the dashboard was not failed.
    pub fn retry(&mut self) -> anyhow::Result<bool> {
        {
            let mut screen = self
                .screen
                .lock()
                .map_err(|_| anyhow!("dashboard lock poisoned"))?;
            if !screen.dashboard.retry() {
                return Ok(false);
            }
            let view = screen.dashboard.render();
            (screen.sink)(&view);
        }

        // The failed watch has already stopped after publishing its failure.
        if let Some(old) = self.watch.take() {
            old.join();
        }
        info!(path = %self.snapshot_path.display(), "retrying snapshot feed");
        self.start_watch()?;
        Ok(true)
    }

    pub fn shutdown(self) {
        self.consumer.shutdown();
        if let Some(watch) = self.watch {
            watch.shutdown();
        }
    }
}

/// Log-rendering sink used by the binary.
pub fn log_view(view: &DashboardView) {
    match view {
        DashboardView::Loading => info!("dashboard loading"),
        DashboardView::Failed { message } => error!(message = %message, "dashboard unavailable"),
        DashboardView::Ready {
            revision,
            summary,
            alerts,
            new_notices,
        } => {
            info!(
                revision,
                total_products = summary.total_products,
                total_units = summary.total_units,
                inventory_value = %summary.inventory_value,
                potential_profit = %summary.potential_profit,
                stock_health_percent = summary.stock_health_percent,
                alerts = alerts.len(),
                "dashboard updated"
            );
            for notice in new_notices {
                warn!(
                    product_id = %notice.product_id,
                    name = %notice.name,
                    quantity = notice.quantity,
                    status = %notice.status,
                    "low stock"
                );
            }
            match serde_json::to_string(view) {
                Ok(json) => info!(view = %json, "dashboard view"),
                Err(err) => warn!(error = %err, "failed to serialize dashboard view"),
            }
        }
    }
}

/// Run until the feed fails; the failure is returned as the process error.
///
/// The binary has no interactive retry: restarting the process resubscribes.
pub fn run(config: ViewerConfig) -> anyhow::Result<()> {
    info!(
        path = %config.snapshot_path.display(),
        poll_interval_ms = config.poll_interval.as_millis() as u64,
        notifications = config.settings.notifications_enabled(),
        low_stock_threshold = config.settings.low_stock_threshold(),
        "starting stock viewer"
    );

    let pipeline = Pipeline::spawn(&config, log_view)?;
    let failure = pipeline.wait_for_failure();
    pipeline.shutdown();

    match failure {
        Some(err) => Err(anyhow::Error::new(err).context(stockview_feed::FEED_FAILURE_MESSAGE)),
        None => Ok(()),
    }
}
