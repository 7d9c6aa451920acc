use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::bus::{SnapshotFeed, Subscription};
use crate::error::FeedError;
use crate::snapshot::FeedMessage;

/// Handle to control and join a background feed thread.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    pub(crate) fn new(shutdown: mpsc::Sender<()>, join: thread::JoinHandle<()>) -> Self {
        Self {
            shutdown,
            join: Some(join),
        }
    }

    /// Request graceful shutdown and wait for the thread to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }

    /// Wait for the thread to stop on its own (e.g. feed closed).
    pub fn join(mut self) {
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Snapshot consumer loop (the `onSnapshot` hook).
///
/// - Subscribes before the thread starts; the feed replays its current message
/// - Hands `handler` the newest snapshot only, when snapshots queue up faster
///   than it runs
/// - A feed that goes away without reporting a failure is surfaced to the
///   handler as [`FeedError::Disconnected`]
/// - Keeps running after a failure, so a retried source can publish again
/// - Stops on shutdown request or when the feed disconnects
#[derive(Debug)]
pub struct FeedWorker;

impl FeedWorker {
    pub fn spawn<F, H, E>(name: &'static str, feed: &F, mut handler: H) -> Result<WorkerHandle, FeedError>
    where
        F: SnapshotFeed + ?Sized,
        H: FnMut(FeedMessage) -> Result<(), E> + Send + 'static,
        E: core::fmt::Debug + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let sub = feed.subscribe();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker_loop(name, sub, shutdown_rx, &mut handler))
            .map_err(|e| FeedError::Io(format!("failed to spawn {name}: {e}")))?;

        Ok(WorkerHandle::new(shutdown_tx, join))
    }
}

fn worker_loop<H, E>(
    name: &'static str,
    sub: Subscription,
    shutdown_rx: mpsc::Receiver<()>,
    handler: &mut H,
) where
    H: FnMut(FeedMessage) -> Result<(), E>,
    E: core::fmt::Debug,
{
    let tick = Duration::from_millis(250);
    let mut failed = false;

    loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        let message = match sub.recv_latest_timeout(tick) {
            Ok(message) => message,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                debug!(worker = name, "feed disconnected");
                if !failed {
                    deliver(name, handler, FeedMessage::Failed(FeedError::Disconnected));
                }
                break;
            }
        };
        failed = matches!(message, FeedMessage::Failed(_));
        deliver(name, handler, message);
    }
}

fn deliver<H, E>(name: &'static str, handler: &mut H, message: FeedMessage)
where
    H: FnMut(FeedMessage) -> Result<(), E>,
    E: core::fmt::Debug,
{
    if let Err(err) = handler(message) {
        warn!(worker = name, error = ?err, "feed handler failed");
    }
}
