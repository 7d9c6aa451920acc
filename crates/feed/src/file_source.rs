//! Local-file snapshot source.
//!
//! Stands in for the real-time database listener: the file holds the full
//! collection as a JSON array of product documents, and every change to it
//! is published as a fresh snapshot.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use stockview_catalog::Product;

use crate::bus::SnapshotFeed;
use crate::error::FeedError;
use crate::snapshot::{FeedMessage, ProductSnapshot};
use crate::worker::WorkerHandle;

/// What the watch compares between polls. The length catches rewrites that
/// land within the filesystem's mtime granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

/// Reads product snapshots from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
    revision: u64,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            revision: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Revision of the last snapshot produced (0 before the first load).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Read the file into a snapshot ordered by name ascending, bumping the
    /// revision.
    pub fn load(&mut self) -> Result<ProductSnapshot, FeedError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| FeedError::Io(format!("{}: {e}", self.path.display())))?;
        let mut products: Vec<Product> = serde_json::from_slice(&bytes)
            .map_err(|e| FeedError::Parse(format!("{}: {e}", self.path.display())))?;

        // Upstream delivers `orderBy(name asc)`; sort_by is stable for equal names.
        products.sort_by(|a, b| a.name().cmp(b.name()));

        self.revision += 1;
        Ok(ProductSnapshot::new(self.revision, products))
    }

    fn stamp(&self) -> Result<FileStamp, FeedError> {
        std::fs::metadata(&self.path)
            .and_then(|m| {
                Ok(FileStamp {
                    modified: m.modified()?,
                    len: m.len(),
                })
            })
            .map_err(|e| FeedError::Io(format!("{}: {e}", self.path.display())))
    }

    /// Poll the file every `interval` and publish a snapshot whenever its
    /// modification time or length changes (and once immediately).
    ///
    /// Any read or parse failure is published as [`FeedMessage::Failed`] and
    /// ends the watch.
    pub fn spawn_watch<F>(self, feed: F, interval: Duration) -> Result<WorkerHandle, FeedError>
    where
        F: SnapshotFeed + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = thread::Builder::new()
            .name("snapshot-file-watch".to_string())
            .spawn(move || watch_loop(self, feed, interval, shutdown_rx))
            .map_err(|e| FeedError::Io(format!("failed to spawn file watch: {e}")))?;

        Ok(WorkerHandle::new(shutdown_tx, join))
    }
}

fn watch_loop<F>(
    mut source: FileSnapshotSource,
    feed: F,
    interval: Duration,
    shutdown_rx: mpsc::Receiver<()>,
) where
    F: SnapshotFeed,
{
    let mut last_seen: Option<FileStamp> = None;

    loop {
        let outcome = source.stamp().and_then(|stamp| {
            if last_seen == Some(stamp) {
                return Ok(None);
            }
            last_seen = Some(stamp);
            source.load().map(Some)
        });

        match outcome {
            Ok(Some(snapshot)) => {
                info!(
                    path = %source.path().display(),
                    revision = snapshot.revision(),
                    products = snapshot.len(),
                    "snapshot published"
                );
                if let Err(err) = feed.publish(FeedMessage::Snapshot(snapshot)) {
                    warn!(error = ?err, "failed to publish snapshot");
                }
            }
            Ok(None) => debug!(path = %source.path().display(), "snapshot unchanged"),
            Err(err) => {
                warn!(path = %source.path().display(), error = %err, "snapshot feed failed");
                if let Err(publish_err) = feed.publish(FeedMessage::Failed(err)) {
                    warn!(error = ?publish_err, "failed to publish feed failure");
                }
                break;
            }
        }

        match shutdown_rx.recv_timeout(interval) {
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}
