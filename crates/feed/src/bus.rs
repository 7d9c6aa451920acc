//! Snapshot publishing/subscription abstraction (mechanics only).
//!
//! The feed is the only asynchronous boundary around the analytics core. It
//! delivers the *entire* current collection on every upstream change, never a
//! diff, so a consumer only ever needs the latest message:
//!
//! - a new subscriber is handed the current message straight away
//! - a consumer that falls behind may skip intermediate snapshots
//!
//! Implementations may sit on a real-time database listener, a polling HTTP
//! client, a message channel or a local file watch; consumers cannot tell.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::snapshot::FeedMessage;

/// A subscription to the snapshot feed.
///
/// Designed for a single consuming thread.
#[derive(Debug)]
pub struct Subscription {
    receiver: Receiver<FeedMessage>,
}

impl Subscription {
    pub fn new(receiver: Receiver<FeedMessage>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<FeedMessage, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<FeedMessage, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Like [`recv_timeout`](Self::recv_timeout), then drain whatever is
    /// already queued and return only the newest snapshot.
    ///
    /// A failure is returned as soon as it is seen, never collapsed; anything
    /// queued behind it is left for the next call.
    pub fn recv_latest_timeout(&self, timeout: Duration) -> Result<FeedMessage, RecvTimeoutError> {
        let mut latest = self.receiver.recv_timeout(timeout)?;
        while matches!(latest, FeedMessage::Snapshot(_)) {
            match self.receiver.try_recv() {
                Ok(next) => latest = next,
                Err(_) => break,
            }
        }
        Ok(latest)
    }
}

/// Source-agnostic snapshot feed (pub/sub, latest-value).
///
/// ```text
/// upstream source → SnapshotFeed (publish) → Subscription → analytics consumer
/// ```
///
/// Every subscriber receives the message current at subscription time (if
/// any), followed by every later message in publish order. A
/// [`FeedMessage::Failed`] is the last message a well-behaved source sends.
pub trait SnapshotFeed: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: FeedMessage) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription;
}

impl<F> SnapshotFeed for Arc<F>
where
    F: SnapshotFeed + ?Sized,
{
    type Error = F::Error;

    fn publish(&self, message: FeedMessage) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription {
        (**self).subscribe()
    }
}
