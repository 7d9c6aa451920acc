//! In-memory snapshot feed for tests/dev and in-process sources.

use std::sync::{Mutex, mpsc};

use crate::bus::{SnapshotFeed, Subscription};
use crate::snapshot::FeedMessage;

#[derive(Debug)]
pub enum InMemoryFeedError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

#[derive(Debug, Default)]
struct FeedInner {
    latest: Option<FeedMessage>,
    subscribers: Vec<mpsc::Sender<FeedMessage>>,
}

/// In-memory latest-value feed.
///
/// - No IO / no async
/// - Remembers the last published message and hands it to every new
///   subscriber first, so a late listener starts from the current collection
/// - Dead subscribers are dropped on publish
#[derive(Debug, Default)]
pub struct InMemorySnapshotFeed {
    inner: Mutex<FeedInner>,
}

impl InMemorySnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.subscribers.len()).unwrap_or(0)
    }

    /// The message a subscriber joining now would receive first.
    pub fn latest(&self) -> Option<FeedMessage> {
        self.inner.lock().ok().and_then(|inner| inner.latest.clone())
    }
}

impl SnapshotFeed for InMemorySnapshotFeed {
    type Error = InMemoryFeedError;

    fn publish(&self, message: FeedMessage) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().map_err(|_| InMemoryFeedError::Poisoned)?;

        inner.subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        inner.latest = Some(message);

        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        // Replay and registration happen under one lock: a concurrent publish
        // is seen either as the replay or as a regular delivery, never both.
        // A poisoned lock still yields a subscription; it just never receives.
        if let Ok(mut inner) = self.inner.lock() {
            let replayed = match &inner.latest {
                Some(latest) => tx.send(latest.clone()).is_ok(),
                None => true,
            };
            if replayed {
                inner.subscribers.push(tx);
            }
        }

        Subscription::new(rx)
    }
}
