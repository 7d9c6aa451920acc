//! Per-session feed state seen by the presentation layer.

use crate::error::FeedError;
use crate::snapshot::{FeedMessage, ProductSnapshot};

/// User-facing text shown when the subscription fails.
pub const FEED_FAILURE_MESSAGE: &str = "Failed to load products. Please check your connection.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// Subscribed, no snapshot yet.
    Loading,
    /// Latest snapshot delivered by the feed.
    Live(ProductSnapshot),
    /// Subscription failed; terminal until [`FeedSession::retry`].
    Failed { message: String, cause: FeedError },
}

/// Loading / live / failed state machine driven by feed messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSession {
    state: FeedState,
}

impl Default for FeedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedSession {
    pub fn new() -> Self {
        Self {
            state: FeedState::Loading,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&ProductSnapshot> {
        match &self.state {
            FeedState::Live(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, FeedState::Failed { .. })
    }

    /// Apply one feed message. Returns `true` when the state changed.
    ///
    /// Snapshots replace whatever was live; messages arriving after a failure
    /// are ignored.
    pub fn apply(&mut self, message: FeedMessage) -> bool {
        if self.is_failed() {
            return false;
        }
        self.state = match message {
            FeedMessage::Snapshot(snapshot) => FeedState::Live(snapshot),
            FeedMessage::Failed(cause) => FeedState::Failed {
                message: FEED_FAILURE_MESSAGE.to_string(),
                cause,
            },
        };
        true
    }

    /// User-initiated retry: leave the failed state and wait for a fresh
    /// subscription. Returns `false` when there was nothing to retry.
    pub fn retry(&mut self) -> bool {
        if !self.is_failed() {
            return false;
        }
        self.state = FeedState::Loading;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(revision: u64) -> FeedMessage {
        FeedMessage::Snapshot(ProductSnapshot::new(revision, Vec::new()))
    }

    #[test]
    fn starts_loading() {
        let session = FeedSession::new();
        assert!(session.is_loading());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn snapshots_replace_live_state() {
        let mut session = FeedSession::new();
        assert!(session.apply(snapshot(1)));
        assert!(session.apply(snapshot(2)));
        assert_eq!(session.snapshot().map(|s| s.revision()), Some(2));
    }

    #[test]
    fn failure_is_terminal_until_retry() {
        let mut session = FeedSession::new();
        session.apply(snapshot(1));
        assert!(session.apply(FeedMessage::Failed(FeedError::Disconnected)));

        match session.state() {
            FeedState::Failed { message, cause } => {
                assert_eq!(message, FEED_FAILURE_MESSAGE);
                assert_eq!(cause, &FeedError::Disconnected);
            }
            other => panic!("expected failed state, got {other:?}"),
        }

        assert!(!session.apply(snapshot(2)));
        assert!(session.is_failed());

        assert!(session.retry());
        assert!(session.is_loading());
        assert!(session.apply(snapshot(3)));
        assert_eq!(session.snapshot().map(|s| s.revision()), Some(3));
    }

    #[test]
    fn retry_without_failure_is_a_no_op() {
        let mut session = FeedSession::new();
        session.apply(snapshot(1));
        assert!(!session.retry());
        assert!(session.snapshot().is_some());
    }
}
