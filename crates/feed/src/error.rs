use thiserror::Error;

/// Feed-level failure.
///
/// `Clone` so a failure can travel through the feed as a message to every
/// subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("snapshot source unavailable: {0}")]
    Io(String),

    #[error("malformed snapshot: {0}")]
    Parse(String),

    #[error("feed disconnected")]
    Disconnected,
}
