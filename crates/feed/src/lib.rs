//! Live product feed: full-collection snapshots and their delivery.

pub mod bus;
pub mod error;
pub mod file_source;
pub mod in_memory;
pub mod session;
pub mod snapshot;
pub mod worker;

pub use bus::{SnapshotFeed, Subscription};
pub use error::FeedError;
pub use file_source::FileSnapshotSource;
pub use in_memory::{InMemoryFeedError, InMemorySnapshotFeed};
pub use session::{FEED_FAILURE_MESSAGE, FeedSession, FeedState};
pub use snapshot::{FeedMessage, ProductSnapshot};
pub use worker::{FeedWorker, WorkerHandle};
