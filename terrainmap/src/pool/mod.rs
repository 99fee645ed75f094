//! Concurrent tile fetching
//!
//! [`FetchPool`] runs [`TileProcessor::process`](crate::tile::TileProcessor::process)
//! for a batch of tiles on a fixed set of named worker threads:
//!
//! ```text
//!             bounded queue (tile indices)
//! feeder ──► [ 0 1 2 … ] ──► fetch-worker-0 ─┐
//!                         ├─► fetch-worker-1 ─┼─► one OnceLock slot per tile
//!                         └─► fetch-worker-N ─┘
//! ```
//!
//! Each slot is written exactly once by the worker that took its index, so
//! results come back in input order regardless of completion order.

mod fetch;

pub use fetch::{default_concurrency, FetchPool};

use thiserror::Error;

/// Progress hook, called with `(completed, total)` after every tile.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// Fatal pool errors. Tile-level failures are never reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("Failed to spawn fetch worker: {0}")]
    WorkerSpawnFailed(String),
}
