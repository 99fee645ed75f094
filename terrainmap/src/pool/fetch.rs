//! Bounded worker pool over scoped threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, OnceLock};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::coord::TileCoord;
use crate::source::TileSource;
use crate::tile::{FetchResult, TileFailure, TileProcessor};

use super::{PoolError, ProgressCallback};

/// Number of workers used when none is configured: twice the available
/// parallelism, since workers spend most of their time blocked on the network.
pub fn default_concurrency() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// Fixed-size pool that processes a batch of tiles concurrently.
#[derive(Debug, Clone)]
pub struct FetchPool {
    concurrency: usize,
}

impl FetchPool {
    /// Creates a pool with `concurrency` workers (minimum 1).
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Processes every tile and returns one result per tile, in input order.
    ///
    /// Per-tile failures are recorded in the results and never abort the
    /// batch. `progress` is called with `(completed, total)` after each tile.
    ///
    /// # Errors
    ///
    /// [`PoolError::WorkerSpawnFailed`] if a worker thread cannot be started.
    /// Workers that did start are joined before returning.
    pub fn run(
        &self,
        tiles: &[TileCoord],
        source: &dyn TileSource,
        processor: &TileProcessor,
        progress: Option<&ProgressCallback>,
    ) -> Result<Vec<FetchResult>, PoolError> {
        let total = tiles.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = self.concurrency.min(total);
        info!(tiles = total, workers, source = source.name(), "Fetching tiles");

        let slots: Vec<OnceLock<FetchResult>> = (0..total).map(|_| OnceLock::new()).collect();
        let completed = AtomicUsize::new(0);
        let (sender, receiver) = mpsc::sync_channel::<usize>(self.concurrency);
        let receiver = Arc::new(Mutex::new(receiver));

        let shared = Shared {
            tiles,
            source,
            processor,
            slots: &slots,
            completed: &completed,
            progress,
        };

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);

            for id in 0..workers {
                let receiver = Arc::clone(&receiver);
                let shared = &shared;
                let spawned = thread::Builder::new()
                    .name(format!("fetch-worker-{}", id))
                    .spawn_scoped(scope, move || shared.work(&receiver));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        drop(sender);
                        for handle in handles {
                            let _ = handle.join();
                        }
                        return Err(PoolError::WorkerSpawnFailed(e.to_string()));
                    }
                }
            }

            // Only workers hold the receiver now; if they all exit early,
            // send() fails instead of blocking.
            drop(receiver);

            for index in 0..total {
                if sender.send(index).is_err() {
                    warn!(remaining = total - index, "All fetch workers exited early");
                    break;
                }
            }
            drop(sender);

            for handle in handles {
                if handle.join().is_err() {
                    warn!("Fetch worker panicked");
                }
            }
            Ok(())
        })?;

        let results: Vec<FetchResult> = slots
            .into_iter()
            .zip(tiles)
            .map(|(slot, &tile)| {
                slot.into_inner().unwrap_or_else(|| FetchResult {
                    tile,
                    outcome: Err(TileFailure::FetchFailed(
                        "worker exited before processing tile".to_string(),
                    )),
                })
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!(
            succeeded,
            failed = total - succeeded,
            "Fetch complete"
        );

        Ok(results)
    }
}

impl Default for FetchPool {
    fn default() -> Self {
        Self::new(default_concurrency())
    }
}

/// State borrowed by every worker for the duration of one batch.
struct Shared<'a> {
    tiles: &'a [TileCoord],
    source: &'a dyn TileSource,
    processor: &'a TileProcessor,
    slots: &'a [OnceLock<FetchResult>],
    completed: &'a AtomicUsize,
    progress: Option<&'a ProgressCallback>,
}

impl Shared<'_> {
    fn work(&self, receiver: &Mutex<Receiver<usize>>) {
        loop {
            let next = receiver.lock().recv();
            let Ok(index) = next else {
                break;
            };

            let result = self.processor.process(self.tiles[index], self.source);
            if let Err(e) = &result.outcome {
                warn!(tile = %result.tile, error = %e, "Tile failed");
            }

            if self.slots[index].set(result).is_err() {
                debug!(index, "Result slot already filled");
            }

            let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(callback) = self.progress {
                callback(done, self.tiles.len());
            }
        }
    }
}
