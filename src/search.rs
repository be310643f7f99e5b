//! Worker pool, cooperative cancellation, and the two parallel search shapes
//! used throughout the crate: a first-hit scan over a tuple space, and a race
//! between independent searches.

use crate::{BergeError, Result};
use crossbeam::channel;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

// ============================================================================
// Configuration
// ============================================================================

/// Worker pool configuration.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Number of worker threads. `0` means one per available hardware thread.
    pub workers: usize,
    /// Prefix for worker thread names.
    pub thread_name_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            thread_name_prefix: "berge-worker".to_string(),
        }
    }
}

impl SearchConfig {
    /// Default configuration with an explicit worker count.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}

// ============================================================================
// SearchPool
// ============================================================================

/// A fixed-size worker pool. Passed explicitly to every search; there is no
/// global pool.
#[derive(Debug)]
pub struct SearchPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl SearchPool {
    /// Builds a pool from `cfg`.
    ///
    /// # Errors
    /// Returns [`BergeError::PoolUnavailable`] if the threads cannot be spawned.
    pub fn new(cfg: &SearchConfig) -> Result<Self> {
        let workers = if cfg.workers == 0 {
            default_workers()
        } else {
            cfg.workers
        };
        let prefix = cfg.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| BergeError::PoolUnavailable(e.to_string()))?;
        debug!(workers, "search pool ready");
        Ok(Self { pool, workers })
    }

    /// Builds a pool with `workers` threads and otherwise default settings.
    ///
    /// # Errors
    /// See [`SearchPool::new`].
    pub fn with_workers(workers: usize) -> Result<Self> {
        Self::new(&SearchConfig::with_workers(workers))
    }

    /// Number of worker threads.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// A fresh root context for one decision.
    pub fn context(&self) -> SearchContext<'_> {
        SearchContext {
            pool: self,
            stops: vec![Arc::new(AtomicBool::new(false))],
        }
    }
}

// ============================================================================
// SearchContext
// ============================================================================

/// One independent search, as submitted to [`SearchContext::race`].
pub type Search<'a, 'p, W> = Box<dyn FnOnce(&SearchContext<'p>) -> Result<Option<W>> + Send + 'a>;

/// A handle on the pool plus a chain of stop flags.
///
/// Stopping a context stops every context derived from it with
/// [`SearchContext::child`], but not its parent. Stopping is cooperative: work
/// already running finishes its current tuple, and nothing new is started.
#[derive(Clone, Debug)]
pub struct SearchContext<'p> {
    pool: &'p SearchPool,
    stops: Vec<Arc<AtomicBool>>,
}

impl<'p> SearchContext<'p> {
    /// Returns `true` once this context or any ancestor has been stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stops.iter().any(|flag| flag.load(Ordering::Relaxed))
    }

    /// Stops this context and its descendants.
    pub fn stop(&self) {
        if let Some(own) = self.stops.last() {
            own.store(true, Ordering::Relaxed);
        }
    }

    /// A context that is stopped when either it or `self` is stopped.
    pub fn child(&self) -> Self {
        let mut stops = self.stops.clone();
        stops.push(Arc::new(AtomicBool::new(false)));
        Self {
            pool: self.pool,
            stops,
        }
    }

    /// Runs `op` on the pool, converting a worker panic into an error.
    ///
    /// # Errors
    /// [`BergeError::WorkerPanicked`] if `op` or any task it spawns panics.
    pub fn run<R, F>(&self, op: F) -> Result<R>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        guarded(|| self.pool.pool.install(op))
    }

    /// Evaluates `check` over `items` in parallel and returns the first witness
    /// produced, in completion order.
    ///
    /// `Ok(None)` means the whole space was examined without a witness.
    ///
    /// # Errors
    /// [`BergeError::Cancelled`] if the context was stopped before the space was
    /// exhausted; [`BergeError::WorkerPanicked`] if `check` panicked.
    pub fn find_first<I, W, F>(&self, items: I, check: F) -> Result<Option<W>>
    where
        I: IntoParallelIterator + Send,
        W: Send,
        F: Fn(I::Item) -> Option<W> + Sync + Send,
    {
        if self.is_stopped() {
            return Err(BergeError::Cancelled);
        }
        let outcome = self.run(|| {
            items.into_par_iter().find_map_any(|item| {
                if self.is_stopped() {
                    Some(None)
                } else {
                    check(item).map(Some)
                }
            })
        })?;
        match outcome {
            None => Ok(None),
            Some(Some(witness)) => Ok(Some(witness)),
            Some(None) => Err(BergeError::Cancelled),
        }
    }

    /// Runs independent searches concurrently and returns the first witness
    /// any of them reports.
    ///
    /// Each search gets a child context that is stopped as soon as a witness
    /// (or an error) arrives; results are consumed in completion order over a
    /// channel. Searches still running at that point finish cooperatively and
    /// their results are discarded.
    ///
    /// # Errors
    /// The first error reported by any search, or [`BergeError::Cancelled`] if
    /// `self` was stopped and no witness was found.
    pub fn race<'a, W>(&self, searches: Vec<Search<'a, 'p, W>>) -> Result<Option<W>>
    where
        W: Send,
    {
        let step = self.child();
        let total = searches.len();
        let (tx, rx) = channel::bounded::<Result<Option<W>>>(total.max(1));

        std::thread::scope(|scope| {
            for search in searches {
                let tx = tx.clone();
                let ctx = step.clone();
                scope.spawn(move || {
                    let outcome = guarded(|| search(&ctx)).and_then(|r| r);
                    // The receiver outlives the scope and the channel holds one
                    // slot per search, so this never blocks or fails.
                    let _ = tx.send(outcome);
                });
            }
            drop(tx);

            let mut finished = 0usize;
            for outcome in &rx {
                finished += 1;
                match outcome {
                    Ok(Some(witness)) => {
                        trace!(finished, total, "race decided by a witness");
                        step.stop();
                        return Ok(Some(witness));
                    }
                    Ok(None) | Err(BergeError::Cancelled) => {}
                    Err(err) => {
                        step.stop();
                        return Err(err);
                    }
                }
            }

            if self.is_stopped() {
                Err(BergeError::Cancelled)
            } else {
                Ok(None)
            }
        })
    }
}

// ============================================================================
// Panic containment
// ============================================================================

fn guarded<R>(op: impl FnOnce() -> R) -> Result<R> {
    panic::catch_unwind(AssertUnwindSafe(op))
        .map_err(|payload| BergeError::WorkerPanicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
