use lmc_core::errors::ErrorInfo;
use lmc_core::LmcError;
use rayon::prelude::*;

/// Order-preserving parallel-map collaborator used by the rejection sampler.
///
/// Every item is processed independently; backends differ only in where the
/// work runs, never in the results.
pub trait Dispatch: Sync {
    /// Applies `f` to every item and returns the results in item order.
    fn map<I, R, F>(&self, items: Vec<I>, f: F) -> Result<Vec<R>, LmcError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, LmcError> + Send + Sync;
}

/// Runs every item on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Dispatch for Sequential {
    fn map<I, R, F>(&self, items: Vec<I>, f: F) -> Result<Vec<R>, LmcError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, LmcError> + Send + Sync,
    {
        items.into_iter().map(f).collect()
    }
}

/// Runs items on a dedicated rayon thread pool.
#[derive(Debug)]
pub struct RayonDispatch {
    pool: rayon::ThreadPool,
}

impl RayonDispatch {
    /// Builds a pool with `threads` workers (at least one).
    pub fn new(threads: usize) -> Result<Self, LmcError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .map_err(|err| {
                LmcError::Dispatch(
                    ErrorInfo::new("thread-pool", err.to_string())
                        .with_context("threads", threads.to_string()),
                )
            })?;
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Dispatch for RayonDispatch {
    fn map<I, R, F>(&self, items: Vec<I>, f: F) -> Result<Vec<R>, LmcError>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R, LmcError> + Send + Sync,
    {
        self.pool.install(|| items.into_par_iter().map(f).collect())
    }
}
