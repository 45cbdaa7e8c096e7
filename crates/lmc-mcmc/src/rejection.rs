use lmc_core::errors::ErrorInfo;
use lmc_core::{LmcError, RngHandle};
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::config::RunConfig;
use crate::determinism;
use crate::dispatch::{Dispatch, RayonDispatch, Sequential};
use crate::execution::Execution;
use crate::kernel;

/// Knobs of a batched rejection run.
#[derive(Debug, Clone, Copy)]
pub struct RejectionOptions<'a> {
    /// Samples handed to the dispatch backend at once.
    pub batch_size: usize,
    /// Executions allowed per sample. Unbounded when `None`.
    pub max_attempts: Option<u64>,
    /// Polled before every batch.
    pub cancel: Option<&'a CancelToken>,
}

impl Default for RejectionOptions<'_> {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_attempts: None,
            cancel: None,
        }
    }
}

/// Draws one exact posterior sample by repeated fresh execution.
pub fn single_rejection<V, T, F, C, Q>(
    model: &F,
    condition: &C,
    query: &Q,
    rng: &mut RngHandle,
    max_attempts: Option<u64>,
) -> Result<T, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
    Q: Fn(&V) -> T,
{
    let (_, value, _) = kernel::search(model, condition, rng, max_attempts)?;
    Ok(query(&value))
}

/// Draws `num_samples` independent samples through `dispatch`.
///
/// Sample `i` owns a random stream seeded from `(seed, i)`, so the output is
/// the same for every backend and batch size.
pub fn rejection<V, T, F, C, Q, D>(
    model: &F,
    condition: &C,
    query: &Q,
    num_samples: usize,
    seed: u64,
    dispatch: &D,
    options: RejectionOptions<'_>,
) -> Result<Vec<T>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError> + Sync,
    C: Fn(&V) -> bool + Sync,
    Q: Fn(&V) -> T + Sync,
    T: Send,
    D: Dispatch,
{
    if options.batch_size == 0 {
        return Err(LmcError::Precondition(
            ErrorInfo::new("batch-size", "batch size must be positive")
                .with_context("batch_size", "0"),
        ));
    }
    let mut samples = Vec::with_capacity(num_samples);
    let mut start = 0;
    while start < num_samples {
        if options.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(LmcError::Cancelled(
                ErrorInfo::new("rejection-cancelled", "rejection run was cancelled")
                    .with_context("completed", samples.len().to_string())
                    .with_context("requested", num_samples.to_string()),
            ));
        }
        let end = (start + options.batch_size).min(num_samples);
        let batch = dispatch.map((start..end).collect(), |index| {
            let mut rng = RngHandle::from_seed(determinism::sample_seed(seed, index));
            single_rejection(model, condition, query, &mut rng, options.max_attempts)
        })?;
        samples.extend(batch);
        debug!(start, end, completed = samples.len(), "rejection batch complete");
        start = end;
    }
    Ok(samples)
}

/// Runs the rejection sampler as configured by `config`.
///
/// A concurrency of one runs on the calling thread; anything greater uses a
/// dedicated thread pool of that size.
pub fn run_rejection<V, T, F, C, Q>(
    config: &RunConfig,
    model: &F,
    condition: &C,
    query: &Q,
    cancel: Option<&CancelToken>,
) -> Result<Vec<T>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError> + Sync,
    C: Fn(&V) -> bool + Sync,
    Q: Fn(&V) -> T + Sync,
    T: Send,
{
    config.validate()?;
    let seed = config.seed_policy.master_seed;
    let options = RejectionOptions {
        batch_size: config.rejection.batch_size,
        max_attempts: config.rejection.max_attempts,
        cancel,
    };
    info!(
        seed,
        num_samples = config.num_samples,
        concurrency = config.rejection.concurrency,
        "starting rejection run"
    );
    let samples = if config.rejection.concurrency > 1 {
        let dispatch = RayonDispatch::new(config.rejection.concurrency)?;
        rejection(model, condition, query, config.num_samples, seed, &dispatch, options)?
    } else {
        rejection(model, condition, query, config.num_samples, seed, &Sequential, options)?
    };
    info!(samples = samples.len(), "rejection run finished");
    Ok(samples)
}
