use lmc_core::errors::ErrorInfo;
use lmc_core::{LmcError, RngHandle, Tick, INIT_TICK};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::cancel::CancelToken;
use crate::config::RunConfig;
use crate::determinism;
use crate::dispatch::Dispatch;
use crate::execution::Execution;
use crate::metrics::{ChainStats, ProposalOutcome};
use crate::world::{Proposal, World};

/// Summary returned to callers after a chain completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary<T> {
    /// Query outputs, one per completed round.
    pub samples: Vec<T>,
    /// Transition counters.
    pub stats: ChainStats,
    /// Fraction of accepted proposals.
    pub acceptance_rate: f64,
    /// Tick of the last proposal, `INIT_TICK` if none ran.
    pub final_tick: Tick,
    /// Seed the chain's random stream was built from.
    pub seed: u64,
    /// True when the run stopped early on a cancellation request.
    pub cancelled: bool,
}

/// Retained state of one Markov chain.
#[derive(Debug, Clone)]
pub struct Chain<V> {
    world: World,
    value: V,
    next_tick: Tick,
    stats: ChainStats,
}

impl<V> Chain<V> {
    /// Finds an initial state satisfying `condition`; see [`initialize`].
    pub fn start<F, C>(
        model: &F,
        condition: &C,
        rng: &mut RngHandle,
        max_attempts: Option<u64>,
    ) -> Result<Self, LmcError>
    where
        F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
        C: Fn(&V) -> bool,
    {
        let (world, value, attempts) = search(model, condition, rng, max_attempts)?;
        Ok(Self {
            world,
            value,
            next_tick: 0,
            stats: ChainStats {
                init_attempts: attempts,
                ..ChainStats::default()
            },
        })
    }

    /// Runs one Metropolis-Hastings-Green transition.
    ///
    /// Each call consumes a fresh tick. Only an accepted proposal replaces the
    /// retained state.
    pub fn step<F, C>(
        &mut self,
        model: &F,
        condition: &C,
        rng: &mut RngHandle,
    ) -> Result<ProposalOutcome, LmcError>
    where
        F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
        C: Fn(&V) -> bool,
    {
        let tick = self.next_tick;
        self.next_tick += 1;
        let outcome = match self.world.propose(model, tick, rng) {
            Ok(proposal) => self.judge(proposal, condition, rng),
            Err(err) if err.is_zero_probability() => ProposalOutcome::ZeroProbability,
            Err(err) => return Err(err),
        };
        trace!(tick, outcome = outcome.as_str(), "transition");
        self.stats.record(outcome);
        Ok(outcome)
    }

    fn judge<C>(
        &mut self,
        proposal: Proposal<V>,
        condition: &C,
        rng: &mut RngHandle,
    ) -> ProposalOutcome
    where
        C: Fn(&V) -> bool,
    {
        if !condition(&proposal.value) {
            return ProposalOutcome::RejectedCondition;
        }
        let ratio = acceptance_ratio(&self.world, &proposal);
        if ratio >= 1.0 || rng.gen::<f64>() < ratio {
            self.world = proposal.world;
            self.value = proposal.value;
            ProposalOutcome::Accepted
        } else {
            ProposalOutcome::RejectedRatio
        }
    }

    /// Retained trace.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Model output of the retained trace.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Transition counters so far.
    pub fn stats(&self) -> &ChainStats {
        &self.stats
    }

    /// Tick of the most recent proposal, `INIT_TICK` before the first one.
    pub fn last_tick(&self) -> Tick {
        self.next_tick - 1
    }
}

/// Metropolis-Hastings-Green ratio `(score(new) / score(old)) * (bw / fw)`.
///
/// An undefined ratio (`0/0`) compares false against every threshold and
/// therefore rejects.
pub fn acceptance_ratio<V>(current: &World, proposal: &Proposal<V>) -> f64 {
    (proposal.world.score() / current.score()) * (proposal.backward / proposal.forward)
}

/// Executes `model` on empty traces until `condition` holds.
///
/// There is no attempt bound unless `max_attempts` is set; the condition must
/// have positive prior probability.
pub fn initialize<V, F, C>(
    model: &F,
    condition: &C,
    rng: &mut RngHandle,
    max_attempts: Option<u64>,
) -> Result<(World, V), LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
{
    search(model, condition, rng, max_attempts).map(|(world, value, _)| (world, value))
}

/// Returns `num_samples` query outputs, each taken after `num_steps` transitions.
pub fn mcmc<V, T, F, C, Q>(
    model: &F,
    condition: &C,
    query: &Q,
    num_steps: usize,
    num_samples: usize,
    rng: &mut RngHandle,
) -> Result<Vec<T>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
    Q: Fn(&V) -> T,
{
    let mut chain = Chain::start(model, condition, rng, None)?;
    let mut samples = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        for _ in 0..num_steps {
            chain.step(model, condition, rng)?;
        }
        samples.push(query(chain.value()));
    }
    Ok(samples)
}

/// Runs one chain from the configuration's seed policy.
pub fn run<V, T, F, C, Q>(
    config: &RunConfig,
    model: &F,
    condition: &C,
    query: &Q,
    cancel: Option<&CancelToken>,
) -> Result<RunSummary<T>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
    Q: Fn(&V) -> T,
{
    config.validate()?;
    run_chain(config, 0, model, condition, query, cancel)
}

/// Runs `config.chains` independent chains through `dispatch`.
///
/// Chain `i` is seeded from substream `i` of the master seed, so chain 0
/// reproduces [`run`].
pub fn run_chains<V, T, F, C, Q, D>(
    config: &RunConfig,
    dispatch: &D,
    model: &F,
    condition: &C,
    query: &Q,
    cancel: Option<&CancelToken>,
) -> Result<Vec<RunSummary<T>>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError> + Sync,
    C: Fn(&V) -> bool + Sync,
    Q: Fn(&V) -> T + Sync,
    T: Send,
    D: Dispatch,
{
    config.validate()?;
    let indices: Vec<usize> = (0..config.chains).collect();
    dispatch.map(indices, |index| {
        run_chain(config, index, model, condition, query, cancel)
    })
}

fn run_chain<V, T, F, C, Q>(
    config: &RunConfig,
    chain_index: usize,
    model: &F,
    condition: &C,
    query: &Q,
    cancel: Option<&CancelToken>,
) -> Result<RunSummary<T>, LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
    Q: Fn(&V) -> T,
{
    let mut rng = RngHandle::from_seed(determinism::chain_seed(
        config.seed_policy.master_seed,
        chain_index,
    ));
    info!(
        chain = chain_index,
        seed = rng.seed(),
        label = config.seed_policy.label.as_deref().unwrap_or(""),
        num_steps = config.num_steps,
        num_samples = config.num_samples,
        "starting chain"
    );
    let mut chain = Chain::start(model, condition, &mut rng, config.init.max_attempts)?;
    let mut samples = Vec::with_capacity(config.num_samples);
    let mut cancelled = false;

    for round in 0..config.num_samples {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            cancelled = true;
            break;
        }
        for _ in 0..config.num_steps {
            chain.step(model, condition, &mut rng)?;
        }
        samples.push(query(chain.value()));
        debug!(
            chain = chain_index,
            round,
            tick = chain.last_tick(),
            accepted = chain.stats().accepted,
            proposed = chain.stats().proposed,
            "round complete"
        );
    }

    let stats = chain.stats().clone();
    let acceptance_rate = stats.acceptance_rate();
    info!(
        chain = chain_index,
        samples = samples.len(),
        acceptance_rate,
        cancelled,
        "chain finished"
    );
    Ok(RunSummary {
        samples,
        acceptance_rate,
        final_tick: chain.last_tick(),
        stats,
        seed: rng.seed(),
        cancelled,
    })
}

pub(crate) fn execute_fresh<V, F>(model: &F, rng: &mut RngHandle) -> Result<(World, V), LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
{
    let mut world = World::new();
    let value = {
        let mut execution = Execution::new(&mut world, INIT_TICK, rng);
        model(&mut execution)?
    };
    Ok((world, value))
}

/// Repeats fresh executions until `condition` holds.
///
/// A zero raised while conditioning on observed data rejects the attempt like
/// a failed condition would; any other error aborts the search.
pub(crate) fn search<V, F, C>(
    model: &F,
    condition: &C,
    rng: &mut RngHandle,
    max_attempts: Option<u64>,
) -> Result<(World, V, u64), LmcError>
where
    F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    C: Fn(&V) -> bool,
{
    let mut attempts = 0u64;
    loop {
        if max_attempts.is_some_and(|limit| attempts >= limit) {
            return Err(LmcError::Precondition(
                ErrorInfo::new(
                    "attempt-budget-exhausted",
                    "no execution satisfied the condition",
                )
                .with_context("attempts", attempts.to_string())
                .with_hint("the condition may have zero prior probability"),
            ));
        }
        attempts += 1;
        match execute_fresh(model, rng) {
            Ok((world, value)) if condition(&value) => return Ok((world, value, attempts)),
            Ok(_) => {}
            Err(err) if err.is_conditioning_zero() => {}
            Err(err) => return Err(err),
        }
    }
}
