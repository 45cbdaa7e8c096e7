#![deny(missing_docs)]
#![doc = "Trace-based single-site Metropolis-Hastings engine with a reversible-jump correction, plus an exact rejection sampler."]

//! Models are plain closures over an [`Execution`]; every random choice they
//! make is bound to a name in a [`World`].

/// Cooperative cancellation token.
pub mod cancel;
/// Distribution descriptors bound to names at execution time.
pub mod choice;
/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Sequential and thread-pool execution backends.
pub mod dispatch;
/// Recorded draws.
pub mod draw;
/// Handle threaded through a model execution.
pub mod execution;
/// Markov chain kernel and public `mcmc`/`run` entry points.
pub mod kernel;
/// Transition counters and empirical distribution helpers.
pub mod metrics;
/// Batched rejection sampler.
pub mod rejection;
/// Traces and the proposal procedure.
pub mod world;

pub use cancel::CancelToken;
pub use choice::Choice;
pub use config::{InitConfig, RejectionConfig, RunConfig, SeedPolicy};
pub use dispatch::{Dispatch, RayonDispatch, Sequential};
pub use draw::Draw;
pub use execution::Execution;
pub use kernel::{acceptance_ratio, initialize, mcmc, run, run_chains, Chain, RunSummary};
pub use metrics::{ChainStats, ProposalOutcome};
pub use rejection::{rejection, run_rejection, single_rejection, RejectionOptions};
pub use world::{CleanIncrements, Proposal, World};
