//! Compares rejection and MCMC estimates on a model whose branches make a
//! different number of choices. Run with `RUST_LOG=lmc_mcmc=debug` to watch
//! the chain.

use std::path::Path;

use lmc_core::LmcError;
use lmc_dist::flip;
use lmc_mcmc::metrics::{histogram, total_variation};
use lmc_mcmc::{run, run_rejection, Execution, RunConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy)]
struct Outcome {
    a: bool,
    c: bool,
}

const DEFAULT_CONFIG: &str = "\
num_steps: 1000
num_samples: 100
rejection:
  concurrency: 4
  batch_size: 100
seed_policy:
  master_seed: 7
  label: transdimensional
";

fn model(execution: &mut Execution<'_>) -> Result<Outcome, LmcError> {
    let a = flip(execution, "a", 0.5)?;
    let b = if a {
        flip(execution, "b", 0.8)?
    } else {
        let mut odd = false;
        for i in 0..50 {
            odd ^= flip(execution, &format!("z{i}"), 0.5)?;
        }
        odd
    };
    let c = flip(execution, "c", if b { 1.0 / 3.0 } else { 2.0 / 3.0 })?;
    Ok(Outcome { a, c })
}

fn main() -> Result<(), LmcError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RunConfig::load(Path::new(&path))?,
        None => RunConfig::from_yaml_str(DEFAULT_CONFIG)?,
    };
    let condition = |v: &Outcome| v.c;
    let query = |v: &Outcome| v.a;

    let mut rejection_config = config.clone();
    rejection_config.num_samples = 500;
    let exact = run_rejection(&rejection_config, &model, &condition, &query, None)?;
    let summary = run(&config, &model, &condition, &query, None)?;

    println!("rejection: {:?}", histogram(&exact));
    println!("mcmc:      {:?}", histogram(&summary.samples));
    println!(
        "acceptance rate {:.3}, total variation {:.3}",
        summary.acceptance_rate,
        total_variation(&exact, &summary.samples)
    );
    Ok(())
}
