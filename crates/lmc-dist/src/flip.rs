use std::sync::Arc;

use lmc_core::{LmcError, RngHandle, Value};
use lmc_mcmc::{Choice, Execution};
use rand::Rng;

use crate::support::{check_probability, kind_mismatch};

/// True with probability `p`.
pub fn sample_flip(p: f64, rng: &mut RngHandle) -> bool {
    rng.gen::<f64>() < p
}

/// `p` for `true`, `1 - p` for `false`, 0 for anything else.
pub fn score_flip(p: f64, value: &Value) -> f64 {
    match value {
        Value::Bool(true) => p,
        Value::Bool(false) => 1.0 - p,
        _ => 0.0,
    }
}

/// Bernoulli choice with success probability `p`.
pub fn flip_choice(p: f64) -> Result<Arc<Choice>, LmcError> {
    check_probability("flip", p)?;
    Ok(Choice::new(
        "flip",
        move |rng| Value::Bool(sample_flip(p, rng)),
        move |value| score_flip(p, value),
    ))
}

/// Samples `name` as a flip with success probability `p`.
pub fn flip(execution: &mut Execution<'_>, name: &str, p: f64) -> Result<bool, LmcError> {
    let value = execution.sample(name, &flip_choice(p)?)?;
    value.as_bool().ok_or_else(|| kind_mismatch(name, "bool", &value))
}
