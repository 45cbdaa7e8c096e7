use std::sync::Arc;

use lmc_core::{LmcError, RngHandle, Value};
use lmc_mcmc::{Choice, Execution};

use crate::flip::sample_flip;
use crate::support::{check_probability, invalid_parameter, kind_mismatch};

/// Number of flips up to and including the first success.
pub fn sample_geometric(p: f64, rng: &mut RngHandle) -> i64 {
    if sample_flip(p, rng) {
        1
    } else {
        1 + sample_geometric(p, rng)
    }
}

/// `(1 - p)^(n - 1) * p` for `n >= 1`, else 0.
pub fn score_geometric(p: f64, value: &Value) -> f64 {
    match value.as_int() {
        Some(n) if n >= 1 => (1.0 - p).powf((n - 1) as f64) * p,
        _ => 0.0,
    }
}

/// Geometric choice with success probability `p`, which must be positive.
pub fn geometric_choice(p: f64) -> Result<Arc<Choice>, LmcError> {
    check_probability("geometric", p)?;
    if p == 0.0 {
        return Err(invalid_parameter("geometric", "success probability must be positive"));
    }
    Ok(Choice::new(
        "geometric",
        move |rng| Value::Int(sample_geometric(p, rng)),
        move |value| score_geometric(p, value),
    ))
}

/// Samples `name` from a geometric distribution on `1, 2, ...`.
pub fn geometric(execution: &mut Execution<'_>, name: &str, p: f64) -> Result<i64, LmcError> {
    let value = execution.sample(name, &geometric_choice(p)?)?;
    value.as_int().ok_or_else(|| kind_mismatch(name, "int", &value))
}
