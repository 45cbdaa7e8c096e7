use std::sync::Arc;

use lmc_core::errors::ErrorInfo;
use lmc_core::{LmcError, RngHandle, Value};
use lmc_mcmc::{Choice, Execution};
use rand::Rng;

use crate::support::{invalid_parameter, kind_mismatch};

fn check_range<T: PartialOrd + std::fmt::Display>(
    family: &str,
    low: T,
    high: T,
) -> Result<(), LmcError> {
    if low < high {
        Ok(())
    } else {
        Err(invalid_parameter(family, format!("empty range [{low}, {high})")))
    }
}

/// Uniform real in `[low, high)`.
pub fn sample_uniform(low: f64, high: f64, rng: &mut RngHandle) -> f64 {
    rng.gen_range(low..high)
}

/// Density `1 / (high - low)` on the closed interval, 0 outside.
pub fn score_uniform(low: f64, high: f64, value: &Value) -> f64 {
    match value.as_real() {
        Some(v) if v >= low && v <= high => 1.0 / (high - low),
        _ => 0.0,
    }
}

/// Uniform real choice on `[low, high]`.
pub fn uniform_choice(low: f64, high: f64) -> Result<Arc<Choice>, LmcError> {
    check_range("uniform", low, high)?;
    if !(high - low).is_finite() {
        return Err(invalid_parameter("uniform", "range width must be finite"));
    }
    Ok(Choice::new(
        "uniform",
        move |rng| Value::Real(sample_uniform(low, high, rng)),
        move |value| score_uniform(low, high, value),
    ))
}

/// Samples `name` uniformly from `[low, high]`.
pub fn uniform(
    execution: &mut Execution<'_>,
    name: &str,
    low: f64,
    high: f64,
) -> Result<f64, LmcError> {
    let value = execution.sample(name, &uniform_choice(low, high)?)?;
    value.as_real().ok_or_else(|| kind_mismatch(name, "real", &value))
}

/// Uniform integer in `[low, high)`.
pub fn sample_int(low: i64, high: i64, rng: &mut RngHandle) -> i64 {
    rng.gen_range(low..high)
}

/// `1 / (high - low)` inside `[low, high)`, 0 outside.
pub fn score_int(low: i64, high: i64, value: &Value) -> f64 {
    match value.as_int() {
        Some(v) if v >= low && v < high => 1.0 / (high - low) as f64,
        _ => 0.0,
    }
}

/// Uniform integer choice on `[low, high)`.
pub fn integer_choice(low: i64, high: i64) -> Result<Arc<Choice>, LmcError> {
    check_range("sample_int", low, high)?;
    Ok(Choice::new(
        "sample_int",
        move |rng| Value::Int(sample_int(low, high, rng)),
        move |value| score_int(low, high, value),
    ))
}

/// Samples `name` uniformly from the integers in `[low, high)`.
pub fn sample_integer(
    execution: &mut Execution<'_>,
    name: &str,
    low: i64,
    high: i64,
) -> Result<i64, LmcError> {
    let value = execution.sample(name, &integer_choice(low, high)?)?;
    value.as_int().ok_or_else(|| kind_mismatch(name, "int", &value))
}

/// Picks one element of `items` uniformly; the draw records the index.
///
/// When the list shrinks between executions, a stored index past the end
/// scores zero and the execution fails with a zero-probability error.
pub fn list_draw<T: Clone>(
    execution: &mut Execution<'_>,
    name: &str,
    items: &[T],
) -> Result<T, LmcError> {
    let len = i64::try_from(items.len())
        .map_err(|_| invalid_parameter("list_draw", "list is too long to index"))?;
    let index = sample_integer(execution, name, 0, len)?;
    usize::try_from(index)
        .ok()
        .and_then(|index| items.get(index))
        .cloned()
        .ok_or_else(|| {
            LmcError::Value(
                ErrorInfo::new("list-index", "stored index is outside the list")
                    .with_context("name", name)
                    .with_context("index", index.to_string()),
            )
        })
}
