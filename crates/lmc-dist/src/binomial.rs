use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use lmc_core::{LmcError, Value};
use lmc_mcmc::{Choice, Execution};
use rand_distr::Distribution;
use statrs::distribution::Discrete;

use crate::support::{check_probability, invalid_parameter, kind_mismatch};

/// Bounded table of binomial probabilities keyed on `(n, k, p)`.
///
/// Once `capacity` entries are stored the oldest entry is evicted first. A
/// table is owned by the model that scores with it and shared by its choices.
#[derive(Debug)]
pub struct BinomialPmf {
    capacity: usize,
    table: Mutex<IndexMap<(u64, u64, u64), f64>>,
}

impl Default for BinomialPmf {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl BinomialPmf {
    /// Capacity used by [`BinomialPmf::default`].
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Creates an empty table holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            table: Mutex::new(IndexMap::new()),
        }
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Probability of `k` successes in `n` trials. Zero for `k > n`.
    pub fn pmf(&self, n: u64, k: u64, p: f64) -> f64 {
        if k > n {
            return 0.0;
        }
        let key = (n, k, p.to_bits());
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&prob) = table.get(&key) {
            return prob;
        }
        let prob = statrs::distribution::Binomial::new(p, n)
            .map(|dist| dist.pmf(k))
            .unwrap_or(0.0);
        if table.len() >= self.capacity {
            table.shift_remove_index(0);
        }
        table.insert(key, prob);
        prob
    }
}

fn labelled_choice(
    label: &str,
    n: u64,
    p: f64,
    table: &Arc<BinomialPmf>,
) -> Result<Arc<Choice>, LmcError> {
    check_probability(label, p)?;
    let dist = rand_distr::Binomial::new(n, p)
        .map_err(|err| invalid_parameter(label, err.to_string()))?;
    let table = Arc::clone(table);
    Ok(Choice::new(
        label,
        move |rng| Value::Int(i64::try_from(dist.sample(rng)).unwrap_or(i64::MAX)),
        move |value| match value.as_int().map(u64::try_from) {
            Some(Ok(k)) => table.pmf(n, k, p),
            _ => 0.0,
        },
    ))
}

/// Binomial choice over `n` trials with success probability `p`.
pub fn binomial_choice(n: u64, p: f64, table: &Arc<BinomialPmf>) -> Result<Arc<Choice>, LmcError> {
    labelled_choice("binomial", n, p, table)
}

/// Samples `name` as the success count of `n` trials.
pub fn binomial(
    execution: &mut Execution<'_>,
    name: &str,
    n: u64,
    p: f64,
    table: &Arc<BinomialPmf>,
) -> Result<i64, LmcError> {
    let value = execution.sample(name, &binomial_choice(n, p, table)?)?;
    value.as_int().ok_or_else(|| kind_mismatch(name, "int", &value))
}

/// Conditions `name` on an observed success count.
///
/// An impossible observation such as `observed > n` fails with a
/// zero-probability error.
pub fn binomial_fixed(
    execution: &mut Execution<'_>,
    name: &str,
    n: u64,
    p: f64,
    observed: i64,
    table: &Arc<BinomialPmf>,
) -> Result<i64, LmcError> {
    let choice = labelled_choice("binomial/fixed", n, p, table)?;
    let value = execution.set(name, &choice, Value::Int(observed))?;
    value.as_int().ok_or_else(|| kind_mismatch(name, "int", &value))
}
