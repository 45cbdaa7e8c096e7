#![allow(dead_code)]

use std::sync::Arc;

use lmc_core::LmcError;
use lmc_dist::{binomial_fixed, flip, geometric, list_draw, uniform, BinomialPmf};
use lmc_mcmc::Execution;

/// Outcome of the branching model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branching {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

/// `a` picks between a single flip and the parity of three flips, so the two
/// branches carry a different number of draws.
pub fn branching(execution: &mut Execution<'_>) -> Result<Branching, LmcError> {
    let a = flip(execution, "a", 0.5)?;
    let b = if a {
        flip(execution, "b1", 0.8)?
    } else {
        let mut odd = false;
        for i in 0..3 {
            odd ^= flip(execution, &format!("p{i}"), 0.3)?;
        }
        odd
    };
    let c = flip(execution, "c", if b { 0.9 } else { 0.2 })?;
    Ok(Branching { a, b, c })
}

/// `P(a | c)` for [`branching`].
pub fn branching_posterior() -> f64 {
    let odd = (1.0 - (1.0f64 - 2.0 * 0.3).powi(3)) / 2.0;
    let c_given_a = 0.8 * 0.9 + 0.2 * 0.2;
    let c_given_not_a = odd * 0.9 + (1.0 - odd) * 0.2;
    c_given_a / (c_given_a + c_given_not_a)
}

/// Two fair flips.
pub fn two_flips(execution: &mut Execution<'_>) -> Result<(bool, bool), LmcError> {
    let a = flip(execution, "a", 0.5)?;
    let b = flip(execution, "b", 0.5)?;
    Ok((a, b))
}

/// Observed success counts of ten bags, ten trials each.
pub const OBSERVED_BAGS: [i64; 10] = [1, 1, 1, 1, 1, 10, 10, 10, 10, 10];

/// Outcome of the bag model.
#[derive(Debug, Clone, PartialEq)]
pub struct Bags {
    pub num_bag_types: i64,
    pub samples: Vec<i64>,
}

/// An unknown number of bag types, each bag drawing its success rate from one
/// of them.
pub fn bag_model(
    table: Arc<BinomialPmf>,
) -> impl Fn(&mut Execution<'_>) -> Result<Bags, LmcError> + Send + Sync {
    move |execution: &mut Execution<'_>| {
        let num_bag_types = geometric(execution, "num_bag_types", 0.4)?;
        let mut bag_ps = Vec::new();
        for i in 0..num_bag_types {
            bag_ps.push(uniform(execution, &format!("bag_type_p_{i}"), 0.0, 1.0)?);
        }
        let mut samples = Vec::with_capacity(OBSERVED_BAGS.len());
        for (bag, observed) in OBSERVED_BAGS.iter().enumerate() {
            let bag_p = list_draw(execution, &format!("bag_p_{bag}"), &bag_ps)?;
            samples.push(binomial_fixed(
                execution,
                &format!("bag_k_{bag}"),
                10,
                bag_p,
                *observed,
                &table,
            )?);
        }
        Ok(Bags {
            num_bag_types,
            samples,
        })
    }
}
