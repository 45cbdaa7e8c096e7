mod support;

use std::sync::Arc;

use lmc_core::RngHandle;
use lmc_dist::BinomialPmf;
use lmc_mcmc::metrics::{histogram, total_variation};
use lmc_mcmc::{mcmc, rejection, RejectionOptions, Sequential};

use support::{bag_model, branching, branching_posterior, two_flips, Branching, OBSERVED_BAGS};

fn frequency(samples: &[bool]) -> f64 {
    samples.iter().filter(|hit| **hit).count() as f64 / samples.len() as f64
}

#[test]
fn fixed_dimension_chain_matches_rejection() {
    let condition = |v: &(bool, bool)| v.0 || v.1;
    let query = |v: &(bool, bool)| v.0;
    let mut rng = RngHandle::from_seed(7);
    let chain = mcmc(&two_flips, &condition, &query, 10, 3000, &mut rng).unwrap();
    let exact = rejection(
        &two_flips,
        &condition,
        &query,
        3000,
        7,
        &Sequential,
        RejectionOptions::default(),
    )
    .unwrap();
    assert_eq!(chain.len(), 3000);
    assert!((frequency(&chain) - 2.0 / 3.0).abs() < 0.05);
    assert!((frequency(&exact) - 2.0 / 3.0).abs() < 0.04);
    assert!(total_variation(&chain, &exact) < 0.06);
}

#[test]
fn transdimensional_chain_matches_rejection() {
    let condition = |v: &Branching| v.c;
    let query = |v: &Branching| v.a;
    let target = branching_posterior();

    let exact = rejection(
        &branching,
        &condition,
        &query,
        4000,
        11,
        &Sequential,
        RejectionOptions::default(),
    )
    .unwrap();
    assert!((frequency(&exact) - target).abs() < 0.04);

    let mut rng = RngHandle::from_seed(11);
    let chain = mcmc(&branching, &condition, &query, 25, 4000, &mut rng).unwrap();
    assert!((frequency(&chain) - target).abs() < 0.06);
    assert!(total_variation(&chain, &exact) < 0.08);
}

#[test]
fn hierarchical_bags_yield_positive_type_counts() {
    let model = bag_model(Arc::new(BinomialPmf::default()));
    let condition = |v: &support::Bags| v.samples == OBSERVED_BAGS;
    let query = |v: &support::Bags| v.num_bag_types;
    let mut rng = RngHandle::from_seed(7);
    let samples = mcmc(&model, &condition, &query, 100, 10, &mut rng).unwrap();
    assert_eq!(samples.len(), 10);
    assert!(samples.iter().all(|n| *n >= 1));
    let summary = histogram(&samples);
    let mass: f64 = summary.iter().map(|(_, freq)| freq).sum();
    assert!((mass - 1.0).abs() < 1e-12);
}
