use lmc_core::{RngHandle, Value};
use lmc_dist::flip::{sample_flip, score_flip};
use lmc_dist::geometric::{sample_geometric, score_geometric};
use lmc_dist::uniform::{score_int, score_uniform};
use lmc_dist::{flip_choice, geometric_choice, integer_choice, uniform_choice};

#[test]
fn geometric_scores_match_closed_form() {
    assert_eq!(score_geometric(0.5, &Value::Int(1)), 0.5);
    assert_eq!(score_geometric(0.5, &Value::Int(0)), 0.0);
    assert_eq!(score_geometric(0.5, &Value::Int(3)), 0.125);
    assert_eq!(score_geometric(0.5, &Value::Int(-2)), 0.0);
    assert_eq!(score_geometric(0.5, &Value::Bool(true)), 0.0);
}

#[test]
fn geometric_samples_are_positive() {
    let mut rng = RngHandle::from_seed(3);
    for _ in 0..500 {
        assert!(sample_geometric(0.4, &mut rng) >= 1);
    }
}

#[test]
fn flip_scores_both_outcomes() {
    assert_eq!(score_flip(0.3, &Value::Bool(true)), 0.3);
    assert!((score_flip(0.3, &Value::Bool(false)) - 0.7).abs() < 1e-12);
    assert_eq!(score_flip(0.3, &Value::Int(1)), 0.0);
}

#[test]
fn flip_respects_extreme_weights() {
    let mut rng = RngHandle::from_seed(11);
    for _ in 0..200 {
        assert!(sample_flip(1.0, &mut rng));
        assert!(!sample_flip(0.0, &mut rng));
    }
}

#[test]
fn uniform_density_is_closed_on_both_ends() {
    assert_eq!(score_uniform(0.0, 2.0, &Value::Real(0.0)), 0.5);
    assert_eq!(score_uniform(0.0, 2.0, &Value::Real(2.0)), 0.5);
    assert_eq!(score_uniform(0.0, 2.0, &Value::Real(2.5)), 0.0);
    assert_eq!(score_uniform(0.0, 2.0, &Value::Int(1)), 0.5);
}

#[test]
fn integer_support_is_half_open() {
    assert_eq!(score_int(0, 4, &Value::Int(0)), 0.25);
    assert_eq!(score_int(0, 4, &Value::Int(3)), 0.25);
    assert_eq!(score_int(0, 4, &Value::Int(4)), 0.0);
    assert_eq!(score_int(0, 4, &Value::Real(1.0)), 0.0);
}

#[test]
fn choices_reject_invalid_parameters() {
    assert!(flip_choice(1.5).is_err());
    assert!(geometric_choice(0.0).is_err());
    assert!(uniform_choice(1.0, 1.0).is_err());
    assert!(integer_choice(3, 2).is_err());
    let err = flip_choice(-0.1).unwrap_err();
    assert_eq!(err.info().map(|info| info.code.as_str()), Some("invalid-parameter"));
}

#[test]
fn choice_samples_stay_in_support() {
    let mut rng = RngHandle::from_seed(5);
    let uniform = uniform_choice(-1.0, 1.0).unwrap();
    let integer = integer_choice(2, 5).unwrap();
    for _ in 0..200 {
        let u = uniform.draw(&mut rng);
        assert!(uniform.score(&u) > 0.0);
        let i = integer.draw(&mut rng);
        assert!(integer.score(&i) > 0.0);
    }
}
