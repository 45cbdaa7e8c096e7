use std::sync::Arc;

use lmc_core::{LmcError, RngHandle, Value, INIT_TICK};
use lmc_mcmc::{Choice, World};
use rand::Rng;

fn coin(p: f64) -> Arc<Choice> {
    Choice::new(
        "coin",
        move |rng| Value::Bool(rng.gen::<f64>() < p),
        move |value| match value {
            Value::Bool(true) => p,
            Value::Bool(false) => 1.0 - p,
            _ => 0.0,
        },
    )
}

fn die() -> Arc<Choice> {
    Choice::new(
        "die",
        |rng| Value::Int(rng.gen_range(1..=6)),
        |value| match value.as_int() {
            Some(v) if (1..=6).contains(&v) => 1.0 / 6.0,
            _ => 0.0,
        },
    )
}

#[test]
fn new_name_is_sampled_and_recorded() {
    let mut world = World::new();
    let mut rng = RngHandle::from_seed(4);
    let value = die().sample(&mut world, "roll", INIT_TICK, &mut rng).unwrap();
    let draw = world.get("roll").unwrap();
    assert_eq!(draw.value, value);
    assert_eq!(draw.tick_created, INIT_TICK);
    assert_eq!(draw.tick_touched, INIT_TICK);
    assert!(!draw.fixed);
    assert_eq!(draw.choice().label(), "die");
}

#[test]
fn revisit_keeps_value_and_updates_touch_tick() {
    let mut world = World::new();
    let mut rng = RngHandle::from_seed(4);
    let first = die().sample(&mut world, "roll", INIT_TICK, &mut rng).unwrap();
    for tick in 0..20 {
        let again = die().sample(&mut world, "roll", tick, &mut rng).unwrap();
        assert_eq!(again, first);
    }
    let draw = world.get("roll").unwrap();
    assert_eq!(draw.tick_created, INIT_TICK);
    assert_eq!(draw.tick_touched, 19);
    assert_eq!(world.len(), 1);
}

#[test]
fn revisit_rebinds_to_the_new_choice() {
    let mut world = World::new();
    let mut rng = RngHandle::from_seed(9);
    coin(0.5).sample(&mut world, "c", INIT_TICK, &mut rng).unwrap();
    let stored = world.get("c").unwrap().value;
    coin(0.9).sample(&mut world, "c", 0, &mut rng).unwrap();
    let expected = if stored == Value::Bool(true) { 0.9 } else { 0.1 };
    assert!((world.get("c").unwrap().score() - expected).abs() < 1e-12);
}

#[test]
fn revisit_with_zero_score_fails() {
    let mut world = World::new();
    let mut rng = RngHandle::from_seed(1);
    die().sample(&mut world, "x", INIT_TICK, &mut rng).unwrap();
    let err = coin(0.5).sample(&mut world, "x", 0, &mut rng).unwrap_err();
    assert_eq!(
        err,
        LmcError::ZeroProbability {
            name: "x".into(),
            label: "coin".into(),
            conditioned: false,
        }
    );
}

#[test]
fn set_fixes_the_observed_value() {
    let mut world = World::new();
    let mut rng = RngHandle::from_seed(1);
    die().sample(&mut world, "roll", INIT_TICK, &mut rng).unwrap();
    let value = die().set(&mut world, "roll", 0, Value::Int(6)).unwrap();
    assert_eq!(value, Value::Int(6));
    let draw = world.get("roll").unwrap();
    assert!(draw.fixed);
    assert_eq!(draw.value, Value::Int(6));
    assert_eq!(world.proposable_count(), 0);
}

#[test]
fn set_with_impossible_value_fails_as_conditioned() {
    let mut world = World::new();
    let err = die().set(&mut world, "roll", INIT_TICK, Value::Int(7)).unwrap_err();
    assert!(err.is_conditioning_zero());

    let mut world = World::new();
    die().set(&mut world, "roll", INIT_TICK, Value::Int(2)).unwrap();
    let err = die().set(&mut world, "roll", 0, Value::Int(0)).unwrap_err();
    assert!(err.is_conditioning_zero());
}
