use std::fmt;
use std::sync::Arc;

use lmc_core::{LmcError, RngHandle, Tick, Value};

use crate::draw::Draw;
use crate::world::World;

type SampleFn = dyn Fn(&mut RngHandle) -> Value + Send + Sync;
type ScoreFn = dyn Fn(&Value) -> f64 + Send + Sync;

/// Sampler, scorer and label describing one distribution at one call site.
///
/// Choices are rebuilt on every model execution. Only the name a draw is bound
/// to carries identity across executions; the choice itself is a shared,
/// read-only description.
pub struct Choice {
    label: String,
    sampler: Box<SampleFn>,
    scorer: Box<ScoreFn>,
}

impl Choice {
    /// Builds a shared choice from a sampler and a scorer.
    pub fn new<S, P>(label: impl Into<String>, sampler: S, scorer: P) -> Arc<Self>
    where
        S: Fn(&mut RngHandle) -> Value + Send + Sync + 'static,
        P: Fn(&Value) -> f64 + Send + Sync + 'static,
    {
        Arc::new(Self {
            label: label.into(),
            sampler: Box::new(sampler),
            scorer: Box::new(scorer),
        })
    }

    /// Human readable label of the distribution family.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Draws a fresh value.
    pub fn draw(&self, rng: &mut RngHandle) -> Value {
        (self.sampler)(rng)
    }

    /// Probability (or density) of `value` under this choice.
    pub fn score(&self, value: &Value) -> f64 {
        (self.scorer)(value)
    }

    /// Binds `name` in `world` to this choice and returns its value.
    ///
    /// A revisited name keeps its stored value; only the owning choice and the
    /// touch tick are updated. A new name gets a freshly sampled value.
    pub fn sample(
        self: &Arc<Self>,
        world: &mut World,
        name: &str,
        tick: Tick,
        rng: &mut RngHandle,
    ) -> Result<Value, LmcError> {
        if let Some(draw) = world.get_mut(name) {
            draw.rebind(Arc::clone(self), tick);
            if draw.score() == 0.0 {
                return Err(LmcError::zero_probability(name, &self.label, draw.fixed));
            }
            return Ok(draw.value);
        }
        let value = self.draw(rng);
        world.insert(name, Draw::new(value, Arc::clone(self), tick, false));
        Ok(value)
    }

    /// Binds `name` in `world` to the observed `fixed_val`.
    ///
    /// The draw is marked fixed and is never picked for resampling.
    pub fn set(
        self: &Arc<Self>,
        world: &mut World,
        name: &str,
        tick: Tick,
        fixed_val: Value,
    ) -> Result<Value, LmcError> {
        let score = match world.get_mut(name) {
            Some(draw) => {
                draw.rebind(Arc::clone(self), tick);
                draw.value = fixed_val;
                draw.fixed = true;
                draw.score()
            }
            None => world
                .insert(name, Draw::new(fixed_val, Arc::clone(self), tick, true))
                .score(),
        };
        if score == 0.0 {
            return Err(LmcError::zero_probability(name, &self.label, true));
        }
        Ok(fixed_val)
    }
}

impl fmt::Debug for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choice")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
