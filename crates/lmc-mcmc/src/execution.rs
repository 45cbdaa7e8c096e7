use std::sync::Arc;

use lmc_core::{LmcError, RngHandle, Tick, Value};

use crate::choice::Choice;
use crate::world::World;

/// Handle passed to a model for one execution.
///
/// It pins the trace, the tick and the random stream together so every
/// choice of the execution lands in the same world at the same tick.
pub struct Execution<'a> {
    world: &'a mut World,
    tick: Tick,
    rng: &'a mut RngHandle,
}

impl<'a> Execution<'a> {
    /// Wraps `world` for an execution at `tick`.
    pub fn new(world: &'a mut World, tick: Tick, rng: &'a mut RngHandle) -> Self {
        Self { world, tick, rng }
    }

    /// Tick of this execution.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Read access to the trace being built.
    pub fn world(&self) -> &World {
        &*self.world
    }

    /// Binds `name` to `choice`; see [`Choice::sample`].
    pub fn sample(&mut self, name: &str, choice: &Arc<Choice>) -> Result<Value, LmcError> {
        choice.sample(&mut *self.world, name, self.tick, &mut *self.rng)
    }

    /// Binds `name` to the observed `value`; see [`Choice::set`].
    pub fn set(
        &mut self,
        name: &str,
        choice: &Arc<Choice>,
        value: Value,
    ) -> Result<Value, LmcError> {
        choice.set(&mut *self.world, name, self.tick, value)
    }
}
