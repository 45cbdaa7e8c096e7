use std::fmt;
use std::sync::Arc;

use lmc_core::{RngHandle, Tick, Value};

use crate::choice::Choice;

/// One realized choice recorded inside a [`World`](crate::World).
#[derive(Clone)]
pub struct Draw {
    /// Stored outcome.
    pub value: Value,
    /// Tick of the latest execution that bound this draw.
    pub tick_touched: Tick,
    /// Tick of the execution that created this draw.
    pub tick_created: Tick,
    /// Observed values are fixed and never resampled.
    pub fixed: bool,
    choice: Arc<Choice>,
}

impl Draw {
    /// Creates a draw touched and created at `tick`.
    pub fn new(value: Value, choice: Arc<Choice>, tick: Tick, fixed: bool) -> Self {
        Self {
            value,
            tick_touched: tick,
            tick_created: tick,
            fixed,
            choice,
        }
    }

    /// Choice currently owning the draw.
    pub fn choice(&self) -> &Arc<Choice> {
        &self.choice
    }

    /// Score of the stored value under the owning choice. Never cached.
    pub fn score(&self) -> f64 {
        self.choice.score(&self.value)
    }

    /// Replaces the stored value with a fresh sample from the owning choice.
    pub fn resample(&mut self, rng: &mut RngHandle) {
        self.value = self.choice.draw(rng);
    }

    pub(crate) fn rebind(&mut self, choice: Arc<Choice>, tick: Tick) {
        self.choice = choice;
        self.tick_touched = tick;
    }

    /// True when the draw was created by the execution at `tick`.
    pub fn created_at(&self, tick: Tick) -> bool {
        self.tick_created == tick
    }

    /// True when neither the creation nor the latest touch happened at `tick`.
    pub fn is_stale(&self, tick: Tick) -> bool {
        self.tick_created != tick && self.tick_touched != tick
    }
}

impl fmt::Debug for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: v={}, p={}",
            self.choice.label(),
            self.value,
            self.score()
        )
    }
}
