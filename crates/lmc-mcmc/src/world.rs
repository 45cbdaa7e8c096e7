use indexmap::IndexMap;
use lmc_core::errors::ErrorInfo;
use lmc_core::{LmcError, RngHandle, Tick};
use rand::Rng;
use tracing::trace;

use crate::draw::Draw;
use crate::execution::Execution;

/// Score products accumulated by [`World::clean`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanIncrements {
    /// Product of the scores of draws created at the cleaned tick.
    pub forward: f64,
    /// Product of the scores of the draws that were removed.
    pub backward: f64,
    /// Number of removed draws.
    pub removed: usize,
}

/// Perturbed trace returned by [`World::propose`].
#[derive(Debug, Clone)]
pub struct Proposal<V> {
    /// Trace after re-execution and cleanup.
    pub world: World,
    /// Model output of the re-execution.
    pub value: V,
    /// Probability of the reverse move.
    pub backward: f64,
    /// Probability of this move.
    pub forward: f64,
    /// Name of the draw that was resampled.
    pub resampled: String,
}

/// Trace of one model execution: every named choice and its recorded draw.
///
/// Iteration follows insertion order, which keeps seeded runs reproducible.
#[derive(Debug, Clone, Default)]
pub struct World {
    draws: IndexMap<String, Draw>,
}

impl World {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True when no draw is recorded.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Looks up the draw bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Draw> {
        self.draws.get(name)
    }

    /// Mutable lookup of the draw bound to `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Draw> {
        self.draws.get_mut(name)
    }

    /// True when `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.draws.contains_key(name)
    }

    /// Iterates over `(name, draw)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Draw)> {
        self.draws.iter().map(|(name, draw)| (name.as_str(), draw))
    }

    /// Names of the recorded draws in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.draws.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, name: &str, draw: Draw) -> &mut Draw {
        let (index, _) = self.draws.insert_full(name.to_owned(), draw);
        &mut self.draws[index]
    }

    /// Product of all draw scores. The empty trace scores 1.
    pub fn score(&self) -> f64 {
        self.draws.values().map(Draw::score).product()
    }

    /// Number of draws eligible for resampling.
    pub fn proposable_count(&self) -> usize {
        self.draws.values().filter(|draw| !draw.fixed).count()
    }

    /// Drops draws the execution at `tick` neither created nor touched.
    pub fn clean(&mut self, tick: Tick) -> CleanIncrements {
        let mut increments = CleanIncrements {
            forward: 1.0,
            backward: 1.0,
            removed: 0,
        };
        self.draws.retain(|_, draw| {
            if draw.created_at(tick) {
                increments.forward *= draw.score();
                true
            } else if draw.is_stale(tick) {
                increments.backward *= draw.score();
                increments.removed += 1;
                false
            } else {
                true
            }
        });
        increments
    }

    /// Resamples one proposable draw, re-executes `model` at `tick` and
    /// reports the forward and reverse proposal probabilities.
    ///
    /// `self` is left untouched; the perturbed trace lives in the returned
    /// [`Proposal`]. A zero-probability re-execution surfaces as
    /// [`LmcError::ZeroProbability`].
    pub fn propose<V, F>(
        &self,
        model: &F,
        tick: Tick,
        rng: &mut RngHandle,
    ) -> Result<Proposal<V>, LmcError>
    where
        F: Fn(&mut Execution<'_>) -> Result<V, LmcError>,
    {
        let mut world = self.clone();
        let proposable: Vec<usize> = world
            .draws
            .values()
            .enumerate()
            .filter(|(_, draw)| !draw.fixed)
            .map(|(index, _)| index)
            .collect();
        if proposable.is_empty() {
            return Err(LmcError::Precondition(
                ErrorInfo::new("no-proposable-draws", "trace has no proposable draws")
                    .with_context("draws", self.len().to_string())
                    .with_hint("a model whose choices are all fixed cannot be explored by MCMC"),
            ));
        }
        let picked = proposable[rng.gen_range(0..proposable.len())];
        let Some((name, draw)) = world.draws.get_index_mut(picked) else {
            return Err(LmcError::Precondition(
                ErrorInfo::new("draw-index", "selected draw vanished from the trace")
                    .with_context("index", picked.to_string()),
            ));
        };
        let resampled = name.clone();
        let score_pre = draw.score();
        draw.resample(rng);
        let score_post = draw.score();

        let value = {
            let mut execution = Execution::new(&mut world, tick, rng);
            model(&mut execution)?
        };
        let increments = world.clean(tick);
        let proposable_post = world.proposable_count();

        let backward = selection_probability(proposable_post) * score_pre * increments.backward;
        let forward = selection_probability(proposable.len()) * score_post * increments.forward;
        trace!(
            tick,
            name = %resampled,
            created_score = increments.forward,
            removed = increments.removed,
            backward,
            forward,
            "proposal evaluated"
        );
        Ok(Proposal {
            world,
            value,
            backward,
            forward,
            resampled,
        })
    }
}

fn selection_probability(count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        1.0 / count as f64
    }
}
