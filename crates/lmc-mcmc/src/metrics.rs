use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of evaluating one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProposalOutcome {
    /// The proposal replaced the retained state.
    Accepted,
    /// The Metropolis-Hastings-Green draw rejected the proposal.
    RejectedRatio,
    /// The proposal violated the hard condition.
    RejectedCondition,
    /// The re-execution hit a zero-probability draw.
    ZeroProbability,
}

impl ProposalOutcome {
    /// Stable name used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalOutcome::Accepted => "accepted",
            ProposalOutcome::RejectedRatio => "rejected-ratio",
            ProposalOutcome::RejectedCondition => "rejected-condition",
            ProposalOutcome::ZeroProbability => "zero-probability",
        }
    }
}

/// Per-chain transition counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    /// Number of transitions attempted.
    pub proposed: usize,
    /// Proposals that were accepted.
    pub accepted: usize,
    /// Proposals rejected by the acceptance draw.
    pub rejected_ratio: usize,
    /// Proposals rejected by the hard condition.
    pub rejected_condition: usize,
    /// Proposals rejected because the re-execution scored zero.
    pub zero_probability: usize,
    /// Executions spent finding an initial state.
    pub init_attempts: u64,
}

impl ChainStats {
    /// Records the outcome of one transition.
    pub fn record(&mut self, outcome: ProposalOutcome) {
        self.proposed += 1;
        match outcome {
            ProposalOutcome::Accepted => self.accepted += 1,
            ProposalOutcome::RejectedRatio => self.rejected_ratio += 1,
            ProposalOutcome::RejectedCondition => self.rejected_condition += 1,
            ProposalOutcome::ZeroProbability => self.zero_probability += 1,
        }
    }

    /// Fraction of accepted proposals (0 when nothing was proposed).
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }

    /// Counters keyed by outcome name.
    pub fn by_outcome(&self) -> BTreeMap<String, usize> {
        [
            (ProposalOutcome::Accepted, self.accepted),
            (ProposalOutcome::RejectedRatio, self.rejected_ratio),
            (ProposalOutcome::RejectedCondition, self.rejected_condition),
            (ProposalOutcome::ZeroProbability, self.zero_probability),
        ]
        .into_iter()
        .map(|(outcome, count)| (outcome.as_str().to_string(), count))
        .collect()
    }

    /// Adds the counters of another chain.
    pub fn merge(&mut self, other: &ChainStats) {
        self.proposed += other.proposed;
        self.accepted += other.accepted;
        self.rejected_ratio += other.rejected_ratio;
        self.rejected_condition += other.rejected_condition;
        self.zero_probability += other.zero_probability;
        self.init_attempts += other.init_attempts;
    }
}

/// Sorted `(value, frequency)` pairs of the observed samples.
pub fn histogram<T: Ord + Clone>(samples: &[T]) -> Vec<(T, f64)> {
    if samples.is_empty() {
        return Vec::new();
    }
    let mut counts = BTreeMap::<T, usize>::new();
    for sample in samples {
        *counts.entry(sample.clone()).or_insert(0) += 1;
    }
    let total = samples.len() as f64;
    counts
        .into_iter()
        .map(|(value, count)| (value, count as f64 / total))
        .collect()
}

/// Total variation distance between two empirical distributions.
pub fn total_variation<T: Ord + Clone>(a: &[T], b: &[T]) -> f64 {
    let mut mass = BTreeMap::<T, (f64, f64)>::new();
    for (value, freq) in histogram(a) {
        mass.entry(value).or_insert((0.0, 0.0)).0 = freq;
    }
    for (value, freq) in histogram(b) {
        mass.entry(value).or_insert((0.0, 0.0)).1 = freq;
    }
    0.5 * mass.values().map(|(p, q)| (p - q).abs()).sum::<f64>()
}
