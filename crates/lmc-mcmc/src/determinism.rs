use lmc_core::derive_substream_seed;

/// Derives the deterministic seed used for a specific chain.
pub fn chain_seed(master_seed: u64, chain_index: usize) -> u64 {
    derive_substream_seed(master_seed, chain_index as u64)
}

/// Derives the deterministic seed for one rejection sample.
///
/// The seed depends on the sample index only, so any dispatch backend
/// reproduces the same samples.
pub fn sample_seed(master_seed: u64, sample_index: usize) -> u64 {
    derive_substream_seed(master_seed ^ 0xA5A5_A5A5_A5A5_A5A5, sample_index as u64)
}
