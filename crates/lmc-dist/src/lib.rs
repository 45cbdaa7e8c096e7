#![deny(missing_docs)]
#![doc = "Distribution families for lightmc models: flip, geometric, uniform, integer, list and binomial choices."]

/// Binomial sampling, conditioning and the bounded pmf table.
pub mod binomial;
/// Bernoulli flips.
pub mod flip;
/// Geometric counts on `1, 2, ...`.
pub mod geometric;
/// Uniform reals, uniform integers and list draws.
pub mod uniform;

mod support;

pub use binomial::{binomial, binomial_choice, binomial_fixed, BinomialPmf};
pub use flip::{flip, flip_choice};
pub use geometric::{geometric, geometric_choice};
pub use uniform::{integer_choice, list_draw, sample_integer, uniform, uniform_choice};
