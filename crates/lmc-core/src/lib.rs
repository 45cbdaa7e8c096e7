#![deny(missing_docs)]
#![doc = "Core data types for the lightmc trace engine: errors, dynamic values, ticks and deterministic RNG handles."]

pub mod errors;
pub mod rng;
mod value;

pub use errors::{ErrorInfo, LmcError};
pub use rng::{derive_substream_seed, RngHandle};
pub use value::Value;

/// Identifier of one model execution. Initialization and rejection runs use [`INIT_TICK`].
pub type Tick = i64;

/// Tick used for executions on a fresh, empty trace.
pub const INIT_TICK: Tick = -1;

/// Result alias used throughout the workspace.
pub type LmcResult<T> = Result<T, LmcError>;
