#![deny(missing_docs)]
#![doc = "Shared error, configuration, observer and serialization types for the quadkit crates."]

/// YAML configuration with validated defaults.
pub mod config;
pub mod errors;
/// Stable hashing helpers for reports.
pub mod hash;
pub mod observe;
/// Canonical JSON helpers.
pub mod serde;
mod types;

pub use config::{QuadConfig, QuadratureConfig, RootConfig, MAX_REFINEMENT_LIMIT};
pub use errors::{ErrorInfo, QuadError};
pub use hash::{round_f64, stable_hash_string};
pub use observe::{Observer, Refinement, RootStep, Silent, Trace};
pub use types::Interval;
