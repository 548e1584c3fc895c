#![deny(missing_docs)]
#![doc = "Composite trapezoid and Simpson rules, the adaptive trapezoid, and a small integrand catalog for checking them against closed forms."]

pub mod adaptive;
pub mod catalog;
/// Method comparison and evaluation counting.
pub mod compare;
pub mod fixed;

pub use adaptive::{
    adaptive_trapezoid, adaptive_trapezoid_observed, recomputing_trapezoid, AdaptiveOpts,
    AdaptiveOutcome, MAX_REFINEMENT_LIMIT,
};
pub use catalog::{parse_bound, Integrand, ParseIntegrandError};
pub use compare::{compare, run_method, ComparisonReport, Counted, Method, MethodRun};
pub use fixed::{simpson, trapezoid};
