#![deny(missing_docs)]
#![doc = "Simple search, bisection, secant and Newton-Raphson root finders, a sign-change scan, and an efficiency survey comparing them."]

pub mod bracket;
/// Root functions with closed-form derivatives.
pub mod functions;
pub mod open;
mod options;
/// Sign-change scan over an interval.
pub mod scan;
/// Efficiency comparison of the root finders.
pub mod survey;

pub use bracket::{root_bisection, root_simple};
pub use functions::{ParseFunctionError, RootFunction};
pub use open::{root_secant, root_tangent};
pub use options::{RootOpts, RootOutcome};
pub use scan::{find_roots, ScanOpts, MAX_SCAN_SAMPLES};
pub use survey::{survey, Algorithm, AlgorithmRun, RootReport};
