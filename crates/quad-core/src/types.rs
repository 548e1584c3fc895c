use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, QuadError};

/// Integration bounds `(a, b)`.
///
/// `a > b` is allowed and flips the sign of every estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower limit of integration.
    pub a: f64,
    /// Upper limit of integration.
    pub b: f64,
}

impl Interval {
    /// Builds an interval after checking both bounds are finite.
    pub fn new(a: f64, b: f64) -> Result<Self, QuadError> {
        for (name, value) in [("a", a), ("b", b)] {
            if !value.is_finite() {
                return Err(QuadError::InvalidArgument(
                    ErrorInfo::new("non-finite-bound", "integration bounds must be finite")
                        .with_context(name, value),
                ));
            }
        }
        Ok(Self { a, b })
    }

    /// Signed width `b - a`.
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Returns true when both bounds coincide.
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Step width for `n` equal subintervals.
    pub fn step(&self, n: usize) -> f64 {
        self.width() / n as f64
    }
}
