use quad_core::{ErrorInfo, QuadError, RootConfig};
use serde::{Deserialize, Serialize};

fn default_accuracy() -> f64 {
    1e-6
}

fn default_max_steps() -> usize {
    1000
}

/// Stopping rule shared by every root finder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootOpts {
    /// Stop once the step size falls to this value.
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    /// Steps allowed before giving up.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for RootOpts {
    fn default() -> Self {
        Self {
            accuracy: default_accuracy(),
            max_steps: default_max_steps(),
        }
    }
}

impl RootOpts {
    /// Options with explicit accuracy and step budget.
    pub fn new(accuracy: f64, max_steps: usize) -> Self {
        Self {
            accuracy,
            max_steps,
        }
    }

    /// Budget for bracketing searches taken from a configuration.
    pub fn bracketing(config: &RootConfig) -> Self {
        Self::new(config.accuracy, config.bracket_steps)
    }

    /// Budget for open methods taken from a configuration.
    pub fn open(config: &RootConfig) -> Self {
        Self::new(config.accuracy, config.open_steps)
    }

    pub(crate) fn validate(&self) -> Result<(), QuadError> {
        if !self.accuracy.is_finite() || self.accuracy <= 0.0 {
            return Err(QuadError::InvalidArgument(
                ErrorInfo::new("non-positive-accuracy", "accuracy must be positive and finite")
                    .with_context("accuracy", self.accuracy),
            ));
        }
        if self.max_steps == 0 {
            return Err(QuadError::invalid(
                "zero-steps",
                "root finders need a step budget of at least one",
            ));
        }
        Ok(())
    }
}

/// Root together with the number of steps spent finding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootOutcome {
    /// Final guess for the root.
    pub root: f64,
    /// Steps taken after the initial guess.
    pub steps: usize,
}

pub(crate) fn max_steps_error(algorithm: &str, max_steps: usize) -> QuadError {
    QuadError::Convergence(
        ErrorInfo::new(
            "max-steps",
            format!("{algorithm}: maximum number of steps {max_steps} exceeded"),
        )
        .with_context("algorithm", algorithm)
        .with_context("max_steps", max_steps),
    )
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), QuadError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(QuadError::InvalidArgument(
        ErrorInfo::new("non-finite-input", format!("{name} must be finite")).with_context(name, value),
    ))
}
