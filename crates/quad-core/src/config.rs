use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, QuadError};

fn config_error(code: &str, message: impl Into<String>) -> QuadError {
    QuadError::Config(ErrorInfo::new(code, message))
}

fn default_subintervals() -> usize {
    100
}

fn default_accuracy() -> f64 {
    1e-6
}

/// Largest refinement cap accepted; `2^48` subintervals is far past useful.
pub const MAX_REFINEMENT_LIMIT: u32 = 48;

fn default_max_refinements() -> u32 {
    30
}

fn default_root_accuracy() -> f64 {
    1e-6
}

fn default_bracket_steps() -> usize {
    1000
}

fn default_open_steps() -> usize {
    20
}

fn default_scan_step() -> f64 {
    0.01
}

fn default_residual_limit() -> f64 {
    1.0
}

/// YAML-configurable defaults for quadrature and root-finding runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuadConfig {
    /// Quadrature defaults.
    #[serde(default)]
    pub quadrature: QuadratureConfig,
    /// Root-finding defaults.
    #[serde(default)]
    pub roots: RootConfig,
}

/// Defaults for the fixed-step and adaptive rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadratureConfig {
    /// Subinterval count used when a fixed-step run does not name one.
    #[serde(default = "default_subintervals")]
    pub subintervals: usize,
    /// Tolerance used when an adaptive run does not name one.
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    /// Maximum number of interval doublings before giving up.
    #[serde(default = "default_max_refinements")]
    pub max_refinements: u32,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            subintervals: default_subintervals(),
            accuracy: default_accuracy(),
            max_refinements: default_max_refinements(),
        }
    }
}

/// Defaults for the root finders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Requested accuracy on the root location.
    #[serde(default = "default_root_accuracy")]
    pub accuracy: f64,
    /// Step budget for bracketing searches (simple search, bisection).
    #[serde(default = "default_bracket_steps")]
    pub bracket_steps: usize,
    /// Step budget for open methods (secant, tangent).
    #[serde(default = "default_open_steps")]
    pub open_steps: usize,
    /// Sampling step used when scanning an interval for sign changes.
    #[serde(default = "default_scan_step")]
    pub scan_step: f64,
    /// Largest |f(root)| accepted by the scan; larger residuals are poles.
    #[serde(default = "default_residual_limit")]
    pub residual_limit: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            accuracy: default_root_accuracy(),
            bracket_steps: default_bracket_steps(),
            open_steps: default_open_steps(),
            scan_step: default_scan_step(),
            residual_limit: default_residual_limit(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), QuadError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(QuadError::Config(
            ErrorInfo::new("non-positive", format!("{name} must be positive and finite"))
                .with_context("field", name)
                .with_context("value", value),
        ))
    }
}

fn nonzero(name: &str, value: usize) -> Result<(), QuadError> {
    if value == 0 {
        return Err(QuadError::Config(
            ErrorInfo::new("zero-count", format!("{name} must be at least one"))
                .with_context("field", name),
        ));
    }
    Ok(())
}

impl QuadConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, QuadError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|err| config_error("yaml-read", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, QuadError> {
        let text = fs::read_to_string(path).map_err(|err| {
            QuadError::Config(
                ErrorInfo::new("io", err.to_string()).with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Rejects non-positive counts and tolerances.
    pub fn validate(&self) -> Result<(), QuadError> {
        nonzero("quadrature.subintervals", self.quadrature.subintervals)?;
        positive("quadrature.accuracy", self.quadrature.accuracy)?;
        let cap = self.quadrature.max_refinements;
        if cap == 0 || cap > MAX_REFINEMENT_LIMIT {
            return Err(QuadError::Config(
                ErrorInfo::new(
                    "refinement-cap",
                    format!("quadrature.max_refinements must lie in 1..={MAX_REFINEMENT_LIMIT}"),
                )
                .with_context("field", "quadrature.max_refinements")
                .with_context("value", cap),
            ));
        }
        positive("roots.accuracy", self.roots.accuracy)?;
        nonzero("roots.bracket_steps", self.roots.bracket_steps)?;
        nonzero("roots.open_steps", self.roots.open_steps)?;
        positive("roots.scan_step", self.roots.scan_step)?;
        positive("roots.residual_limit", self.roots.residual_limit)?;
        Ok(())
    }
}
