use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a root function description cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFunctionError {
    /// The name is not part of the catalog.
    #[error("unknown function `{0}` (expected tan, tanh or poly:c0,c1,...)")]
    Unknown(String),
    /// A coefficient could not be read.
    #[error("invalid coefficient `{0}`")]
    Coefficient(String),
}

/// Functions with known derivatives, used by the tangent search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RootFunction {
    /// `tan x`, with poles at odd multiples of pi/2.
    Tan,
    /// `tanh x`, single root at zero.
    Tanh,
    /// Polynomial with coefficients in ascending powers.
    Polynomial {
        /// Coefficients in ascending powers.
        coefficients: Vec<f64>,
    },
}

impl RootFunction {
    /// Evaluates the function.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            RootFunction::Tan => x.tan(),
            RootFunction::Tanh => x.tanh(),
            RootFunction::Polynomial { coefficients } => {
                coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
            }
        }
    }

    /// Evaluates the first derivative.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            RootFunction::Tan => 1.0 / x.cos().powi(2),
            RootFunction::Tanh => 1.0 / x.cosh().powi(2),
            RootFunction::Polynomial { coefficients } => coefficients
                .iter()
                .enumerate()
                .skip(1)
                .rev()
                .fold(0.0, |acc, (k, &c)| acc * x + k as f64 * c),
        }
    }
}

impl fmt::Display for RootFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootFunction::Tan => write!(f, "tan(x)"),
            RootFunction::Tanh => write!(f, "tanh(x)"),
            RootFunction::Polynomial { coefficients } => {
                let text: Vec<String> = coefficients.iter().map(f64::to_string).collect();
                write!(f, "poly[{}]", text.join(", "))
            }
        }
    }
}

impl FromStr for RootFunction {
    type Err = ParseFunctionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        match text {
            "tan" => return Ok(RootFunction::Tan),
            "tanh" => return Ok(RootFunction::Tanh),
            _ => {}
        }
        let Some(values) = text.strip_prefix("poly:") else {
            return Err(ParseFunctionError::Unknown(text.into()));
        };
        let coefficients = values
            .split(',')
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ParseFunctionError::Coefficient(value.into()))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(RootFunction::Polynomial { coefficients })
    }
}
