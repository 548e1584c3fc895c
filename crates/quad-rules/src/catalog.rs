//! Named integrands with closed-form antiderivatives where one exists.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an integrand description cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIntegrandError {
    /// The name is not part of the catalog.
    #[error("unknown integrand `{0}` (expected exp, sin, cos, gaussian, const:c, pow:k, poly:c0,c1,...)")]
    Unknown(String),
    /// A numeric parameter could not be read.
    #[error("invalid parameter `{value}` for `{kind}`")]
    Parameter {
        /// Catalog entry being parsed.
        kind: String,
        /// Offending text.
        value: String,
    },
    /// The JSON form could not be decoded.
    #[error("invalid integrand json: {0}")]
    Json(String),
}

/// Integrand drawn from a small catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Integrand {
    /// `f(x) = value`.
    Constant {
        /// Constant value.
        value: f64,
    },
    /// `f(x) = sum_k coefficients[k] * x^k`.
    Polynomial {
        /// Coefficients in ascending powers.
        coefficients: Vec<f64>,
    },
    /// `f(x) = x^exponent`.
    Power {
        /// Non-negative integer exponent, at most `u16::MAX`.
        exponent: u16,
    },
    /// `f(x) = e^x`.
    Exp,
    /// `f(x) = sin x`.
    Sin,
    /// `f(x) = cos x`.
    Cos,
    /// `f(x) = e^(-x^2)`; no elementary antiderivative.
    Gaussian,
}

fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

impl Integrand {
    /// Evaluates the integrand.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Integrand::Constant { value } => *value,
            Integrand::Polynomial { coefficients } => horner(coefficients, x),
            Integrand::Power { exponent } => x.powi(i32::from(*exponent)),
            Integrand::Exp => x.exp(),
            Integrand::Sin => x.sin(),
            Integrand::Cos => x.cos(),
            Integrand::Gaussian => (-x * x).exp(),
        }
    }

    /// Antiderivative vanishing at zero, if elementary.
    pub fn antiderivative(&self, x: f64) -> Option<f64> {
        let value = match self {
            Integrand::Constant { value } => value * x,
            Integrand::Polynomial { coefficients } => {
                let lifted: Vec<f64> = coefficients
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c / (k as f64 + 1.0))
                    .collect();
                x * horner(&lifted, x)
            }
            Integrand::Power { exponent } => {
                let next = i32::from(*exponent) + 1;
                x.powi(next) / next as f64
            }
            Integrand::Exp => x.exp(),
            Integrand::Sin => -x.cos(),
            Integrand::Cos => x.sin(),
            Integrand::Gaussian => return None,
        };
        Some(value)
    }

    /// Analytic value of the integral over `[a, b]`, if available.
    pub fn exact(&self, a: f64, b: f64) -> Option<f64> {
        Some(self.antiderivative(b)? - self.antiderivative(a)?)
    }

    /// Highest polynomial degree, or `None` for transcendental integrands.
    pub fn degree(&self) -> Option<usize> {
        match self {
            Integrand::Constant { .. } => Some(0),
            Integrand::Polynomial { coefficients } => {
                Some(coefficients.iter().rposition(|c| *c != 0.0).unwrap_or(0))
            }
            Integrand::Power { exponent } => Some(usize::from(*exponent)),
            Integrand::Exp | Integrand::Sin | Integrand::Cos | Integrand::Gaussian => None,
        }
    }

    /// Borrows the integrand as a plain closure.
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.eval(x)
    }
}

impl fmt::Display for Integrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integrand::Constant { value } => write!(f, "{value}"),
            Integrand::Polynomial { coefficients } => {
                let terms: Vec<String> = coefficients
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| **c != 0.0)
                    .map(|(k, c)| match k {
                        0 => format!("{c}"),
                        1 => format!("{c}*x"),
                        _ => format!("{c}*x^{k}"),
                    })
                    .collect();
                if terms.is_empty() {
                    write!(f, "0")
                } else {
                    write!(f, "{}", terms.join(" + "))
                }
            }
            Integrand::Power { exponent } => write!(f, "x^{exponent}"),
            Integrand::Exp => write!(f, "exp(x)"),
            Integrand::Sin => write!(f, "sin(x)"),
            Integrand::Cos => write!(f, "cos(x)"),
            Integrand::Gaussian => write!(f, "exp(-x^2)"),
        }
    }
}

fn parse_number(kind: &str, text: &str) -> Result<f64, ParseIntegrandError> {
    let trimmed = text.trim();
    match trimmed {
        "pi" => Ok(PI),
        "-pi" => Ok(-PI),
        _ => trimmed.parse().map_err(|_| ParseIntegrandError::Parameter {
            kind: kind.into(),
            value: text.into(),
        }),
    }
}

impl FromStr for Integrand {
    type Err = ParseIntegrandError;

    /// Accepts either the JSON form or a short name such as `exp`,
    /// `const:2.5`, `pow:3` or `poly:1,0,-2`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.starts_with('{') {
            return serde_json::from_str(text)
                .map_err(|err| ParseIntegrandError::Json(err.to_string()));
        }
        let (name, params) = match text.split_once(':') {
            Some((name, params)) => (name, Some(params)),
            None => (text, None),
        };
        match (name, params) {
            ("exp", None) => Ok(Integrand::Exp),
            ("sin", None) => Ok(Integrand::Sin),
            ("cos", None) => Ok(Integrand::Cos),
            ("gaussian", None) => Ok(Integrand::Gaussian),
            ("const", Some(value)) => Ok(Integrand::Constant {
                value: parse_number("const", value)?,
            }),
            ("pow", Some(value)) => {
                let exponent = value.trim().parse().map_err(|_| ParseIntegrandError::Parameter {
                    kind: "pow".into(),
                    value: value.into(),
                })?;
                Ok(Integrand::Power { exponent })
            }
            ("poly", Some(values)) => {
                let coefficients = values
                    .split(',')
                    .map(|value| parse_number("poly", value))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Integrand::Polynomial { coefficients })
            }
            _ => Err(ParseIntegrandError::Unknown(text.into())),
        }
    }
}

/// Parses a bound, accepting `pi`, `-pi` and plain numbers.
pub fn parse_bound(text: &str) -> Result<f64, ParseIntegrandError> {
    parse_number("bound", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_parse() {
        assert_eq!("exp".parse::<Integrand>().unwrap(), Integrand::Exp);
        assert_eq!(
            "const:2.5".parse::<Integrand>().unwrap(),
            Integrand::Constant { value: 2.5 }
        );
        assert_eq!(
            "poly:1, 0, -2".parse::<Integrand>().unwrap(),
            Integrand::Polynomial {
                coefficients: vec![1.0, 0.0, -2.0]
            }
        );
        assert_eq!(
            "pow:3".parse::<Integrand>().unwrap(),
            Integrand::Power { exponent: 3 }
        );
    }

    #[test]
    fn json_form_parses() {
        let parsed: Integrand = r#"{"kind":"power","exponent":2}"#.parse().unwrap();
        assert_eq!(parsed, Integrand::Power { exponent: 2 });
    }

    #[test]
    fn oversized_exponents_are_rejected() {
        for text in ["pow:65536", "pow:2147483647", "pow:4294967295"] {
            assert!(
                matches!(text.parse::<Integrand>(), Err(ParseIntegrandError::Parameter { .. })),
                "{text}"
            );
        }
        assert!(matches!(
            r#"{"kind":"power","exponent":2147483647}"#.parse::<Integrand>(),
            Err(ParseIntegrandError::Json(_))
        ));
    }

    #[test]
    fn largest_exponent_stays_well_defined() {
        let power: Integrand = "pow:65535".parse().unwrap();
        assert_eq!(power.eval(1.0), 1.0);
        assert_eq!(power.eval(-1.0), -1.0);
        assert_eq!(power.exact(0.0, 1.0), Some(1.0 / 65536.0));
        assert_eq!(power.degree(), Some(65535));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            "tan".parse::<Integrand>(),
            Err(ParseIntegrandError::Unknown(_))
        ));
        assert!(matches!(
            "pow:-1".parse::<Integrand>(),
            Err(ParseIntegrandError::Parameter { .. })
        ));
    }

    #[test]
    fn exact_values_match_closed_forms() {
        let third = Integrand::Power { exponent: 2 }.exact(0.0, 1.0).unwrap();
        assert!((third - 1.0 / 3.0).abs() < 1e-15);
        let sine = Integrand::Sin.exact(0.0, PI).unwrap();
        assert!((sine - 2.0).abs() < 1e-15);
        let poly = Integrand::Polynomial {
            coefficients: vec![1.0, 2.0, 3.0],
        };
        // x + x^2 + x^3 evaluated at 2
        assert_eq!(poly.exact(0.0, 2.0), Some(14.0));
        assert_eq!(Integrand::Gaussian.exact(0.0, 1.0), None);
    }

    #[test]
    fn degree_ignores_trailing_zeros() {
        let poly = Integrand::Polynomial {
            coefficients: vec![1.0, 2.0, 0.0],
        };
        assert_eq!(poly.degree(), Some(1));
        assert_eq!(Integrand::Exp.degree(), None);
    }

    #[test]
    fn display_is_readable() {
        let poly = Integrand::Polynomial {
            coefficients: vec![1.0, 0.0, -2.0],
        };
        assert_eq!(poly.to_string(), "1 + -2*x^2");
        assert_eq!(Integrand::Gaussian.to_string(), "exp(-x^2)");
    }

    #[test]
    fn bounds_accept_pi() {
        assert_eq!(parse_bound("pi").unwrap(), PI);
        assert_eq!(parse_bound(" 1.5 ").unwrap(), 1.5);
        assert!(parse_bound("one").is_err());
    }
}
