pub mod batch;
pub mod compare;
pub mod integrate;
pub mod roots;
pub mod trace;
pub mod version;

use std::error::Error;
use std::path::Path;

use clap::ValueEnum;
use quad_core::serde::to_canonical_json_pretty;
use quad_core::QuadConfig;
use quad_rules::Method;
use serde::Serialize;

/// Quadrature method selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodName {
    Trapezoid,
    Simpson,
    Adaptive,
    Recomputing,
}

impl MethodName {
    pub fn with_params(self, n: usize, accuracy: f64) -> Method {
        match self {
            MethodName::Trapezoid => Method::Trapezoid { n },
            MethodName::Simpson => Method::Simpson { n },
            MethodName::Adaptive => Method::Adaptive { accuracy },
            MethodName::Recomputing => Method::Recomputing { accuracy },
        }
    }
}

/// Loads the YAML configuration when a path is given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<QuadConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(QuadConfig::load(path)?),
        None => Ok(QuadConfig::default()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", to_canonical_json_pretty(value)?);
    Ok(())
}
