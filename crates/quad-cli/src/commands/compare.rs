use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use quad_rules::{compare, parse_bound, Integrand, Method};

use super::{load_config, print_json};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Integrand name or JSON form.
    #[arg(long)]
    pub integrand: Integrand,
    /// Lower limit of integration.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub a: f64,
    /// Upper limit of integration.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub b: f64,
    /// Subinterval count shared by the fixed-step rules.
    #[arg(long)]
    pub n: Option<usize>,
    /// Tolerance shared by the doubling methods.
    #[arg(long)]
    pub acc: Option<f64>,
    /// Optional YAML configuration overriding the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &CompareArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let methods = Method::standard_set(
        args.n.unwrap_or(config.quadrature.subintervals),
        args.acc.unwrap_or(config.quadrature.accuracy),
    );
    let report = compare(
        &args.integrand,
        args.a,
        args.b,
        &methods,
        config.quadrature.max_refinements,
    )?;
    print_json(&report)
}
