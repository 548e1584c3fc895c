use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use quad_core::{round_f64, stable_hash_string, Interval, Refinement, Trace};
use quad_rules::{parse_bound, run_method, Integrand, MethodRun};
use serde::Serialize;

use super::trace::refinement_table;
use super::{load_config, print_json, MethodName};

#[derive(Args, Debug)]
pub struct IntegrateArgs {
    /// Integrand name (`exp`, `sin`, `const:2`, `pow:3`, `poly:1,0,2`, ...) or its JSON form.
    #[arg(long)]
    pub integrand: Integrand,
    /// Lower limit of integration; accepts `pi` and `-pi`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub a: f64,
    /// Upper limit of integration; accepts `pi` and `-pi`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub b: f64,
    /// Quadrature method.
    #[arg(long, value_enum, default_value_t = MethodName::Adaptive)]
    pub method: MethodName,
    /// Subinterval count for the fixed-step rules; defaults to the configured value.
    #[arg(long)]
    pub n: Option<usize>,
    /// Tolerance for the doubling methods; defaults to the configured value.
    #[arg(long)]
    pub acc: Option<f64>,
    /// Print the refinement table to stderr.
    #[arg(long)]
    pub trace: bool,
    /// Optional YAML configuration overriding the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct IntegrationReport {
    integrand: Integrand,
    label: String,
    interval: Interval,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<f64>,
    run: MethodRun,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    refinements: Vec<Refinement>,
    report_hash: String,
}

pub fn run(args: &IntegrateArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_deref())?;
    let interval = Interval::new(args.a, args.b)?;
    let accuracy = args.acc.unwrap_or(config.quadrature.accuracy);
    let method = args
        .method
        .with_params(args.n.unwrap_or(config.quadrature.subintervals), accuracy);

    let mut trace = Trace::new();
    let run = run_method(
        method,
        &args.integrand,
        interval.a,
        interval.b,
        config.quadrature.max_refinements,
        &mut trace,
    )?;
    let refinements = trace.into_events();
    if args.trace {
        eprint!("{}", refinement_table(method.name(), accuracy, &refinements));
    }

    let report_hash = stable_hash_string(&(
        &args.integrand,
        &interval,
        &method,
        round_f64(run.estimate),
        run.evaluations,
    ))?;
    let report = IntegrationReport {
        integrand: args.integrand.clone(),
        label: args.integrand.to_string(),
        interval,
        exact: args.integrand.exact(interval.a, interval.b),
        run,
        refinements: if args.trace { refinements } else { Vec::new() },
        report_hash,
    };
    print_json(&report)
}
