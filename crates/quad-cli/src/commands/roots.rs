use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use quad_roots::{survey, RootFunction};
use quad_rules::parse_bound;

use super::trace::root_table;
use super::{load_config, print_json};

#[derive(Args, Debug)]
pub struct RootsArgs {
    /// Function to solve: `tan`, `tanh` or `poly:c0,c1,...`.
    #[arg(long)]
    pub function: RootFunction,
    /// Lower end of the search interval.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub x1: f64,
    /// Upper end of the search interval.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bound)]
    pub x2: f64,
    /// Requested accuracy; defaults to the configured value.
    #[arg(long)]
    pub accuracy: Option<f64>,
    /// Print each algorithm's step table to stderr and keep the steps in the report.
    #[arg(long)]
    pub trace: bool,
    /// Optional YAML configuration overriding the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RootsArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?.roots;
    if let Some(accuracy) = args.accuracy {
        config.accuracy = accuracy;
    }
    let report = survey(&args.function, args.x1, args.x2, &config, args.trace)?;
    if args.trace {
        for run in &report.runs {
            eprint!("{}", root_table(&run.algorithm.to_string(), config.accuracy, &run.trace));
            if let Some(failure) = &run.failure {
                eprintln!(" {failure}");
            }
        }
    }
    print_json(&report)
}
