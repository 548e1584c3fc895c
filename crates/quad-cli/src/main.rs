use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    batch::{self, BatchArgs},
    compare::{self, CompareArgs},
    integrate::{self, IntegrateArgs},
    roots::{self, RootsArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "quad", about = "Numerical quadrature and root finding CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate one catalog integrand with a single method.
    Integrate(IntegrateArgs),
    /// Run every quadrature method on one integrand and compare them.
    Compare(CompareArgs),
    /// Execute the jobs listed in a YAML file and write one report per job.
    Batch(BatchArgs),
    /// Compare the root finders on a catalog function.
    Roots(RootsArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Integrate(args) => integrate::run(&args),
        Command::Compare(args) => compare::run(&args),
        Command::Batch(args) => batch::run(&args),
        Command::Roots(args) => roots::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
