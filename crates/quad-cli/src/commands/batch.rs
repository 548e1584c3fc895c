use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use quad_core::serde::to_canonical_json_pretty;
use quad_core::QuadConfig;
use quad_rules::{compare, parse_bound, ComparisonReport, Integrand, Method};
use serde::{Deserialize, Serialize};

use super::print_json;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// YAML file listing the jobs to run.
    #[arg(long)]
    pub jobs: PathBuf,
    /// Output directory for per-job reports and `summary.json`.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Debug, Deserialize)]
struct JobFile {
    #[serde(default)]
    config: QuadConfig,
    jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct Job {
    name: String,
    integrand: IntegrandValue,
    a: BoundValue,
    b: BoundValue,
    #[serde(default)]
    methods: Vec<Method>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntegrandValue {
    Name(String),
    Structured(Integrand),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoundValue {
    Numeric(f64),
    Text(String),
}

#[derive(Debug, Serialize)]
struct JobEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    most_accurate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchSummary {
    jobs: Vec<JobEntry>,
    succeeded: usize,
    failed: usize,
}

fn load_jobs(path: &Path) -> Result<JobFile, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let file: JobFile = serde_yaml::from_slice(&bytes)?;
    file.config.validate()?;
    let mut names = BTreeSet::new();
    for job in &file.jobs {
        let safe = !job.name.is_empty()
            && job
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(format!("job name '{}' must be non-empty [A-Za-z0-9_-]", job.name).into());
        }
        if !names.insert(job.name.as_str()) {
            return Err(format!("duplicate job name '{}'", job.name).into());
        }
    }
    Ok(file)
}

fn bound(value: &BoundValue) -> Result<f64, Box<dyn Error>> {
    match value {
        BoundValue::Numeric(value) => Ok(*value),
        BoundValue::Text(text) => Ok(parse_bound(text)?),
    }
}

fn run_job(job: &Job, config: &QuadConfig) -> Result<ComparisonReport, Box<dyn Error>> {
    let integrand = match &job.integrand {
        IntegrandValue::Name(name) => name.parse::<Integrand>()?,
        IntegrandValue::Structured(integrand) => integrand.clone(),
    };
    let methods = if job.methods.is_empty() {
        Method::standard_set(config.quadrature.subintervals, config.quadrature.accuracy)
    } else {
        job.methods.clone()
    };
    let report = compare(
        &integrand,
        bound(&job.a)?,
        bound(&job.b)?,
        &methods,
        config.quadrature.max_refinements,
    )?;
    Ok(report)
}

/// Runs every job, writing `<name>.json` per successful job and a summary.
///
/// A failing job is recorded in the summary and does not stop the batch.
pub fn run(args: &BatchArgs) -> Result<(), Box<dyn Error>> {
    let file = load_jobs(&args.jobs)?;
    fs::create_dir_all(&args.out)?;

    let mut entries = Vec::with_capacity(file.jobs.len());
    for job in &file.jobs {
        let entry = match run_job(job, &file.config) {
            Ok(report) => {
                let filename = format!("{}.json", job.name);
                fs::write(args.out.join(&filename), to_canonical_json_pretty(&report)?)?;
                JobEntry {
                    name: job.name.clone(),
                    report: Some(filename),
                    most_accurate: report.most_accurate().map(|run| run.method.to_string()),
                    report_hash: Some(report.report_hash),
                    error: None,
                }
            }
            Err(err) => JobEntry {
                name: job.name.clone(),
                report: None,
                report_hash: None,
                most_accurate: None,
                error: Some(err.to_string()),
            },
        };
        entries.push(entry);
    }

    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    let summary = BatchSummary {
        succeeded: entries.len() - failed,
        failed,
        jobs: entries,
    };
    fs::write(args.out.join("summary.json"), to_canonical_json_pretty(&summary)?)?;
    print_json(&summary)
}
