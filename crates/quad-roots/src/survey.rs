use std::fmt;

use quad_core::{round_f64, stable_hash_string, QuadError, RootConfig, RootStep, Trace};
use serde::{Deserialize, Serialize};

use crate::bracket::{root_bisection, root_simple};
use crate::functions::RootFunction;
use crate::open::{root_secant, root_tangent};
use crate::options::{RootOpts, RootOutcome};
use crate::scan::{find_roots, ScanOpts};

/// Root-finding algorithms compared by [`survey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Simple search with step halving.
    Simple,
    /// Bisection.
    Bisection,
    /// Newton-Raphson.
    Tangent,
    /// Secant.
    Secant,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Simple,
        Algorithm::Bisection,
        Algorithm::Tangent,
        Algorithm::Secant,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Simple => "Simple Search",
            Algorithm::Bisection => "Bisection Search",
            Algorithm::Tangent => "Tangent Search",
            Algorithm::Secant => "Secant Search",
        };
        f.write_str(name)
    }
}

/// Result of one algorithm within a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRun {
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Root and step count when the algorithm succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RootOutcome>,
    /// Error message when the algorithm failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Distance from the nearest root found by the scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Whether `distance` is at most twice the requested accuracy.
    pub within_accuracy: bool,
    /// Per-step trace, kept when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<RootStep>,
}

/// Side-by-side comparison of the root finders on one function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootReport {
    /// Function under study.
    pub function: RootFunction,
    /// Lower end of the search interval.
    pub x1: f64,
    /// Upper end of the search interval.
    pub x2: f64,
    /// Requested accuracy.
    pub accuracy: f64,
    /// Roots located by the sign-change scan.
    pub reference_roots: Vec<f64>,
    /// One entry per algorithm.
    pub runs: Vec<AlgorithmRun>,
    /// Accurate algorithm with the fewest steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_efficient: Option<Algorithm>,
    /// Digest of the rounded report contents.
    pub report_hash: String,
}

fn nearest(roots: &[f64], x: f64) -> Option<f64> {
    roots
        .iter()
        .map(|root| (root - x).abs())
        .min_by(|left, right| left.total_cmp(right))
}

/// Runs every algorithm on `function` over `[x1, x2]` and scores the results.
///
/// Starting points: the simple search walks downhill from the midpoint with
/// the scan step, bisection and secant use the interval ends, and the tangent
/// search starts one two-hundredth of the width right of the midpoint.
///
/// The stopping rules bound the last step, not the error, so a run counts as
/// accurate when it lands within two accuracies of a scanned root. Individual
/// algorithm failures are recorded in the report; only an invalid scan
/// aborts the survey.
pub fn survey(
    function: &RootFunction,
    x1: f64,
    x2: f64,
    config: &RootConfig,
    keep_trace: bool,
) -> Result<RootReport, QuadError> {
    let reference_roots = find_roots(|x| function.eval(x), x1, x2, &ScanOpts::from_config(config))?;
    let bracketing = RootOpts::bracketing(config);
    let open = RootOpts::open(config);
    let mid = (x1 + x2) / 2.0;
    let f = |x: f64| function.eval(x);
    let downhill = if function.eval(mid) * function.derivative(mid) > 0.0 {
        -config.scan_step
    } else {
        config.scan_step
    };

    let mut runs = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let mut trace = Trace::new();
        let result = match algorithm {
            Algorithm::Simple => root_simple(f, mid, downhill, &bracketing, &mut trace),
            Algorithm::Bisection => root_bisection(f, x1, x2, &bracketing, &mut trace),
            Algorithm::Tangent => root_tangent(
                f,
                |x| function.derivative(x),
                mid + (x2 - x1) / 200.0,
                &open,
                &mut trace,
            ),
            Algorithm::Secant => root_secant(f, x1, x2, &open, &mut trace),
        };
        let (outcome, failure) = match result {
            Ok(outcome) => (Some(outcome), None),
            Err(err) => (None, Some(err.to_string())),
        };
        let distance = outcome.and_then(|outcome| nearest(&reference_roots, outcome.root));
        runs.push(AlgorithmRun {
            algorithm,
            outcome,
            failure,
            distance,
            within_accuracy: distance.is_some_and(|d| d <= 2.0 * config.accuracy),
            trace: if keep_trace { trace.into_events() } else { Vec::new() },
        });
    }

    let most_efficient = runs
        .iter()
        .filter(|run| run.within_accuracy)
        .filter_map(|run| run.outcome.map(|outcome| (run.algorithm, outcome.steps)))
        .min_by_key(|(_, steps)| *steps)
        .map(|(algorithm, _)| algorithm);

    let digest: Vec<(Algorithm, Option<f64>, Option<usize>)> = runs
        .iter()
        .map(|run| {
            (
                run.algorithm,
                run.outcome.map(|outcome| round_f64(outcome.root)),
                run.outcome.map(|outcome| outcome.steps),
            )
        })
        .collect();
    let rounded_roots: Vec<f64> = reference_roots.iter().copied().map(round_f64).collect();
    let report_hash = stable_hash_string(&(function, x1, x2, &rounded_roots, &digest))?;

    Ok(RootReport {
        function: function.clone(),
        x1,
        x2,
        accuracy: config.accuracy,
        reference_roots,
        runs,
        most_efficient,
        report_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tanh_survey_agrees_on_zero() {
        let report = survey(&RootFunction::Tanh, -1.0, 2.0, &RootConfig::default(), false).unwrap();
        assert_eq!(report.reference_roots.len(), 1);
        for run in &report.runs {
            assert!(run.within_accuracy, "{} failed: {:?}", run.algorithm, run.failure);
            assert!(run.trace.is_empty());
        }
        assert_eq!(report.most_efficient, Some(Algorithm::Tangent));
    }

    #[test]
    fn failures_are_recorded_not_raised() {
        // No sign change on [3, 4]: bisection fails but the report is built.
        let parabola = RootFunction::Polynomial {
            coefficients: vec![-4.0, 0.0, 1.0],
        };
        let report = survey(&parabola, 3.0, 4.0, &RootConfig::default(), true).unwrap();
        assert!(report.reference_roots.is_empty());
        let bisection = &report.runs[1];
        assert_eq!(bisection.algorithm, Algorithm::Bisection);
        assert!(bisection.failure.as_deref().unwrap().contains("no-sign-change"));
        assert!(!bisection.within_accuracy);
    }

    #[test]
    fn traces_are_kept_on_request() {
        let report = survey(&RootFunction::Tanh, -1.0, 2.0, &RootConfig::default(), true).unwrap();
        let tangent = &report.runs[2];
        let steps = tangent.outcome.unwrap().steps;
        assert_eq!(tangent.trace.len(), steps + 1);
    }
}
