use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;

use quad_core::{
    round_f64, stable_hash_string, Interval, Observer, QuadError, Refinement, Silent,
};
use serde::{Deserialize, Serialize};

use crate::adaptive::{adaptive_trapezoid_observed, recomputing_trapezoid, AdaptiveOpts};
use crate::catalog::Integrand;
use crate::fixed::{simpson, trapezoid};

/// Wraps an integrand and counts how often it is evaluated.
#[derive(Debug)]
pub struct Counted<F> {
    inner: F,
    calls: Cell<usize>,
}

impl<F> Counted<F>
where
    F: Fn(f64) -> f64,
{
    /// Wraps `inner` with a zeroed counter.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Evaluates the wrapped integrand and bumps the counter.
    pub fn call(&self, x: f64) -> f64 {
        self.calls.set(self.calls.get() + 1);
        (self.inner)(x)
    }

    /// Evaluations so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

/// Quadrature method together with its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Method {
    /// Fixed-step trapezoid with `n` subintervals.
    Trapezoid {
        /// Subinterval count.
        n: usize,
    },
    /// Fixed-step Simpson with an even `n`.
    Simpson {
        /// Subinterval count.
        n: usize,
    },
    /// Adaptive trapezoid reusing previous evaluations.
    Adaptive {
        /// Stopping tolerance.
        accuracy: f64,
    },
    /// Doubling baseline recomputing every level from scratch.
    Recomputing {
        /// Stopping tolerance.
        accuracy: f64,
    },
}

impl Method {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Trapezoid { .. } => "trapezoid",
            Method::Simpson { .. } => "simpson",
            Method::Adaptive { .. } => "adaptive",
            Method::Recomputing { .. } => "recomputing",
        }
    }

    /// Default line-up used by comparisons: both fixed rules at `n`, both
    /// doubling methods at `accuracy`.
    pub fn standard_set(n: usize, accuracy: f64) -> Vec<Method> {
        vec![
            Method::Trapezoid { n },
            Method::Simpson { n },
            Method::Adaptive { accuracy },
            Method::Recomputing { accuracy },
        ]
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Trapezoid { n } | Method::Simpson { n } => write!(f, "{}(n={n})", self.name()),
            Method::Adaptive { accuracy } | Method::Recomputing { accuracy } => {
                write!(f, "{}(acc={accuracy:e})", self.name())
            }
        }
    }
}

/// Outcome of a single method on a single integrand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRun {
    /// Method and parameter used.
    pub method: Method,
    /// Returned estimate.
    pub estimate: f64,
    /// Integrand evaluations performed.
    pub evaluations: usize,
    /// Subinterval count behind the estimate.
    pub subintervals: usize,
    /// Halvings performed by the doubling methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinements: Option<u32>,
    /// `|estimate - exact|` when the integrand has a closed form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_error: Option<f64>,
}

/// Runs `method` on `integrand` over `[a, b]`.
///
/// `max_refinements` only applies to the doubling methods.
pub fn run_method<O>(
    method: Method,
    integrand: &Integrand,
    a: f64,
    b: f64,
    max_refinements: u32,
    observer: &mut O,
) -> Result<MethodRun, QuadError>
where
    O: Observer<Refinement> + ?Sized,
{
    let counted = Counted::new(integrand.as_fn());
    let f = |x: f64| counted.call(x);
    let (estimate, subintervals, refinements) = match method {
        Method::Trapezoid { n } => (trapezoid(f, a, b, n)?, n, None),
        Method::Simpson { n } => (simpson(f, a, b, n)?, n, None),
        Method::Adaptive { accuracy } => {
            let opts = AdaptiveOpts::new(accuracy).with_max_refinements(max_refinements);
            let outcome = adaptive_trapezoid_observed(f, a, b, &opts, observer)?;
            (outcome.estimate, outcome.subintervals, Some(outcome.refinements))
        }
        Method::Recomputing { accuracy } => {
            let opts = AdaptiveOpts::new(accuracy).with_max_refinements(max_refinements);
            let outcome = recomputing_trapezoid(f, a, b, &opts, observer)?;
            (outcome.estimate, outcome.subintervals, Some(outcome.refinements))
        }
    };
    Ok(MethodRun {
        method,
        estimate,
        evaluations: counted.calls(),
        subintervals,
        refinements,
        abs_error: integrand.exact(a, b).map(|exact| (estimate - exact).abs()),
    })
}

/// Side-by-side results of several methods on one integrand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Integrand under test.
    pub integrand: Integrand,
    /// Human readable form of the integrand.
    pub label: String,
    /// Integration bounds.
    pub interval: Interval,
    /// Analytic value when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<f64>,
    /// One entry per method, in request order.
    pub runs: Vec<MethodRun>,
    /// Digest of the rounded report contents.
    pub report_hash: String,
}

impl ComparisonReport {
    /// Run with the smallest absolute error, if the exact value is known.
    pub fn most_accurate(&self) -> Option<&MethodRun> {
        self.runs
            .iter()
            .filter(|run| run.abs_error.is_some_and(f64::is_finite))
            .min_by(|left, right| {
                left.abs_error
                    .partial_cmp(&right.abs_error)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Runs every method in `methods` and collects the results.
///
/// The first failing method aborts the comparison.
pub fn compare(
    integrand: &Integrand,
    a: f64,
    b: f64,
    methods: &[Method],
    max_refinements: u32,
) -> Result<ComparisonReport, QuadError> {
    let interval = Interval::new(a, b)?;
    let runs = methods
        .iter()
        .map(|method| run_method(*method, integrand, a, b, max_refinements, &mut Silent))
        .collect::<Result<Vec<_>, _>>()?;
    let exact = integrand.exact(a, b);
    let rounded: Vec<(&str, f64, usize)> = runs
        .iter()
        .map(|run| (run.method.name(), round_f64(run.estimate), run.evaluations))
        .collect();
    let report_hash = stable_hash_string(&(integrand, &interval, exact.map(round_f64), &rounded))?;
    Ok(ComparisonReport {
        integrand: integrand.clone(),
        label: integrand.to_string(),
        interval,
        exact,
        runs,
        report_hash,
    })
}
