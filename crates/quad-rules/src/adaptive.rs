//! Adaptive trapezoid by repeated interval halving.
//!
//! Every refinement halves the step and evaluates only the new midpoints, so
//! reaching `n` subintervals costs `n + 1` integrand evaluations in total.

pub use quad_core::MAX_REFINEMENT_LIMIT;
use quad_core::{ErrorInfo, Interval, Observer, QuadError, Refinement, Silent};
use serde::{Deserialize, Serialize};

use crate::fixed::trapezoid;

fn default_max_refinements() -> u32 {
    30
}

/// Options for the adaptive routines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveOpts {
    /// Stopping tolerance on successive refinements.
    pub accuracy: f64,
    /// Number of halvings allowed before reporting a convergence error.
    #[serde(default = "default_max_refinements")]
    pub max_refinements: u32,
}

impl AdaptiveOpts {
    /// Options with the given tolerance and the default refinement cap.
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy,
            max_refinements: default_max_refinements(),
        }
    }

    /// Overrides the refinement cap.
    pub fn with_max_refinements(mut self, max_refinements: u32) -> Self {
        self.max_refinements = max_refinements;
        self
    }

    fn validate(&self) -> Result<(), QuadError> {
        if !self.accuracy.is_finite() || self.accuracy <= 0.0 {
            return Err(QuadError::InvalidArgument(
                ErrorInfo::new("non-positive-accuracy", "accuracy must be positive and finite")
                    .with_context("accuracy", self.accuracy)
                    .with_hint("a non-positive tolerance never lets the refinement loop stop"),
            ));
        }
        if self.max_refinements == 0 || self.max_refinements > MAX_REFINEMENT_LIMIT {
            return Err(QuadError::InvalidArgument(
                ErrorInfo::new(
                    "refinement-cap",
                    format!("max_refinements must lie in 1..={MAX_REFINEMENT_LIMIT}"),
                )
                .with_context("max_refinements", self.max_refinements),
            ));
        }
        Ok(())
    }
}

/// Result of an adaptive run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveOutcome {
    /// Final estimate of the integral.
    pub estimate: f64,
    /// Subinterval count of the final estimate.
    pub subintervals: usize,
    /// Number of halvings performed.
    pub refinements: u32,
    /// Total integrand evaluations.
    pub evaluations: usize,
}

impl AdaptiveOutcome {
    /// False when a non-finite integrand value leaked into the estimate.
    pub fn is_finite(&self) -> bool {
        self.estimate.is_finite()
    }
}

fn cap_reached(opts: &AdaptiveOpts, estimate: f64, subintervals: usize, change: f64) -> QuadError {
    QuadError::Convergence(
        ErrorInfo::new(
            "max-refinements",
            "refinement cap reached before successive estimates agreed",
        )
        .with_context("accuracy", opts.accuracy)
        .with_context("max_refinements", opts.max_refinements)
        .with_context("estimate", estimate)
        .with_context("subintervals", subintervals)
        .with_context("change", change),
    )
}

/// Adaptive trapezoid returning only the estimate.
///
/// # Errors
///
/// [`QuadError::InvalidArgument`] for a non-positive or non-finite `acc`,
/// [`QuadError::Convergence`] when the default refinement cap is reached.
pub fn adaptive_trapezoid<F>(f: F, a: f64, b: f64, acc: f64) -> Result<f64, QuadError>
where
    F: Fn(f64) -> f64,
{
    adaptive_trapezoid_observed(f, a, b, &AdaptiveOpts::new(acc), &mut Silent)
        .map(|outcome| outcome.estimate)
}

/// Adaptive trapezoid reporting every refinement to `observer`.
///
/// Starts from `s = (f(a) + f(b)) / 2`, `h = b - a`, `n = 1` and a previous
/// sum of `+inf`. Each pass adds the `n` midpoints `a + (i + 0.5) h` to `s`,
/// then doubles `n` and halves `h`. The loop stops once
/// `|h * (old_s - 0.5 * s)| <= acc`, measured with the halved `h`, and the
/// estimate is `h * s`.
///
/// A degenerate interval stops before any refinement and yields zero. A
/// non-finite integrand value turns the convergence measure into NaN, which
/// also stops the loop, so the returned estimate is non-finite.
pub fn adaptive_trapezoid_observed<F, O>(
    f: F,
    a: f64,
    b: f64,
    opts: &AdaptiveOpts,
    observer: &mut O,
) -> Result<AdaptiveOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    O: Observer<Refinement> + ?Sized,
{
    opts.validate()?;
    let interval = Interval::new(a, b)?;

    let mut n: usize = 1;
    let mut h = interval.width();
    let mut s = (f(a) + f(b)) / 2.0;
    let mut old_s = f64::INFINITY;
    let mut evaluations = 2;
    let mut level = 0;

    // NaN compares false here, which ends the loop.
    while (h * (old_s - 0.5 * s)).abs() > opts.accuracy {
        if level == opts.max_refinements {
            return Err(cap_reached(opts, h * s, n, (h * (old_s - 0.5 * s)).abs()));
        }
        old_s = s;
        let midpoints: f64 = (0..n).map(|i| f(a + (i as f64 + 0.5) * h)).sum();
        s += midpoints;
        evaluations += n;
        n *= 2;
        h /= 2.0;
        level += 1;
        observer.observe(&Refinement {
            level,
            subintervals: n,
            estimate: h * s,
            change: (h * (old_s - 0.5 * s)).abs(),
        });
    }

    Ok(AdaptiveOutcome {
        estimate: h * s,
        subintervals: n,
        refinements: level,
        evaluations,
    })
}

/// Doubling baseline that recomputes the full trapezoid sum at every level.
///
/// Evaluates `trapezoid(f, a, b, n)` for `n = 1, 2, 4, ...` and stops once two
/// consecutive estimates differ by at most `acc`. The previous estimate starts
/// at zero, so an integral whose single-panel estimate is already within
/// `acc` of zero stops immediately. Costs `O(n log n)` evaluations against the
/// `O(n)` of [`adaptive_trapezoid_observed`].
pub fn recomputing_trapezoid<F, O>(
    f: F,
    a: f64,
    b: f64,
    opts: &AdaptiveOpts,
    observer: &mut O,
) -> Result<AdaptiveOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    O: Observer<Refinement> + ?Sized,
{
    opts.validate()?;
    let mut n: usize = 1;
    let mut old = 0.0;
    let mut result = trapezoid(&f, a, b, n)?;
    let mut evaluations = n + 1;
    let mut level = 0;

    while (result - old).abs() > opts.accuracy {
        if level == opts.max_refinements {
            return Err(cap_reached(opts, result, n, (result - old).abs()));
        }
        n *= 2;
        old = result;
        result = trapezoid(&f, a, b, n)?;
        evaluations += n + 1;
        level += 1;
        observer.observe(&Refinement {
            level,
            subintervals: n,
            estimate: result,
            change: (result - old).abs(),
        });
    }

    Ok(AdaptiveOutcome {
        estimate: result,
        subintervals: n,
        refinements: level,
        evaluations,
    })
}
