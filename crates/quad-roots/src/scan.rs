use quad_core::{ErrorInfo, QuadError, RootConfig, Silent};
use serde::{Deserialize, Serialize};

use crate::bracket::root_bisection;
use crate::options::{check_finite, RootOpts};

/// Largest number of sampling steps [`find_roots`] will take.
pub const MAX_SCAN_SAMPLES: usize = 10_000_000;

/// Settings for [`find_roots`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanOpts {
    /// Sampling step used to detect sign changes.
    pub step: f64,
    /// Residual above which a refined sign change is treated as a pole.
    pub residual_limit: f64,
    /// Bisection settings used to refine each sign change.
    pub refine: RootOpts,
}

impl ScanOpts {
    /// Scan settings taken from a configuration.
    pub fn from_config(config: &RootConfig) -> Self {
        Self {
            step: config.scan_step,
            residual_limit: config.residual_limit,
            refine: RootOpts::bracketing(config),
        }
    }
}

impl Default for ScanOpts {
    fn default() -> Self {
        Self::from_config(&RootConfig::default())
    }
}

/// Finds every root of `f` in `[x1, x2]` detectable at the sampling step.
///
/// Samples `f` every `step`, refines each sign change with bisection and
/// keeps the refined point only when `|f(root)|` is within the residual
/// limit, which drops sign changes caused by poles. Roots closer together
/// than the sampling step are reported once. Returned roots are ascending.
///
/// Samples are evaluated one at a time; an interval needing more than
/// [`MAX_SCAN_SAMPLES`] steps is rejected with `too-many-samples`.
pub fn find_roots<F>(f: F, x1: f64, x2: f64, opts: &ScanOpts) -> Result<Vec<f64>, QuadError>
where
    F: Fn(f64) -> f64,
{
    check_finite("x1", x1)?;
    check_finite("x2", x2)?;
    if x1 >= x2 {
        return Err(QuadError::InvalidArgument(
            ErrorInfo::new("empty-interval", "scan interval needs x1 < x2")
                .with_context("x1", x1)
                .with_context("x2", x2),
        ));
    }
    if !opts.step.is_finite() || opts.step <= 0.0 {
        return Err(QuadError::InvalidArgument(
            ErrorInfo::new("non-positive-step", "scan step must be positive and finite")
                .with_context("step", opts.step),
        ));
    }

    let samples = ((x2 - x1) / opts.step).ceil();
    if samples > MAX_SCAN_SAMPLES as f64 {
        return Err(QuadError::InvalidArgument(
            ErrorInfo::new("too-many-samples", "scan step is too small for the interval")
                .with_context("samples", samples)
                .with_context("limit", MAX_SCAN_SAMPLES)
                .with_hint("raise roots.scan_step or narrow the interval"),
        ));
    }
    let samples = samples as usize;
    let point = |k: usize| {
        if k < samples {
            x1 + k as f64 * opts.step
        } else {
            x2
        }
    };

    let mut roots: Vec<f64> = Vec::new();
    let mut x = x1;
    let mut fx = f(x);
    for k in 0..=samples {
        let next = (k < samples).then(|| {
            let xn = point(k + 1);
            (xn, f(xn))
        });
        let candidate = match next {
            _ if fx == 0.0 => Some(x),
            Some((xn, fxn)) if fx * fxn < 0.0 => {
                let outcome = root_bisection(&f, x, xn, &opts.refine, &mut Silent)?;
                (f(outcome.root).abs() <= opts.residual_limit).then_some(outcome.root)
            }
            _ => None,
        };
        if let Some(root) = candidate {
            let duplicate = roots
                .last()
                .is_some_and(|last| (root - last).abs() < opts.step);
            if !duplicate {
                roots.push(root);
            }
        }
        if let Some((xn, fxn)) = next {
            x = xn;
            fx = fxn;
        }
    }
    Ok(roots)
}
