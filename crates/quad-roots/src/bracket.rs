//! Searches that keep the root between two points.

use quad_core::{ErrorInfo, Observer, QuadError, RootStep};

use crate::options::{check_finite, max_steps_error, RootOpts, RootOutcome};

/// Simple search with step halving.
///
/// Walks from `x` in steps of `dx`. When the sign of `f` differs from its
/// sign at the starting point the step is undone and `dx` halved. Stops once
/// `|dx| <= accuracy` or the starting point is itself a root. `dx` must point
/// towards the root.
pub fn root_simple<F, O>(
    f: F,
    mut x: f64,
    mut dx: f64,
    opts: &RootOpts,
    observer: &mut O,
) -> Result<RootOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    O: Observer<RootStep> + ?Sized,
{
    opts.validate()?;
    check_finite("x", x)?;
    check_finite("dx", dx)?;

    let f0 = f(x);
    let mut step = 0;
    observer.observe(&RootStep { step, x, dx, fx: f0 });
    while dx.abs() > opts.accuracy && f0 != 0.0 {
        x += dx;
        let fx = f(x);
        if f0 * fx < 0.0 {
            // stepped past the root
            x -= dx;
            dx /= 2.0;
        }
        step += 1;
        if step > opts.max_steps {
            return Err(max_steps_error("root_simple", opts.max_steps));
        }
        observer.observe(&RootStep { step, x, dx, fx });
    }
    Ok(RootOutcome { root: x, steps: step })
}

/// Bisection search on the bracket `[x1, x2]`.
///
/// # Errors
///
/// [`QuadError::Root`] with code `no-sign-change` when `f(x1) * f(x2) > 0`.
pub fn root_bisection<F, O>(
    f: F,
    mut x1: f64,
    mut x2: f64,
    opts: &RootOpts,
    observer: &mut O,
) -> Result<RootOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    O: Observer<RootStep> + ?Sized,
{
    opts.validate()?;
    check_finite("x1", x1)?;
    check_finite("x2", x2)?;

    let mut f1 = f(x1);
    let f2 = f(x2);
    if f1 * f2 > 0.0 {
        return Err(QuadError::Root(
            ErrorInfo::new("no-sign-change", "f(x1) * f(x2) > 0")
                .with_context("x1", x1)
                .with_context("x2", x2)
                .with_hint("pick a bracket where f changes sign"),
        ));
    }

    let mut x_mid = (x1 + x2) / 2.0;
    let mut f_mid = f(x_mid);
    let mut dx = x2 - x1;
    let mut step = 0;
    observer.observe(&RootStep {
        step,
        x: x_mid,
        dx,
        fx: f_mid,
    });
    while dx.abs() > opts.accuracy {
        if f_mid == 0.0 {
            dx = 0.0;
        } else {
            if f1 * f_mid > 0.0 {
                x1 = x_mid;
                f1 = f_mid;
            } else {
                x2 = x_mid;
            }
            x_mid = (x1 + x2) / 2.0;
            f_mid = f(x_mid);
            dx = x2 - x1;
        }
        step += 1;
        if step > opts.max_steps {
            return Err(max_steps_error("root_bisection", opts.max_steps));
        }
        observer.observe(&RootStep {
            step,
            x: x_mid,
            dx,
            fx: f_mid,
        });
    }
    Ok(RootOutcome {
        root: x_mid,
        steps: step,
    })
}

#[cfg(test)]
mod tests {
    use quad_core::{Silent, Trace};

    use super::*;

    fn parabola(x: f64) -> f64 {
        x * x - 4.0
    }

    #[test]
    fn simple_search_finds_parabola_root() {
        let outcome = root_simple(parabola, 1.0, 0.1, &RootOpts::new(1e-6, 1000), &mut Silent)
            .unwrap();
        assert!((outcome.root - 2.0).abs() < 1e-5);
    }

    #[test]
    fn simple_search_stops_on_exact_root() {
        let mut trace = Trace::new();
        let outcome =
            root_simple(parabola, 2.0, 0.1, &RootOpts::default(), &mut trace).unwrap();
        assert_eq!(outcome.root, 2.0);
        assert_eq!(outcome.steps, 0);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn simple_search_walking_away_exhausts_budget() {
        let err = root_simple(parabola, 3.0, 0.5, &RootOpts::new(1e-6, 50), &mut Silent)
            .unwrap_err();
        assert!(matches!(err, QuadError::Convergence(_)));
        assert_eq!(err.code(), "max-steps");
    }

    #[test]
    fn bisection_finds_parabola_root() {
        let outcome =
            root_bisection(parabola, 0.0, 3.0, &RootOpts::new(1e-6, 1000), &mut Silent).unwrap();
        assert!((outcome.root - 2.0).abs() < 1e-5);
        // 3 / 2^k <= 1e-6 after 22 halvings
        assert_eq!(outcome.steps, 22);
    }

    #[test]
    fn bisection_requires_sign_change() {
        let err = root_bisection(parabola, 3.0, 4.0, &RootOpts::default(), &mut Silent)
            .unwrap_err();
        assert!(matches!(err, QuadError::Root(_)));
        assert_eq!(err.code(), "no-sign-change");
    }

    #[test]
    fn bisection_stops_when_midpoint_is_root() {
        let outcome =
            root_bisection(parabola, 0.0, 4.0, &RootOpts::default(), &mut Silent).unwrap();
        assert_eq!(outcome.root, 2.0);
        assert_eq!(outcome.steps, 1);
    }

    #[test]
    fn bisection_trace_halves_the_bracket() {
        let mut trace = Trace::new();
        root_bisection(parabola, 0.0, 3.0, &RootOpts::new(1e-3, 100), &mut trace).unwrap();
        let widths: Vec<f64> = trace.events().iter().map(|step| step.dx).collect();
        for pair in widths.windows(2) {
            assert_eq!(pair[1], pair[0] / 2.0);
        }
    }
}
