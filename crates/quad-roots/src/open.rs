//! Open methods: secant and Newton-Raphson (tangent).

use quad_core::{ErrorInfo, Observer, QuadError, RootStep};

use crate::options::{check_finite, max_steps_error, RootOpts, RootOutcome};

/// Secant search from the two guesses `x0` and `x1`.
///
/// # Errors
///
/// [`QuadError::Root`] with code `horizontal-secant` when two consecutive
/// function values are equal.
pub fn root_secant<F, O>(
    f: F,
    mut x0: f64,
    mut x1: f64,
    opts: &RootOpts,
    observer: &mut O,
) -> Result<RootOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    O: Observer<RootStep> + ?Sized,
{
    opts.validate()?;
    check_finite("x0", x0)?;
    check_finite("x1", x1)?;

    let mut f0 = f(x0);
    let mut dx = x1 - x0;
    let mut step = 0;
    observer.observe(&RootStep {
        step,
        x: x0,
        dx,
        fx: f0,
    });
    if f0 == 0.0 {
        return Ok(RootOutcome { root: x0, steps: 0 });
    }
    while dx.abs() > opts.accuracy {
        let f1 = f(x1);
        if f1 == 0.0 {
            return Ok(RootOutcome { root: x1, steps: step });
        }
        if f1 == f0 {
            return Err(QuadError::Root(
                ErrorInfo::new("horizontal-secant", "secant is horizontal, f(x0) = f(x1)")
                    .with_context("x0", x0)
                    .with_context("x1", x1),
            ));
        }
        dx *= -f1 / (f1 - f0);
        x0 = x1;
        f0 = f1;
        x1 += dx;
        step += 1;
        if step > opts.max_steps {
            return Err(max_steps_error("root_secant", opts.max_steps));
        }
        observer.observe(&RootStep {
            step,
            x: x1,
            dx,
            fx: f1,
        });
    }
    Ok(RootOutcome { root: x1, steps: step })
}

fn flat_derivative(x: f64) -> QuadError {
    QuadError::Root(
        ErrorInfo::new("zero-derivative", "df/dx = 0, tangent search cannot proceed")
            .with_context("x", x),
    )
}

/// Newton-Raphson search from `x0` using the derivative `fp`.
///
/// Every Newton update counts as a step. Stops once the update is no larger
/// than the accuracy or lands exactly on a root.
///
/// # Errors
///
/// [`QuadError::Root`] with code `zero-derivative` when `fp` vanishes at a
/// guess.
pub fn root_tangent<F, D, O>(
    f: F,
    fp: D,
    mut x0: f64,
    opts: &RootOpts,
    observer: &mut O,
) -> Result<RootOutcome, QuadError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
    O: Observer<RootStep> + ?Sized,
{
    opts.validate()?;
    check_finite("x0", x0)?;

    let mut f0 = f(x0);
    let fp0 = fp(x0);
    if fp0 == 0.0 {
        return Err(flat_derivative(x0));
    }
    let mut step = 0;
    observer.observe(&RootStep {
        step,
        x: x0,
        dx: -f0 / fp0,
        fx: f0,
    });
    if f0 == 0.0 {
        return Ok(RootOutcome { root: x0, steps: 0 });
    }
    loop {
        let fp0 = fp(x0);
        if fp0 == 0.0 {
            return Err(flat_derivative(x0));
        }
        let dx = -f0 / fp0;
        x0 += dx;
        f0 = f(x0);
        step += 1;
        observer.observe(&RootStep {
            step,
            x: x0,
            dx,
            fx: f0,
        });
        if dx.abs() <= opts.accuracy || f0 == 0.0 {
            return Ok(RootOutcome { root: x0, steps: step });
        }
        if step >= opts.max_steps {
            return Err(max_steps_error("root_tangent", opts.max_steps));
        }
    }
}

#[cfg(test)]
mod tests {
    use quad_core::{Silent, Trace};

    use super::*;

    fn parabola(x: f64) -> f64 {
        x * x - 4.0
    }

    #[test]
    fn secant_finds_parabola_root() {
        let outcome =
            root_secant(parabola, 1.0, 3.0, &RootOpts::new(1e-6, 20), &mut Silent).unwrap();
        assert!((outcome.root - 2.0).abs() < 1e-5);
        assert!(outcome.steps < 20);
    }

    #[test]
    fn secant_returns_exact_first_guess() {
        let outcome = root_secant(parabola, 2.0, 5.0, &RootOpts::default(), &mut Silent).unwrap();
        assert_eq!(outcome, RootOutcome { root: 2.0, steps: 0 });
    }

    #[test]
    fn secant_rejects_horizontal_chord() {
        // Symmetric guesses give f(x0) == f(x1).
        let err =
            root_secant(parabola, -1.0, 1.0, &RootOpts::default(), &mut Silent).unwrap_err();
        assert_eq!(err.code(), "horizontal-secant");
    }

    #[test]
    fn tangent_finds_parabola_root() {
        let mut trace = Trace::new();
        let outcome = root_tangent(
            parabola,
            |x| 2.0 * x,
            1.5,
            &RootOpts::new(1e-6, 20),
            &mut trace,
        )
        .unwrap();
        assert!((outcome.root - 2.0).abs() < 1e-6);
        assert_eq!(trace.len(), outcome.steps + 1);
    }

    #[test]
    fn tangent_rejects_flat_derivative() {
        let err = root_tangent(parabola, |x| 2.0 * x, 0.0, &RootOpts::default(), &mut Silent)
            .unwrap_err();
        assert_eq!(err.code(), "zero-derivative");
    }

    #[test]
    fn tangent_step_budget_is_enforced() {
        // Newton cycles between 0 and 1 on x^3 - 2x + 2.
        let err = root_tangent(
            |x: f64| x * x * x - 2.0 * x + 2.0,
            |x: f64| 3.0 * x * x - 2.0,
            0.0,
            &RootOpts::new(1e-6, 20),
            &mut Silent,
        )
        .unwrap_err();
        assert_eq!(err.code(), "max-steps");
        assert_eq!(err.info().context["algorithm"], "root_tangent");
    }
}
