//! Single-pass composite rules over `n` equal subintervals.

use quad_core::{ErrorInfo, Interval, QuadError};

fn subinterval_error(code: &str, message: &str, n: usize) -> QuadError {
    QuadError::InvalidArgument(ErrorInfo::new(code, message).with_context("n", n))
}

/// Composite trapezoidal rule.
///
/// Returns `h * (f(a) + f(b) + 2 * sum_{i=1}^{n-1} f(a + i h)) / 2` with
/// `h = (b - a) / n`. Swapping the bounds flips the sign of the result and
/// non-finite integrand values propagate into the estimate. A degenerate
/// interval yields zero without evaluating `f`.
///
/// # Errors
///
/// [`QuadError::InvalidArgument`] when `n == 0` or a bound is not finite.
pub fn trapezoid<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadError>
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return Err(subinterval_error(
            "zero-subintervals",
            "trapezoid rule needs at least one subinterval",
            n,
        ));
    }
    let interval = Interval::new(a, b)?;
    if interval.is_degenerate() {
        return Ok(0.0);
    }
    let h = interval.step(n);
    let interior: f64 = (1..n).map(|i| f(a + i as f64 * h)).sum();
    Ok(h * (f(a) + f(b) + 2.0 * interior) / 2.0)
}

/// Composite Simpson rule.
///
/// Odd interior nodes carry weight 4, even interior nodes weight 2:
/// `h * (f(a) + f(b) + 4 * odd + 2 * even) / 3`. Exact for cubics. A
/// degenerate interval yields zero without evaluating `f`.
///
/// # Errors
///
/// [`QuadError::InvalidArgument`] when `n` is zero or odd, or a bound is not
/// finite.
pub fn simpson<F>(f: F, a: f64, b: f64, n: usize) -> Result<f64, QuadError>
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return Err(subinterval_error(
            "zero-subintervals",
            "simpson rule needs at least two subintervals",
            n,
        ));
    }
    if n % 2 != 0 {
        return Err(QuadError::InvalidArgument(
            ErrorInfo::new("odd-subintervals", "simpson rule needs an even subinterval count")
                .with_context("n", n)
                .with_hint(format!("use n = {}", n + 1)),
        ));
    }
    let interval = Interval::new(a, b)?;
    if interval.is_degenerate() {
        return Ok(0.0);
    }
    let h = interval.step(n);
    let node = |i: usize| f(a + i as f64 * h);
    let odd: f64 = (1..n).step_by(2).map(node).sum();
    let even: f64 = (2..n - 1).step_by(2).map(node).sum();
    Ok(h * (f(a) + f(b) + 4.0 * odd + 2.0 * even) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_single_panel() {
        let value = trapezoid(|x| x * x, 0.0, 2.0, 1).unwrap();
        assert_eq!(value, 4.0);
    }

    #[test]
    fn trapezoid_rejects_zero_subintervals() {
        let err = trapezoid(|x| x, 0.0, 1.0, 0).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.code(), "zero-subintervals");
    }

    #[test]
    fn simpson_rejects_odd_subintervals() {
        let err = simpson(|x| x, 0.0, 1.0, 7).unwrap_err();
        assert_eq!(err.code(), "odd-subintervals");
        assert_eq!(err.info().hint.as_deref(), Some("use n = 8"));
        assert!(simpson(|x| x, 0.0, 1.0, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn simpson_two_panels_matches_classic_formula() {
        // (h/3) (f0 + 4 f1 + f2) with h = 0.5
        let value = simpson(|x| x * x * x * x, 0.0, 1.0, 2).unwrap();
        let expected = 0.5 / 3.0 * (0.0 + 4.0 * 0.0625 + 1.0);
        assert!((value - expected).abs() < 1e-15);
    }

    #[test]
    fn simpson_weights_follow_index_parity() {
        // Indicator-style integrand exposing each node weight.
        let weights: Vec<f64> = (0..=6)
            .map(|k| {
                let target = k as f64;
                simpson(move |x| if (x - target).abs() < 1e-9 { 3.0 } else { 0.0 }, 0.0, 6.0, 6)
                    .unwrap()
            })
            .collect();
        assert_eq!(weights, vec![1.0, 4.0, 2.0, 4.0, 2.0, 4.0, 1.0]);
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        assert!(trapezoid(|x| x, f64::NAN, 1.0, 4).is_err());
        assert!(simpson(|x| x, 0.0, f64::NEG_INFINITY, 4).is_err());
    }

    #[test]
    fn degenerate_interval_skips_evaluation() {
        let pole = |x: f64| 1.0 / (x - 1.5);
        assert_eq!(trapezoid(pole, 1.5, 1.5, 3).unwrap(), 0.0);
        assert_eq!(simpson(pole, 1.5, 1.5, 4).unwrap(), 0.0);
    }
}
