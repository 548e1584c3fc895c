use quad_rules::{adaptive_trapezoid, simpson, trapezoid, Integrand};
use proptest::prelude::*;

fn close(actual: f64, expected: f64, scale: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * scale.max(1.0)
}

proptest! {
    #[test]
    fn constant_integrand_is_exact_for_every_rule(
        c in -50.0f64..50.0,
        a in -10.0f64..10.0,
        width in -10.0f64..10.0,
        half_n in 1usize..200,
    ) {
        let b = a + width;
        let expected = c * (b - a);
        let scale = c.abs() * width.abs();
        let n = 2 * half_n;
        prop_assert!(close(trapezoid(|_| c, a, b, n).unwrap(), expected, scale));
        prop_assert!(close(trapezoid(|_| c, a, b, n - 1).unwrap(), expected, scale));
        prop_assert!(close(simpson(|_| c, a, b, n).unwrap(), expected, scale));
        prop_assert!(close(adaptive_trapezoid(|_| c, a, b, 1e-6).unwrap(), expected, scale));
    }

    #[test]
    fn trapezoid_is_exact_for_linear_integrands(
        slope in -5.0f64..5.0,
        offset in -5.0f64..5.0,
        a in -5.0f64..5.0,
        b in -5.0f64..5.0,
        n in 1usize..500,
    ) {
        let f = |x: f64| slope * x + offset;
        let expected = 0.5 * slope * (b * b - a * a) + offset * (b - a);
        let value = trapezoid(f, a, b, n).unwrap();
        prop_assert!(close(value, expected, 100.0), "value {} expected {}", value, expected);
    }

    #[test]
    fn simpson_is_exact_up_to_degree_three(
        coefficients in prop::collection::vec(-3.0f64..3.0, 1..=6),
        a in -2.0f64..2.0,
        b in -2.0f64..2.0,
        half_n in 1usize..100,
    ) {
        let poly = Integrand::Polynomial { coefficients };
        prop_assume!(poly.degree().is_some_and(|degree| degree <= 3));
        let expected = poly.exact(a, b).unwrap();
        let value = simpson(poly.as_fn(), a, b, 2 * half_n).unwrap();
        prop_assert!(close(value, expected, 100.0), "value {} expected {}", value, expected);
    }

    #[test]
    fn reversing_bounds_negates_trapezoid(
        a in -3.0f64..3.0,
        b in -3.0f64..3.0,
        n in 1usize..300,
    ) {
        let forward = trapezoid(|x: f64| x.sin() + x * x, a, b, n).unwrap();
        let backward = trapezoid(|x: f64| x.sin() + x * x, b, a, n).unwrap();
        prop_assert!(close(forward, -backward, 10.0));
    }

    #[test]
    fn degenerate_interval_is_zero(a in -100.0f64..100.0, n in 1usize..100) {
        prop_assert_eq!(trapezoid(|x: f64| x.exp().sin(), a, a, n).unwrap(), 0.0);
        prop_assert_eq!(simpson(|x: f64| x.cos(), a, a, 2 * n).unwrap(), 0.0);
        prop_assert_eq!(adaptive_trapezoid(|x: f64| x.cos(), a, a, 1e-6).unwrap(), 0.0);
        let pole = move |x: f64| 1.0 / (x - a);
        prop_assert_eq!(trapezoid(pole, a, a, n).unwrap(), 0.0);
        prop_assert_eq!(simpson(pole, a, a, 2 * n).unwrap(), 0.0);
    }
}

#[test]
fn odd_n_and_zero_n_fail_loudly() {
    for n in [1, 3, 5, 101] {
        assert!(simpson(|x| x, 0.0, 1.0, n).unwrap_err().is_invalid_argument());
    }
    assert!(simpson(|x| x, 0.0, 1.0, 0).unwrap_err().is_invalid_argument());
    assert!(trapezoid(|x| x, 0.0, 1.0, 0).unwrap_err().is_invalid_argument());
}
