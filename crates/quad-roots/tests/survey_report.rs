use std::f64::consts::PI;

use quad_core::{QuadError, RootConfig};
use quad_roots::{survey, Algorithm, RootFunction};

fn classroom_config() -> RootConfig {
    RootConfig {
        accuracy: 1e-5,
        ..RootConfig::default()
    }
}

#[test]
fn tanh_midpoint_root_is_found_without_stepping() {
    let report = survey(&RootFunction::Tanh, -PI, PI, &classroom_config(), false).unwrap();
    assert_eq!(report.reference_roots.len(), 1);
    assert!(report.reference_roots[0].abs() < 1e-5);

    let simple = &report.runs[0];
    assert_eq!(simple.algorithm, Algorithm::Simple);
    let outcome = simple.outcome.unwrap();
    assert_eq!(outcome.root, 0.0);
    assert_eq!(outcome.steps, 0);

    // bisection hits zero with its first midpoint, the secant with its first chord
    assert_eq!(report.runs[1].outcome.unwrap().steps, 1);
    assert_eq!(report.runs[3].outcome.unwrap().steps, 1);
    assert!(report.runs.iter().all(|run| run.within_accuracy));
    assert_eq!(report.most_efficient, Some(Algorithm::Simple));
}

#[test]
fn tan_survey_skips_poles() {
    let report = survey(&RootFunction::Tan, -1.0, 4.0, &RootConfig::default(), false).unwrap();
    assert_eq!(report.reference_roots.len(), 2);
    assert!((report.reference_roots[1] - PI).abs() < 1e-5);

    let bisection = &report.runs[1];
    let tangent = &report.runs[2];
    assert!(bisection.within_accuracy);
    assert!(tangent.within_accuracy);
    assert!(tangent.outcome.unwrap().steps < bisection.outcome.unwrap().steps);
}

#[test]
fn report_serializes_without_empty_traces() {
    let report = survey(&RootFunction::Tanh, -1.0, 2.0, &RootConfig::default(), false).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["function"]["kind"], "tanh");
    assert_eq!(json["runs"][1]["algorithm"], "bisection");
    assert!(json["runs"][1].get("trace").is_none());
    assert!(json["runs"][1].get("failure").is_none());
}

#[test]
fn report_hash_is_stable() {
    let parabola: RootFunction = "poly:-4,0,1".parse().unwrap();
    let config = RootConfig::default();
    let first = survey(&parabola, 0.0, 3.0, &config, false).unwrap();
    let second = survey(&parabola, 0.0, 3.0, &config, true).unwrap();
    assert_eq!(first.report_hash, second.report_hash);
    assert_eq!(first.report_hash.len(), 64);
}

#[test]
fn reversed_interval_is_rejected() {
    let err = survey(&RootFunction::Tanh, 2.0, -1.0, &RootConfig::default(), false).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(matches!(err, QuadError::InvalidArgument(_)));
    assert_eq!(err.code(), "empty-interval");
}

#[test]
fn configured_scan_step_below_limit_is_rejected() {
    let config = RootConfig {
        scan_step: 1e-300,
        ..RootConfig::default()
    };
    let err = survey(&RootFunction::Tan, -1.0, 4.0, &config, false).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(err.code(), "too-many-samples");
}
