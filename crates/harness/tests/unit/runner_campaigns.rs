//! End-to-End Campaigns.
//!
//! Full sweeps against the behavioral models, determinism, and the
//! partial-failure semantics: every vector is attempted, every failure
//! surfaced, and a single bad vector never aborts a campaign.

use fpverif_core::ConformanceRunner;
use fpverif_core::codec::FloatFormat;
use fpverif_core::common::FunctionKind;
use fpverif_core::oracle::ZeroEdge;
use fpverif_core::runner::{FailureKind, VectorOutcome};
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;
use crate::common::mocks::stuck::StuckAt;
use crate::common::mocks::{SkewedAdder, StuckUnit};

#[test]
fn every_kind_passes_at_every_format() {
    let ctx = TestContext::new();
    for format in [FloatFormat::Half, FloatFormat::Single, FloatFormat::Double] {
        for kind in FunctionKind::ALL {
            let report = ctx.run(kind, format);
            assert!(
                report.passed(),
                "{kind} at {format} failed: {:?}",
                report.failures().collect::<Vec<_>>()
            );
            assert_eq!(report.stats.vectors, report.results.len());
        }
    }
}

#[test]
fn identical_campaigns_produce_identical_result_sequences() {
    let ctx = TestContext::new();
    let a = ctx.run(FunctionKind::Sigmoid, FloatFormat::Single);
    let b = ctx.run(FunctionKind::Sigmoid, FloatFormat::Single);
    assert_eq!(a.results.len(), b.results.len());
    for (ra, rb) in a.results.iter().zip(&b.results) {
        assert_eq!(ra.actual.map(f64::to_bits), rb.actual.map(f64::to_bits));
        assert_eq!(ra.fill_wait, rb.fill_wait);
        assert_eq!(ra.throughput, rb.throughput);
        assert_eq!(ra.outcome.is_failure(), rb.outcome.is_failure());
    }
    // The serialized reports agree byte for byte.
    let ja = serde_json::to_string(&a).unwrap();
    let jb = serde_json::to_string(&b).unwrap();
    assert_eq!(ja, jb);
}

#[test]
fn divider_campaign_measures_constant_throughput() {
    let ctx = TestContext::new();
    let report = ctx.run(FunctionKind::Div, FloatFormat::Single);
    let expected = ctx.config.timing.variable_latency;
    for result in &report.results {
        assert_eq!(result.throughput, expected, "vector {}", result.index);
    }
    assert_eq!(report.stats.throughput_min, expected);
    assert_eq!(report.stats.throughput_max, expected);
}

#[test]
fn skewed_unit_fails_tolerance_without_aborting() {
    let ctx = TestContext::new().with_random_vectors(16);
    let spec = ctx.campaign(FunctionKind::Add, FloatFormat::Double);
    let mut dut = SkewedAdder::new(FloatFormat::Double, 1.0e-3);
    let report = ConformanceRunner::run(&mut dut, &spec);

    assert!(!report.passed());
    // Partial-failure semantics: everything was attempted and recorded.
    assert_eq!(report.results.len(), report.stats.vectors);
    assert!(report.stats.failed >= 2, "expected several tolerance failures");
    assert!(report.stats.passed >= 1, "class checks still pass");
    // Every failure is a tolerance diagnostic carrying the relative error.
    for failure in report.failures() {
        match failure.outcome {
            VectorOutcome::Failed(FailureKind::Tolerance { relative_error, .. }) => {
                assert!(relative_error > 1.0e-4);
            }
            ref other => panic!("unexpected outcome {other:?}"),
        }
    }
}

#[test]
fn stuck_output_times_out_every_vector_and_continues() {
    let ctx = TestContext::new().with_random_vectors(3);
    let mut spec = ctx.campaign(FunctionKind::Div, FloatFormat::Single);
    spec.budget = 50;
    let mut dut = StuckUnit::new(StuckAt::OutputValid);
    let report = ConformanceRunner::run(&mut dut, &spec);

    assert!(!report.passed());
    assert_eq!(report.stats.timeouts, report.stats.vectors);
    assert_eq!(report.stats.failed, report.stats.vectors);
    for result in &report.results {
        assert!(result.actual.is_none());
        assert!(matches!(
            result.outcome,
            VectorOutcome::Failed(FailureKind::Timeout(_))
        ));
    }
}

#[test]
fn stuck_readiness_times_out_too() {
    let ctx = TestContext::new().with_random_vectors(2);
    let mut spec = ctx.campaign(FunctionKind::Div, FloatFormat::Single);
    spec.budget = 25;
    let mut dut = StuckUnit::new(StuckAt::FillReady);
    let report = ConformanceRunner::run(&mut dut, &spec);
    assert_eq!(report.stats.timeouts, report.stats.vectors);
}

#[test]
fn smg_zero_exemption_is_reported_not_fixed() {
    let mut ctx = TestContext::new().with_random_vectors(8);
    ctx.config.policy.smg_at_zero = ZeroEdge::Exempt;
    let report = ctx.run(FunctionKind::ScaleMixtureGaussian, FloatFormat::Half);
    assert!(report.passed(), "exempt vectors never fail a campaign");
    assert!(
        report.stats.exempt >= 2,
        "both signed zeros must be driven and recorded as exempt"
    );
    let exempt_zeroes = report
        .results
        .iter()
        .filter(|r| matches!(r.outcome, VectorOutcome::Exempt))
        .count();
    assert_eq!(exempt_zeroes, report.stats.exempt);
}

#[test]
fn sqrt_negative_verdict_is_stable_across_runs() {
    let ctx = TestContext::new();
    for _ in 0..2 {
        let report = ctx.run(FunctionKind::Sqrt, FloatFormat::Single);
        let negative = report
            .results
            .iter()
            .find(|r| r.inputs[0] == -1.0)
            .expect("the edge set always drives sqrt(-1)");
        assert!(matches!(negative.outcome, VectorOutcome::Passed));
        assert_eq!(negative.actual.map(f64::to_bits), Some(0.0_f64.to_bits()));
    }
}
