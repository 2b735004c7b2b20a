//! Comparator Rules.
//!
//! Parameterized checks of the ordered comparison rules: exact equality
//! first (±0 equal), NaN never equal, infinities only with matching sign,
//! then scale-relative tolerance across the epsilon range the campaigns
//! actually use (1e-2 for low-precision approximators down to 1e-12 for
//! double-precision arithmetic).

use fpverif_core::compare::{nearly_equal, relative_error};
use rstest::rstest;

#[rstest]
#[case(0.0, -0.0)]
#[case(1.0, 1.0)]
#[case(-65504.0, -65504.0)]
#[case(f64::INFINITY, f64::INFINITY)]
#[case(f64::NEG_INFINITY, f64::NEG_INFINITY)]
fn exact_equality_passes_at_zero_epsilon(#[case] a: f64, #[case] b: f64) {
    assert!(nearly_equal(a, b, 0.0));
}

#[rstest]
#[case(f64::NAN, f64::NAN)]
#[case(f64::NAN, 0.0)]
#[case(3.5, f64::NAN)]
#[case(f64::NAN, f64::INFINITY)]
fn nan_never_compares_equal(#[case] a: f64, #[case] b: f64) {
    assert!(!nearly_equal(a, b, 1.0e2));
}

#[rstest]
#[case(f64::INFINITY, f64::NEG_INFINITY)]
#[case(f64::NEG_INFINITY, f64::INFINITY)]
#[case(f64::INFINITY, 1.0e308)]
#[case(-1.0e308, f64::NEG_INFINITY)]
fn mismatched_infinities_fail(#[case] a: f64, #[case] b: f64) {
    assert!(!nearly_equal(a, b, 1.0e2));
}

#[rstest]
#[case(1.0e-2)]
#[case(1.0e-5)]
#[case(1.0e-8)]
#[case(1.0e-12)]
fn tolerance_boundary_is_inclusive(#[case] epsilon: f64) {
    let expected = 1000.0;
    // Exactly at the boundary passes; just beyond it fails.
    let at = expected * (1.0 + epsilon);
    assert!(nearly_equal(at, expected, epsilon * 1.01));
    let beyond = expected * (1.0 + epsilon * 4.0);
    assert!(!nearly_equal(beyond, expected, epsilon));
}

#[rstest]
#[case(1.0, 1.0 + 1.0e-9)]
#[case(-7.25, -7.2499)]
#[case(1.0e-30, 2.0e-30)]
#[case(5.0e7, 5.0001e7)]
fn comparison_is_symmetric(#[case] a: f64, #[case] b: f64) {
    for epsilon in [1.0e-2, 1.0e-5, 1.0e-8, 1.0e-12] {
        assert_eq!(
            nearly_equal(a, b, epsilon),
            nearly_equal(b, a, epsilon),
            "asymmetric at {epsilon}"
        );
    }
}

#[test]
fn relative_error_is_scale_relative() {
    // Same absolute difference, wildly different relative error.
    let small = relative_error(1.0, 1.1);
    let large = relative_error(1.0e9, 1.0e9 + 0.1);
    assert!(small > 1.0e6 * large);
}

#[test]
fn epsilon_is_never_implied() {
    // With a zero epsilon, only exact matches pass: the comparator has
    // no tolerance of its own.
    assert!(!nearly_equal(1.0, 1.0 + f64::EPSILON, 0.0));
}
