//! Oracle Policies.
//!
//! Verifies that the oracle applies the documented special-value policy
//! of the unit under test, and that the same policy answers identically
//! across repeated queries — policies are immutable campaign data, not
//! mutable state.

use fpverif_core::codec::FloatFormat;
use fpverif_core::common::FunctionKind;
use fpverif_core::oracle::{
    DomainEdge, EdgeBehavior, ReferenceOracle, ScaleMixture, SpecialOutcome, SpecialValuePolicy,
    ZeroEdge,
};

fn oracle_with(kind: FunctionKind, policy: SpecialValuePolicy) -> ReferenceOracle {
    ReferenceOracle::new(kind, FloatFormat::Double, policy, ScaleMixture::default())
}

#[test]
fn sqrt_negative_answers_differ_per_unit() {
    let mut policy = SpecialValuePolicy::default_for(FunctionKind::Sqrt);
    policy.out_of_domain = DomainEdge::FlushToZero;
    let flushing = oracle_with(FunctionKind::Sqrt, policy);

    policy.out_of_domain = DomainEdge::Nan;
    let strict = oracle_with(FunctionKind::Sqrt, policy);

    assert_eq!(
        flushing.special_case(&[-1.0]),
        Some(SpecialOutcome::Exact(0.0))
    );
    assert_eq!(strict.special_case(&[-1.0]), Some(SpecialOutcome::Nan));

    // Stable across repeated queries.
    for _ in 0..10 {
        assert_eq!(
            flushing.special_case(&[-1.0]),
            Some(SpecialOutcome::Exact(0.0))
        );
    }
}

#[test]
fn invsqrt_clamp_maps_negative_to_positive_infinity() {
    let mut policy = SpecialValuePolicy::default_for(FunctionKind::InvSqrt);
    policy.out_of_domain = DomainEdge::ClampToBoundary;
    let o = oracle_with(FunctionKind::InvSqrt, policy);
    assert_eq!(
        o.special_case(&[-4.0]),
        Some(SpecialOutcome::PosInfinity)
    );
}

#[test]
fn log_zero_is_negative_infinity_under_ieee() {
    let o = oracle_with(
        FunctionKind::Log,
        SpecialValuePolicy::default_for(FunctionKind::Log),
    );
    assert_eq!(o.special_case(&[0.0]), Some(SpecialOutcome::NegInfinity));
    assert_eq!(o.special_case(&[-0.0]), Some(SpecialOutcome::NegInfinity));
    assert_eq!(o.special_case(&[-1.0]), Some(SpecialOutcome::Nan));
}

#[test]
fn unchecked_special_values_are_exempt() {
    let mut policy = SpecialValuePolicy::default_for(FunctionKind::Exp);
    policy.nan_inputs = EdgeBehavior::Unchecked;
    policy.inf_inputs = EdgeBehavior::Unchecked;
    let o = oracle_with(FunctionKind::Exp, policy);
    assert_eq!(
        o.special_case(&[f64::NAN]),
        Some(SpecialOutcome::Exempt)
    );
    assert_eq!(
        o.special_case(&[f64::INFINITY]),
        Some(SpecialOutcome::Exempt)
    );
}

#[test]
fn exp_limits_at_infinity_are_exact() {
    let o = oracle_with(
        FunctionKind::Exp,
        SpecialValuePolicy::default_for(FunctionKind::Exp),
    );
    assert_eq!(
        o.special_case(&[f64::INFINITY]),
        Some(SpecialOutcome::PosInfinity)
    );
    assert_eq!(
        o.special_case(&[f64::NEG_INFINITY]),
        Some(SpecialOutcome::Exact(0.0))
    );
}

#[test]
fn acos_infinite_inputs_follow_the_clamp() {
    let o = oracle_with(
        FunctionKind::Acos,
        SpecialValuePolicy::default_for(FunctionKind::Acos),
    );
    assert_eq!(
        o.special_case(&[f64::INFINITY]),
        Some(SpecialOutcome::Exact(0.0))
    );
    assert_eq!(
        o.special_case(&[f64::NEG_INFINITY]),
        Some(SpecialOutcome::Exact(std::f64::consts::PI))
    );
}

#[test]
fn smg_exemption_never_silently_fixes_zero() {
    let mut policy = SpecialValuePolicy::default_for(FunctionKind::ScaleMixtureGaussian);
    policy.at_zero = ZeroEdge::Exempt;
    let o = ReferenceOracle::new(
        FunctionKind::ScaleMixtureGaussian,
        FloatFormat::Half,
        policy,
        ScaleMixture::default(),
    );
    // The harness neither demands the documented infinity nor the finite
    // substitution: the vector is exempt.
    assert_eq!(o.special_case(&[0.0]), Some(SpecialOutcome::Exempt));
    // Non-zero inputs stay on the tolerance path.
    assert_eq!(o.special_case(&[0.5]), None);
}

#[test]
fn working_precision_is_f32_for_narrow_formats() {
    let policy = SpecialValuePolicy::default_for(FunctionKind::Div);
    let narrow = ReferenceOracle::new(
        FunctionKind::Div,
        FloatFormat::Half,
        policy,
        ScaleMixture::default(),
    );
    let wide = ReferenceOracle::new(
        FunctionKind::Div,
        FloatFormat::Double,
        policy,
        ScaleMixture::default(),
    );
    let expected32 = f64::from(1.0_f32 / 3.0_f32);
    assert_eq!(narrow.expected(&[1.0, 3.0]), expected32);
    assert_eq!(wide.expected(&[1.0, 3.0]), 1.0 / 3.0);
    assert_ne!(narrow.expected(&[1.0, 3.0]), wide.expected(&[1.0, 3.0]));
}
