//! Vector Generation.
//!
//! Generator-level determinism and edge-set composition, at the
//! integration seam (oracle + codec + generator together).

use fpverif_core::codec::FloatFormat;
use fpverif_core::common::FunctionKind;
use fpverif_core::oracle::{EdgeBehavior, ReferenceOracle, ScaleMixture, SpecialValuePolicy};
use fpverif_core::vectors::{Expectation, TestVectorGenerator};

fn default_oracle(kind: FunctionKind, format: FloatFormat) -> ReferenceOracle {
    ReferenceOracle::new(
        kind,
        format,
        SpecialValuePolicy::default_for(kind),
        ScaleMixture::default(),
    )
}

#[test]
fn two_generator_instances_agree() {
    let o = default_oracle(FunctionKind::Exp, FloatFormat::Single);
    let a = TestVectorGenerator::new(48).generate(&o, FloatFormat::Single, 1234, 1.0e-5);
    let b = TestVectorGenerator::new(48).generate(&o, FloatFormat::Single, 1234, 1.0e-5);
    assert_eq!(a.len(), b.len());
    for (va, vb) in a.iter().zip(&b) {
        let bits_a: Vec<u64> = va.inputs.iter().map(|x| x.to_bits()).collect();
        let bits_b: Vec<u64> = vb.inputs.iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }
}

#[test]
fn edge_set_precedes_the_random_tail() {
    let o = default_oracle(FunctionKind::Sqrt, FloatFormat::Double);
    let with_tail = TestVectorGenerator::new(10).generate(&o, FloatFormat::Double, 5, 1.0e-12);
    let without_tail = TestVectorGenerator::new(0).generate(&o, FloatFormat::Double, 5, 1.0e-12);
    assert_eq!(with_tail.len(), without_tail.len() + 10);
    for (a, b) in without_tail.iter().zip(&with_tail) {
        assert_eq!(
            a.inputs[0].to_bits(),
            b.inputs[0].to_bits(),
            "edge prefix must not depend on the tail length"
        );
    }
}

#[test]
fn binary_kinds_see_edges_on_both_ports() {
    let o = default_oracle(FunctionKind::Div, FloatFormat::Double);
    let vectors = TestVectorGenerator::new(0).generate(&o, FloatFormat::Double, 0, 1.0e-12);
    // Division by zero arrives via the second port.
    assert!(
        vectors
            .iter()
            .any(|v| v.inputs[1] == 0.0 && v.inputs[0] != 0.0),
        "no vector exercises a zero divisor"
    );
}

#[test]
fn unchecked_policies_drop_special_value_edges() {
    let mut policy = SpecialValuePolicy::default_for(FunctionKind::Exp);
    policy.nan_inputs = EdgeBehavior::Unchecked;
    policy.inf_inputs = EdgeBehavior::Unchecked;
    let o = ReferenceOracle::new(
        FunctionKind::Exp,
        FloatFormat::Single,
        policy,
        ScaleMixture::default(),
    );
    let vectors = TestVectorGenerator::new(0).generate(&o, FloatFormat::Single, 0, 1.0e-5);
    assert!(vectors.iter().all(|v| !v.inputs[0].is_nan()));
    assert!(vectors.iter().all(|v| !v.inputs[0].is_infinite()));
}

#[test]
fn expectations_are_policy_classified() {
    let o = default_oracle(FunctionKind::Sqrt, FloatFormat::Single);
    let vectors = TestVectorGenerator::new(0).generate(&o, FloatFormat::Single, 0, 1.0e-6);
    let negative = vectors
        .iter()
        .find(|v| v.inputs[0] == -1.0)
        .map(|v| v.expected);
    assert!(matches!(negative, Some(Expectation::Class(_))));
    let ordinary = vectors
        .iter()
        .find(|v| v.inputs[0] == 2.0)
        .map(|v| v.expected);
    assert!(matches!(ordinary, Some(Expectation::Finite(_))));
}
