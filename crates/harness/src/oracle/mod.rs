//! Reference oracle.
//!
//! Computes, per function kind, the result a conforming unit must produce:
//! 1. **Ordinary arithmetic** (add/sub/mul/fma/div) is the native operation
//!    at the campaign's working precision (`f32` for the 16- and 32-bit
//!    formats, `f64` otherwise), rounded into the target format by the
//!    codec before comparison.
//! 2. **Transcendental functions** are evaluated at library precision and
//!    then filtered through the unit's documented [`SpecialValuePolicy`],
//!    because approximation units commonly special-case domain edges
//!    differently from the pure mathematical function.
//! 3. **Two-phase functions** (acos, atan2) are answered single-shot from
//!    the closed form — the intermediate phase is the device's private
//!    business; only the final capture is compared.

/// Special-value policies and outcome classes.
pub mod policy;

/// Scale-mixture Gaussian derivative parameters and evaluation.
pub mod scale_mixture;

pub use policy::{DomainEdge, EdgeBehavior, SpecialOutcome, SpecialValuePolicy, ZeroEdge};
pub use scale_mixture::ScaleMixture;

use std::f64::consts::PI;

use crate::codec::FloatFormat;
use crate::common::FunctionKind;

/// Per-campaign reference oracle.
///
/// Holds the function kind, the campaign format (which fixes the working
/// precision for arithmetic kinds), the unit's documented policy, and the
/// scale-mixture parameters. Immutable for the life of the campaign.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceOracle {
    kind: FunctionKind,
    format: FloatFormat,
    policy: SpecialValuePolicy,
    smg: ScaleMixture,
}

impl ReferenceOracle {
    /// Creates an oracle for one (kind, format) campaign.
    pub fn new(
        kind: FunctionKind,
        format: FloatFormat,
        policy: SpecialValuePolicy,
        smg: ScaleMixture,
    ) -> Self {
        Self {
            kind,
            format,
            policy,
            smg,
        }
    }

    /// The function kind this oracle answers.
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The unit policy this oracle applies.
    pub fn policy(&self) -> &SpecialValuePolicy {
        &self.policy
    }

    /// The mathematically expected result, before any policy filtering.
    ///
    /// Arithmetic kinds compute at the working precision of the campaign
    /// format; transcendental kinds at library precision.
    pub fn expected(&self, inputs: &[f64]) -> f64 {
        let a = inputs.first().copied().unwrap_or(0.0);
        let b = inputs.get(1).copied().unwrap_or(0.0);
        let c = inputs.get(2).copied().unwrap_or(0.0);
        match self.kind {
            FunctionKind::Add => self.arith(a, b, 0.0, |x, y, _| x + y, |x, y, _| x + y),
            FunctionKind::Sub => self.arith(a, b, 0.0, |x, y, _| x - y, |x, y, _| x - y),
            FunctionKind::Mul => self.arith(a, b, 0.0, |x, y, _| x * y, |x, y, _| x * y),
            FunctionKind::Div => self.arith(a, b, 0.0, |x, y, _| x / y, |x, y, _| x / y),
            FunctionKind::FusedMulAdd => self.arith(
                a,
                b,
                c,
                |x, y, z| x.mul_add(y, z),
                |x, y, z| x.mul_add(y, z),
            ),
            FunctionKind::Sqrt => a.sqrt(),
            FunctionKind::InvSqrt => 1.0 / a.sqrt(),
            FunctionKind::Reciprocal => 1.0 / a,
            FunctionKind::Exp => a.exp(),
            FunctionKind::Log => a.ln(),
            FunctionKind::Sigmoid => 1.0 / (1.0 + (-a).exp()),
            FunctionKind::SoftPlus => a.exp().ln_1p(),
            FunctionKind::Sin => a.sin(),
            FunctionKind::Cos => a.cos(),
            FunctionKind::Acos => a.acos(),
            FunctionKind::Atan2 => a.atan2(b),
            FunctionKind::ScaleMixtureGaussian => self.smg.eval(a),
        }
    }

    /// Classifies a vector whose expected behavior is a policy matter
    /// rather than a tolerance comparison.
    ///
    /// Returns `None` for ordinary vectors: those are compared against
    /// [`ReferenceOracle::expected`] with the campaign epsilon.
    pub fn special_case(&self, inputs: &[f64]) -> Option<SpecialOutcome> {
        if inputs.iter().any(|v| v.is_nan()) {
            return Some(match self.policy.nan_inputs {
                EdgeBehavior::Propagate => SpecialOutcome::Nan,
                EdgeBehavior::Unchecked => SpecialOutcome::Exempt,
            });
        }

        // Domain edges outrank infinity handling: a clamping arccosine
        // clamps +∞ like any other argument above one.
        if let Some(outcome) = self.domain_edge(inputs) {
            return Some(outcome);
        }

        if inputs.iter().any(|v| v.is_infinite()) {
            match self.policy.inf_inputs {
                EdgeBehavior::Unchecked => return Some(SpecialOutcome::Exempt),
                EdgeBehavior::Propagate => {
                    let r = self.expected(inputs);
                    if !r.is_finite() {
                        return Some(SpecialOutcome::classify(r));
                    }
                    // Saturating kinds hit their limits exactly; others
                    // stay on the tolerance path.
                    if matches!(
                        self.kind,
                        FunctionKind::Exp | FunctionKind::Sigmoid | FunctionKind::SoftPlus
                    ) {
                        return Some(SpecialOutcome::Exact(r));
                    }
                    return None;
                }
            }
        }

        // A mathematically non-finite expected result (division by zero,
        // log of zero under IEEE policy) is a class check, never a
        // tolerance comparison.
        let r = self.expected(inputs);
        if r.is_nan() || r.is_infinite() {
            return Some(SpecialOutcome::classify(r));
        }
        None
    }

    /// Kind-specific domain-edge classification.
    fn domain_edge(&self, inputs: &[f64]) -> Option<SpecialOutcome> {
        let x = inputs.first().copied().unwrap_or(0.0);
        match self.kind {
            FunctionKind::Sqrt if x < 0.0 => Some(match self.policy.out_of_domain {
                DomainEdge::Nan => SpecialOutcome::Nan,
                DomainEdge::ClampToBoundary | DomainEdge::FlushToZero => {
                    SpecialOutcome::Exact(0.0)
                }
                DomainEdge::Unchecked => SpecialOutcome::Exempt,
            }),
            FunctionKind::InvSqrt if x < 0.0 => Some(match self.policy.out_of_domain {
                DomainEdge::Nan => SpecialOutcome::Nan,
                DomainEdge::ClampToBoundary => SpecialOutcome::PosInfinity,
                DomainEdge::FlushToZero => SpecialOutcome::Exact(0.0),
                DomainEdge::Unchecked => SpecialOutcome::Exempt,
            }),
            FunctionKind::InvSqrt | FunctionKind::Reciprocal if x == 0.0 => {
                self.zero_edge(x)
            }
            FunctionKind::Log if x < 0.0 => Some(match self.policy.out_of_domain {
                DomainEdge::Nan => SpecialOutcome::Nan,
                DomainEdge::ClampToBoundary => SpecialOutcome::NegInfinity,
                DomainEdge::FlushToZero => SpecialOutcome::Exact(0.0),
                DomainEdge::Unchecked => SpecialOutcome::Exempt,
            }),
            FunctionKind::Log if x == 0.0 => match self.policy.at_zero {
                // IEEE log(±0) is −∞; the generic classification below
                // reports it from the computed result.
                ZeroEdge::Ieee => None,
                ZeroEdge::SignedInfinity => Some(SpecialOutcome::NegInfinity),
                ZeroEdge::Exempt => Some(SpecialOutcome::Exempt),
            },
            FunctionKind::Acos if x.abs() > 1.0 => Some(match self.policy.out_of_domain {
                DomainEdge::Nan => SpecialOutcome::Nan,
                DomainEdge::ClampToBoundary => {
                    if x > 1.0 {
                        SpecialOutcome::Exact(0.0)
                    } else {
                        SpecialOutcome::Exact(PI)
                    }
                }
                DomainEdge::FlushToZero => SpecialOutcome::Exact(0.0),
                DomainEdge::Unchecked => SpecialOutcome::Exempt,
            }),
            FunctionKind::Sigmoid => {
                let t = self.policy.saturation_threshold?;
                if x.abs() >= t {
                    Some(SpecialOutcome::Exact(if x > 0.0 { 1.0 } else { 0.0 }))
                } else {
                    None
                }
            }
            FunctionKind::SoftPlus => {
                let t = self.policy.saturation_threshold?;
                // Only the low side saturates exactly; softplus tracks the
                // identity on the high side and stays tolerance-checked.
                if x <= -t {
                    Some(SpecialOutcome::Exact(0.0))
                } else {
                    None
                }
            }
            FunctionKind::ScaleMixtureGaussian if x == 0.0 => self.zero_edge(x),
            _ => None,
        }
    }

    /// Zero-input classification under the campaign's at-zero policy.
    fn zero_edge(&self, x: f64) -> Option<SpecialOutcome> {
        match self.policy.at_zero {
            ZeroEdge::Ieee => None,
            ZeroEdge::SignedInfinity => Some(match self.kind {
                // The derivative's leading −x factor fixes the convention:
                // +0 maps to −∞ and −0 to +∞.
                FunctionKind::ScaleMixtureGaussian => {
                    if x.is_sign_negative() {
                        SpecialOutcome::PosInfinity
                    } else {
                        SpecialOutcome::NegInfinity
                    }
                }
                _ => {
                    if x.is_sign_negative() {
                        SpecialOutcome::NegInfinity
                    } else {
                        SpecialOutcome::PosInfinity
                    }
                }
            }),
            ZeroEdge::Exempt => Some(SpecialOutcome::Exempt),
        }
    }

    /// Dispatches a binary/ternary arithmetic op at working precision.
    fn arith(
        &self,
        a: f64,
        b: f64,
        c: f64,
        op32: impl Fn(f32, f32, f32) -> f32,
        op64: impl Fn(f64, f64, f64) -> f64,
    ) -> f64 {
        match self.format {
            FloatFormat::Half | FloatFormat::Single => {
                f64::from(op32(a as f32, b as f32, c as f32))
            }
            FloatFormat::Double => op64(a, b, c),
        }
    }
}
