//! Multiplexed transcendental pipeline model.
//!
//! Models the shared approximation pipeline: a `sel` port chooses the
//! function, the pipeline advances every cycle with no ready signal, and
//! an operation's result reaches the output register a fixed depth of
//! cycles after its fill. Idle cycles are slots carrying the no-operation
//! select. The two-phase functions route their second pass through the
//! shared arctangent path:
//!
//! ```text
//! acos(x)     = 2·atan(√((1 − x)/(1 + x)))        phase 1: the sqrt prep
//! atan2(y, x) = 2·atan(y/(√(x² + y²) + x))        phase 1: the reciprocal prep
//! ```
//!
//! The model implements the documented unit conventions (domain clamps,
//! saturation, the zero-input convention of the scale-mixture derivative)
//! so a campaign configured with the matching policy passes.

use std::collections::VecDeque;

use crate::codec::{Codec, FloatFormat};
use crate::common::OpSelect;
use crate::driver::{DeviceUnderTest, PipelineContract};
use crate::oracle::{DomainEdge, ScaleMixture, SpecialValuePolicy, ZeroEdge};

/// One pipeline slot: the select it carries and the result bits computed
/// at fill time.
#[derive(Clone, Copy, Debug)]
struct Slot {
    sel: OpSelect,
    bits: u64,
}

impl Slot {
    const EMPTY: Slot = Slot {
        sel: OpSelect::None,
        bits: 0,
    };
}

/// The multiplexed function-approximation pipeline.
#[derive(Debug)]
pub struct MuxedFunctionUnit {
    format: FloatFormat,
    depth: u64,
    policy: SpecialValuePolicy,
    smg: ScaleMixture,

    pipe: VecDeque<Slot>,
    out: Slot,
    x: u64,
    y: u64,
    sel: OpSelect,
    input_valid: bool,
    enable: bool,
}

impl MuxedFunctionUnit {
    /// Creates a pipeline of the given depth (minimum one): a fill's
    /// result is valid `depth` cycles later.
    pub fn new(
        format: FloatFormat,
        depth: u64,
        policy: SpecialValuePolicy,
        smg: ScaleMixture,
    ) -> Self {
        let mut pipe = VecDeque::with_capacity(depth.max(1) as usize);
        for _ in 0..depth.max(1) - 1 {
            pipe.push_back(Slot::EMPTY);
        }
        Self {
            format,
            depth: depth.max(1),
            policy,
            smg,
            pipe,
            out: Slot::EMPTY,
            x: 0,
            y: 0,
            sel: OpSelect::None,
            input_valid: false,
            enable: false,
        }
    }

    /// Select-decoded evaluation, at the documented unit conventions.
    fn evaluate(&self, sel: OpSelect, x: f64, y: f64) -> f64 {
        match sel {
            OpSelect::Exp => x.exp(),
            OpSelect::Log => {
                if x < 0.0 {
                    return match self.policy.out_of_domain {
                        DomainEdge::FlushToZero => 0.0,
                        DomainEdge::ClampToBoundary => f64::NEG_INFINITY,
                        DomainEdge::Nan | DomainEdge::Unchecked => f64::NAN,
                    };
                }
                x.ln()
            }
            OpSelect::Sigmoid => {
                if let Some(t) = self.policy.saturation_threshold {
                    if x >= t {
                        return 1.0;
                    }
                    if x <= -t {
                        return 0.0;
                    }
                }
                1.0 / (1.0 + (-x).exp())
            }
            OpSelect::SoftPlus => {
                if let Some(t) = self.policy.saturation_threshold {
                    if x <= -t {
                        return 0.0;
                    }
                }
                x.exp().ln_1p()
            }
            OpSelect::Sin => x.sin(),
            OpSelect::Cos => x.cos(),
            OpSelect::Sqrt => {
                if x < 0.0 && self.policy.out_of_domain != DomainEdge::Nan {
                    return 0.0;
                }
                x.sqrt()
            }
            OpSelect::InvSqrt => {
                if x < 0.0 {
                    return match self.policy.out_of_domain {
                        DomainEdge::ClampToBoundary => f64::INFINITY,
                        DomainEdge::FlushToZero | DomainEdge::Unchecked => 0.0,
                        DomainEdge::Nan => f64::NAN,
                    };
                }
                1.0 / x.sqrt()
            }
            OpSelect::Reciprocal => 1.0 / x,
            OpSelect::AcosPhase1 => self.acos_prep(x),
            OpSelect::Atan2Phase1 => Self::atan2_prep(x, y),
            OpSelect::AcosPhase2 | OpSelect::Atan2Phase2 => 2.0 * x.atan(),
            OpSelect::ScaleMixtureGaussian => self.scale_mixture(x),
            // Arithmetic selects and the idle select have no datapath here.
            _ => f64::NAN,
        }
    }

    /// Phase 1 of arccosine: √((1 − x)/(1 + x)), domain edges per policy.
    fn acos_prep(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x.abs() > 1.0 {
            return match self.policy.out_of_domain {
                // Clamp to the boundary image: above the domain the final
                // result is 0, below it π (phase 2 of an infinite prep).
                DomainEdge::ClampToBoundary => {
                    if x < -1.0 {
                        f64::INFINITY
                    } else {
                        0.0
                    }
                }
                DomainEdge::FlushToZero => 0.0,
                DomainEdge::Nan | DomainEdge::Unchecked => f64::NAN,
            };
        }
        ((1.0 - x) / (1.0 + x)).sqrt()
    }

    /// Phase 1 of atan2: y/(√(x² + y²) + x), with the quadrant and
    /// infinity edges the closed form cannot reach directly. Operand
    /// order follows the function's port order: y first, then x.
    fn atan2_prep(y: f64, x: f64) -> f64 {
        if y == 0.0 && x == 0.0 {
            return 0.0;
        }
        if y == 0.0 && x < 0.0 {
            // The limit is ±∞: phase 2 answers ±π by the sign of y.
            return f64::INFINITY.copysign(y);
        }
        if y.is_infinite() && x.is_finite() {
            return 1.0_f64.copysign(y);
        }
        if x.is_infinite() && y.is_finite() {
            return if x > 0.0 {
                0.0_f64.copysign(y)
            } else {
                f64::INFINITY.copysign(y)
            };
        }
        if x.is_infinite() && y.is_infinite() {
            return (y.atan2(x) / 2.0).tan();
        }
        y / (x.hypot(y) + x)
    }

    /// Scale-mixture derivative with the documented zero-input convention.
    fn scale_mixture(&self, x: f64) -> f64 {
        if x == 0.0 {
            return match self.policy.at_zero {
                ZeroEdge::Ieee => self.smg.eval(x),
                ZeroEdge::SignedInfinity => {
                    if x.is_sign_negative() {
                        f64::INFINITY
                    } else {
                        f64::NEG_INFINITY
                    }
                }
                // Known-unresolved behavior at exact zero: the model
                // reproduces the unit's garbage answer rather than a fix.
                ZeroEdge::Exempt => f64::NAN,
            };
        }
        self.smg.eval(x)
    }
}

impl DeviceUnderTest for MuxedFunctionUnit {
    fn contract(&self) -> PipelineContract {
        PipelineContract {
            has_variable_latency: false,
            exposes_ready_signal: false,
            phase_count: 2,
            total_bubble_cycles: self.depth,
        }
    }

    fn step(&mut self) {
        let entering = if self.input_valid && self.enable && self.sel != OpSelect::None {
            let x = Codec::decode(self.x, self.format);
            let y = Codec::decode(self.y, self.format);
            let value = self.evaluate(self.sel, x, y);
            Slot {
                sel: self.sel,
                bits: Codec::encode(value, self.format),
            }
        } else {
            Slot::EMPTY
        };
        self.pipe.push_back(entering);
        // The queue holds depth − 1 slots between input and output
        // registers, so a fill emerges exactly `depth` steps later.
        self.out = self.pipe.pop_front().unwrap_or(Slot::EMPTY);
    }

    fn drive_inputs(&mut self, inputs: &[u64]) {
        let mask = self.format.mask();
        self.x = inputs.first().copied().unwrap_or(0) & mask;
        self.y = inputs.get(1).copied().unwrap_or(0) & mask;
    }

    fn set_input_valid(&mut self, valid: bool) {
        self.input_valid = valid;
    }

    fn set_enable(&mut self, enable: bool) {
        self.enable = enable;
    }

    fn set_select(&mut self, sel: OpSelect) {
        self.sel = sel;
    }

    fn input_ready(&self) -> bool {
        true
    }

    fn output_valid(&self) -> bool {
        self.out.sel != OpSelect::None
    }

    fn output(&self) -> u64 {
        self.out.bits
    }
}
