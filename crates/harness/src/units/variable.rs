//! Variable-latency div/sqrt unit model.
//!
//! Models the iterative units: a pre-fill readiness signal that drops
//! while an operation is in flight, and an output-valid pulse lasting one
//! cycle when the iteration completes. Optionally models a warm-up delay
//! before the very first transaction is accepted.

use crate::codec::{Codec, FloatFormat};
use crate::common::{FunctionKind, OpSelect};
use crate::driver::{DeviceUnderTest, PipelineContract};
use crate::oracle::{DomainEdge, SpecialValuePolicy};
use crate::units::at_working_precision;

/// An iterative unit (div/sqrt class) with per-operation latency.
#[derive(Debug)]
pub struct VariableLatencyUnit {
    kind: FunctionKind,
    format: FloatFormat,
    latency: u64,
    policy: SpecialValuePolicy,
    warmup_left: u64,

    inputs: [u64; 2],
    input_valid: bool,
    enable: bool,
    busy: Option<u64>,
    result: u64,
    out_valid: bool,
}

impl VariableLatencyUnit {
    /// Creates a unit computing `kind` with the given iteration count per
    /// operation and no warm-up delay.
    pub fn new(
        kind: FunctionKind,
        format: FloatFormat,
        latency: u64,
        policy: SpecialValuePolicy,
    ) -> Self {
        Self::with_warmup(kind, format, latency, policy, 0)
    }

    /// Creates a unit that additionally holds its readiness signal low
    /// for `warmup` cycles before the first transaction.
    pub fn with_warmup(
        kind: FunctionKind,
        format: FloatFormat,
        latency: u64,
        policy: SpecialValuePolicy,
        warmup: u64,
    ) -> Self {
        Self {
            kind,
            format,
            latency: latency.max(1),
            policy,
            warmup_left: warmup,
            inputs: [0; 2],
            input_valid: false,
            enable: false,
            busy: None,
            result: 0,
            out_valid: false,
        }
    }

    fn compute(&self) -> f64 {
        let a = Codec::decode(self.inputs[0], self.format);
        let b = Codec::decode(self.inputs[1], self.format);
        let f = self.format;
        match self.kind {
            FunctionKind::Div => {
                at_working_precision(f, a, b, 0.0, |x, y, _| x / y, |x, y, _| x / y)
            }
            FunctionKind::Sqrt => {
                if a < 0.0 && self.policy.out_of_domain != DomainEdge::Nan {
                    // Documented flush: negative arguments yield zero.
                    return 0.0;
                }
                a.sqrt()
            }
            _ => f64::NAN,
        }
    }
}

impl DeviceUnderTest for VariableLatencyUnit {
    fn contract(&self) -> PipelineContract {
        PipelineContract {
            has_variable_latency: true,
            exposes_ready_signal: true,
            phase_count: 1,
            total_bubble_cycles: 0,
        }
    }

    fn step(&mut self) {
        // The valid pulse lasts exactly one cycle.
        self.out_valid = false;

        if self.warmup_left > 0 {
            self.warmup_left -= 1;
            return;
        }

        if let Some(rem) = self.busy {
            if rem > 1 {
                self.busy = Some(rem - 1);
            } else {
                self.busy = None;
                self.out_valid = true;
            }
        } else if self.input_valid && self.enable {
            let value = self.compute();
            self.result = Codec::encode(value, self.format);
            if self.latency <= 1 {
                self.out_valid = true;
            } else {
                self.busy = Some(self.latency - 1);
            }
        }
    }

    fn drive_inputs(&mut self, inputs: &[u64]) {
        let mask = self.format.mask();
        for (slot, value) in self.inputs.iter_mut().zip(inputs) {
            *slot = value & mask;
        }
        for slot in self.inputs.iter_mut().skip(inputs.len()) {
            *slot = 0;
        }
    }

    fn set_input_valid(&mut self, valid: bool) {
        self.input_valid = valid;
    }

    fn set_enable(&mut self, enable: bool) {
        self.enable = enable;
    }

    fn set_select(&mut self, _sel: OpSelect) {
        // Single-function unit: no select port.
    }

    fn input_ready(&self) -> bool {
        self.warmup_left == 0 && self.busy.is_none()
    }

    fn output_valid(&self) -> bool {
        self.out_valid
    }

    fn output(&self) -> u64 {
        self.result
    }
}
