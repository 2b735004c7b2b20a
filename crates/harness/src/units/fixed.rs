//! Fixed-latency arithmetic unit model.
//!
//! Models the combinational-style arithmetic units: operand ports and an
//! output port, no ready signal, no select decode. The output becomes
//! valid a fixed number of cycles after the fill and stays valid until
//! the next fill.

use crate::codec::{Codec, FloatFormat};
use crate::common::{FunctionKind, OpSelect};
use crate::driver::{DeviceUnderTest, PipelineContract};
use crate::units::at_working_precision;

/// A single-function arithmetic unit with a fixed pipeline latency.
#[derive(Debug)]
pub struct FixedLatencyUnit {
    kind: FunctionKind,
    format: FloatFormat,
    latency: u64,

    inputs: [u64; 3],
    input_valid: bool,
    enable: bool,
    remaining: Option<u64>,
    result: u64,
    out_valid: bool,
}

impl FixedLatencyUnit {
    /// Creates a unit computing `kind` at `format` with the given latency
    /// in cycles (minimum one).
    pub fn new(kind: FunctionKind, format: FloatFormat, latency: u64) -> Self {
        Self {
            kind,
            format,
            latency: latency.max(1),
            inputs: [0; 3],
            input_valid: false,
            enable: false,
            remaining: None,
            result: 0,
            out_valid: false,
        }
    }

    fn compute(&self) -> f64 {
        let a = Codec::decode(self.inputs[0], self.format);
        let b = Codec::decode(self.inputs[1], self.format);
        let c = Codec::decode(self.inputs[2], self.format);
        let f = self.format;
        match self.kind {
            FunctionKind::Add => at_working_precision(f, a, b, 0.0, |x, y, _| x + y, |x, y, _| x + y),
            FunctionKind::Sub => at_working_precision(f, a, b, 0.0, |x, y, _| x - y, |x, y, _| x - y),
            FunctionKind::Mul => at_working_precision(f, a, b, 0.0, |x, y, _| x * y, |x, y, _| x * y),
            FunctionKind::Div => at_working_precision(f, a, b, 0.0, |x, y, _| x / y, |x, y, _| x / y),
            FunctionKind::FusedMulAdd => at_working_precision(
                f,
                a,
                b,
                c,
                |x, y, z| x.mul_add(y, z),
                |x, y, z| x.mul_add(y, z),
            ),
            // Non-arithmetic kinds are not wired to this unit class.
            _ => f64::NAN,
        }
    }
}

impl DeviceUnderTest for FixedLatencyUnit {
    fn contract(&self) -> PipelineContract {
        PipelineContract {
            has_variable_latency: false,
            exposes_ready_signal: false,
            phase_count: 1,
            total_bubble_cycles: 0,
        }
    }

    fn step(&mut self) {
        if let Some(rem) = self.remaining {
            if rem > 1 {
                self.remaining = Some(rem - 1);
            } else {
                self.remaining = None;
                self.out_valid = true;
            }
        } else if self.input_valid && self.enable {
            let value = self.compute();
            self.result = Codec::encode(value, self.format);
            if self.latency <= 1 {
                self.out_valid = true;
            } else {
                self.out_valid = false;
                self.remaining = Some(self.latency - 1);
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
        true
    }

    fn output_valid(&self) -> bool {
        self.out_valid
    }

    fn output(&self) -> u64 {
        self.result
    }
}
