use fpverif_core::common::OpSelect;
use fpverif_core::driver::{DeviceUnderTest, PipelineContract};

/// Where the stuck unit wedges its handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StuckAt {
    /// `output_valid` never rises after a fill.
    OutputValid,
    /// The pre-fill readiness signal never rises at all.
    FillReady,
}

/// A device whose handshake never completes: either readiness never rises
/// or output-valid never rises. Every await loop against it must exhaust
/// the budget and report a protocol timeout.
#[derive(Debug)]
pub struct StuckUnit {
    mode: StuckAt,
}

impl StuckUnit {
    pub fn new(mode: StuckAt) -> Self {
        Self { mode }
    }
}

impl DeviceUnderTest for StuckUnit {
    fn contract(&self) -> PipelineContract {
        PipelineContract {
            has_variable_latency: true,
            exposes_ready_signal: true,
            phase_count: 1,
            total_bubble_cycles: 0,
        }
    }

    fn step(&mut self) {}

    fn drive_inputs(&mut self, _inputs: &[u64]) {}

    fn set_input_valid(&mut self, _valid: bool) {}

    fn set_enable(&mut self, _enable: bool) {}

    fn set_select(&mut self, _sel: OpSelect) {}

    fn input_ready(&self) -> bool {
        self.mode != StuckAt::FillReady
    }

    fn output_valid(&self) -> bool {
        false
    }

    fn output(&self) -> u64 {
        0
    }
}
