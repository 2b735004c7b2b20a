//! Pipelined-protocol driver.
//!
//! Exercises the synchronous valid/ready handshake against one device
//! under test and measures what the protocol exposes: fill-wait latency
//! (cycles until the unit will accept input) and throughput (cycles from
//! the fill to the first valid output). Per vector the driver walks a
//! four-state machine:
//! 1. **AwaitReady** — step while the pre-fill readiness signal is low
//!    (only for units that expose one), counting fill-wait cycles.
//! 2. **Present** — assert valid and enable, drive the encoded operands
//!    and the select, advance one cycle (the fill cycle).
//! 3. **Drain** — deassert valid, step until `output_valid`, counting
//!    throughput from the fill cycle inclusive.
//! 4. **Capture** — read the output bits, return to AwaitReady.
//!
//! Two-phase functions run the machine twice: after phase 1's capture the
//! driver inserts exactly the contract's bubble count of idle cycles
//! (select none, valid low, zero operands) so in-flight partial state
//! drains from the shared pipeline, then presents phase 2 with phase 1's
//! output bits as input. Only the final capture is compared to the oracle.
//!
//! Every await loop is a bounded busy-poll; exhausting the cycle budget is
//! a [`ProtocolTimeout`] for that vector only. All timing is
//! deterministic — there is no randomness anywhere in the protocol.

/// Device-under-test trait and handshake contract.
pub mod traits;

pub use traits::{DeviceUnderTest, PipelineContract};

use tracing::trace;

use crate::common::{FunctionKind, OpSelect, ProtocolTimeout, WaitPoint};

/// Measurements and captured bits from one driven vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriveOutcome {
    /// Final captured output bits (phase 2's for two-phase kinds).
    pub bits: u64,
    /// Total cycles spent awaiting pre-fill readiness, summed over phases.
    pub fill_wait: u64,
    /// Total cycles from fill to valid output, summed over phases.
    pub throughput: u64,
}

/// Drives one device through conformance vectors.
///
/// Exclusively borrows its device for the campaign: no second driver can
/// address the same unit while this one lives.
#[derive(Debug)]
pub struct ProtocolDriver<'d, D: DeviceUnderTest> {
    dut: &'d mut D,
    budget: u64,
}

impl<'d, D: DeviceUnderTest> ProtocolDriver<'d, D> {
    /// Creates a driver with the given per-await-loop cycle budget.
    pub fn new(dut: &'d mut D, budget: u64) -> Self {
        Self { dut, budget }
    }

    /// Runs one vector through every phase of `kind`.
    ///
    /// # Errors
    ///
    /// [`ProtocolTimeout`] if any await loop exhausts the cycle budget.
    /// The device is left idled either way.
    pub fn run_vector(
        &mut self,
        kind: FunctionKind,
        inputs: &[u64],
    ) -> Result<DriveOutcome, ProtocolTimeout> {
        let phases = kind.phases();
        let first = self.run_phase(phases[0], inputs, 0)?;
        if phases.len() == 1 {
            return Ok(first);
        }

        // The shared pipeline is not pipelined across phases: drain any
        // in-flight partial state before presenting the second pass.
        let bubbles = self.dut.contract().total_bubble_cycles;
        self.idle(bubbles);

        let second = self.run_phase(phases[1], &[first.bits], 1)?;
        Ok(DriveOutcome {
            bits: second.bits,
            fill_wait: first.fill_wait + second.fill_wait,
            throughput: first.throughput + second.throughput,
        })
    }

    /// One pass of the four-state machine.
    fn run_phase(
        &mut self,
        sel: OpSelect,
        inputs: &[u64],
        phase: u8,
    ) -> Result<DriveOutcome, ProtocolTimeout> {
        let contract = self.dut.contract();

        // AwaitReady.
        let mut fill_wait = 0_u64;
        if contract.exposes_ready_signal {
            while !self.dut.input_ready() {
                if fill_wait >= self.budget {
                    self.quiesce();
                    return Err(ProtocolTimeout {
                        phase,
                        waiting: WaitPoint::FillReady,
                        budget: self.budget,
                    });
                }
                self.dut.step();
                fill_wait += 1;
            }
        }

        // Present: the fill cycle.
        self.dut.drive_inputs(inputs);
        self.dut.set_select(sel);
        self.dut.set_input_valid(true);
        self.dut.set_enable(true);
        self.dut.step();

        // Drain; the fill cycle is cycle one of the measurement.
        self.dut.set_input_valid(false);
        self.dut.set_enable(false);
        let mut throughput = 1_u64;
        while !self.dut.output_valid() {
            if throughput > self.budget {
                self.quiesce();
                return Err(ProtocolTimeout {
                    phase,
                    waiting: WaitPoint::OutputValid,
                    budget: self.budget,
                });
            }
            self.dut.step();
            throughput += 1;
        }

        // Capture.
        let bits = self.dut.output();
        self.dut.set_select(OpSelect::None);
        trace!(?sel, phase, fill_wait, throughput, bits, "phase captured");
        Ok(DriveOutcome {
            bits,
            fill_wait,
            throughput,
        })
    }

    /// Inserts `cycles` idle cycles: select none, valid low, zero inputs.
    fn idle(&mut self, cycles: u64) {
        self.quiesce();
        self.dut.drive_inputs(&[0, 0, 0]);
        for _ in 0..cycles {
            self.dut.step();
        }
    }

    /// Deasserts every input-side signal.
    fn quiesce(&mut self) {
        self.dut.set_input_valid(false);
        self.dut.set_enable(false);
        self.dut.set_select(OpSelect::None);
    }
}
