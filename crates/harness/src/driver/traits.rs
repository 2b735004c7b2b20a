//! Device-under-test interface.
//!
//! A unit is opaque: the harness sees only wire-level signals and a clock
//! step. The trait models the union of the three published unit classes:
//! 1. **Fixed-latency units:** operand ports and an output, no explicit
//!    valid/ready — output is valid a fixed number of steps after a fill.
//! 2. **Variable-latency units** (div/sqrt): a pre-fill readiness signal,
//!    input valid, output valid.
//! 3. **Multiplexed units:** a `sel` port with an explicit no-operation
//!    value, implicit per-cycle pipeline advance, no ready signal — the
//!    driver relies on the contract's bubble count instead.
//!
//! Units that lack a signal implement the accessor as a constant (`true`
//! for readiness) and ignore the corresponding setter.

use crate::common::OpSelect;

/// The handshake shape a device exposes.
///
/// Describes the protocol, never the device's internal timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PipelineContract {
    /// Whether latency may vary per operation (div/sqrt class).
    pub has_variable_latency: bool,
    /// Whether the device exposes a pre-fill readiness signal the driver
    /// must await before presenting.
    pub exposes_ready_signal: bool,
    /// Number of sequential passes a function may take (1 or 2).
    pub phase_count: u8,
    /// Idle cycles to insert between the phases of a two-phase function:
    /// the device's total pipeline depth, so in-flight state drains
    /// before reuse.
    pub total_bubble_cycles: u64,
}

/// Wire-level view of one device under test.
///
/// A device handle is exclusively owned by one driver for the duration of
/// a campaign; signals set before a [`DeviceUnderTest::step`] call are
/// observed as committed by that step.
pub trait DeviceUnderTest {
    /// The handshake contract this device exposes.
    fn contract(&self) -> PipelineContract;

    /// Advances simulated time by one clock cycle.
    fn step(&mut self);

    /// Drives the operand ports with pre-masked encoded values.
    fn drive_inputs(&mut self, inputs: &[u64]);

    /// Drives the input-valid signal.
    fn set_input_valid(&mut self, valid: bool);

    /// Drives the input-enable signal.
    fn set_enable(&mut self, enable: bool);

    /// Drives the operation select; [`OpSelect::None`] is the idle value.
    fn set_select(&mut self, sel: OpSelect);

    /// Pre-fill readiness; constant `true` for units without the signal.
    fn input_ready(&self) -> bool;

    /// Whether the output port currently holds a valid result.
    fn output_valid(&self) -> bool;

    /// The output port, masked to the device's encoding width.
    fn output(&self) -> u64;
}
