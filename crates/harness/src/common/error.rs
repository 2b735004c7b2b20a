//! Error definitions for the conformance harness.
//!
//! Two failure shapes exist at this layer:
//! 1. **Codec errors** are fatal: a malformed format description fails the
//!    campaign before any vector runs.
//! 2. **Protocol timeouts** are per-vector: a device whose `output_valid`
//!    never rises within the cycle budget fails that vector only, and the
//!    campaign continues.
//!
//! Tolerance and policy mismatches are not errors in this sense — they are
//! recorded verdicts, defined in [`crate::runner`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal format-validation error, raised before any vector runs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The width triple violates `total = 1 + exponent + mantissa`.
    #[error("format width invariant violated: {total} != 1 + {exponent} + {mantissa}")]
    WidthMismatch {
        /// Declared total width in bits.
        total: u32,
        /// Declared exponent field width in bits.
        exponent: u32,
        /// Declared mantissa field width in bits.
        mantissa: u32,
    },

    /// The width triple is consistent but not one of the supported formats.
    #[error("unsupported float format: {total}-bit (exponent {exponent}, mantissa {mantissa})")]
    UnsupportedFormat {
        /// Declared total width in bits.
        total: u32,
        /// Declared exponent field width in bits.
        exponent: u32,
        /// Declared mantissa field width in bits.
        mantissa: u32,
    },
}

/// Which await loop of the protocol state machine exhausted its budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitPoint {
    /// Waiting for the pre-fill readiness signal to rise.
    FillReady,
    /// Waiting for `output_valid` to rise after a fill.
    OutputValid,
}

impl fmt::Display for WaitPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitPoint::FillReady => write!(f, "pre-fill ready"),
            WaitPoint::OutputValid => write!(f, "output valid"),
        }
    }
}

/// A vector whose handshake never completed within the cycle budget.
///
/// Fatal for the vector, not for the campaign: the runner records the
/// timeout and moves on to the next vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{waiting} never rose within {budget} cycles (phase {phase})")]
pub struct ProtocolTimeout {
    /// Zero-based phase index (0 for single-phase kinds).
    pub phase: u8,
    /// The await loop that exhausted the budget.
    pub waiting: WaitPoint,
    /// The configured maximum number of clock steps per await loop.
    pub budget: u64,
}
