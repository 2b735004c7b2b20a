//! Common types shared across the harness.
//!
//! This module provides the building blocks every other component depends on:
//! 1. **Function Kinds:** The closed set of verified operations, with arity,
//!    phase, and domain metadata.
//! 2. **Operation Selects:** Wire-level select codes for multiplexed units,
//!    including the explicit no-operation idle value.
//! 3. **Error Handling:** The fatal codec error and the per-vector protocol
//!    timeout.

/// Error types (codec validation, protocol timeout).
pub mod error;

/// Function kinds and operation select codes.
pub mod function;

pub use error::{CodecError, ProtocolTimeout, WaitPoint};
pub use function::{FunctionKind, OpSelect};
