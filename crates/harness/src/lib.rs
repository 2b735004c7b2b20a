//! Conformance harness for pipelined floating-point functional units.
//!
//! This crate verifies variable-latency floating-point units (arithmetic and
//! transcendental-function approximators) against mathematically correct
//! references, across 16/32/64-bit binary formats. It provides:
//! 1. **Codec:** Exact bit-level conversion between native floats and fixed-width encodings.
//! 2. **Oracle:** Per-function reference results plus documented special-value policies.
//! 3. **Driver:** A cycle-stepped valid/ready handshake driver with latency/throughput measurement.
//! 4. **Comparator:** NaN/Infinity-aware, scale-relative tolerance comparison.
//! 5. **Units:** Behavioral device models for the three protocol classes under test.
//! 6. **Runner:** End-to-end pass/fail campaigns with per-vector diagnostics.

/// Shared types: error taxonomy, function kinds, and operation selects.
pub mod common;
/// Harness configuration (defaults, epsilon table, policy selections).
pub mod config;
/// Bit-level float codec (encode/decode for all supported formats).
pub mod codec;
/// Tolerance-aware numeric comparison.
pub mod compare;
/// Reference oracle and special-value policies.
pub mod oracle;
/// Test-vector generation (edge sets and seeded random inputs).
pub mod vectors;
/// Pipelined-protocol driver (handshake state machine, measurement).
pub mod driver;
/// Behavioral device-under-test models.
pub mod units;
/// Campaign orchestration and reporting.
pub mod runner;
/// Campaign-level latency/throughput statistics.
pub mod stats;

/// Root configuration type; use `HarnessConfig::default()` or deserialize from JSON.
pub use crate::config::HarnessConfig;
/// Bit-level codec entry point.
pub use crate::codec::{Codec, FloatFormat};
/// Function kind enumeration shared by oracle, generator, and driver.
pub use crate::common::FunctionKind;
/// Campaign runner; produces a [`runner::CampaignReport`].
pub use crate::runner::ConformanceRunner;
