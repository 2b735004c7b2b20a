//! Misbehaving device models for failure-path tests.

/// A unit whose handshake never completes.
pub mod stuck;


pub use skewed::SkewedAdder;
pub use stuck::StuckUnit;
