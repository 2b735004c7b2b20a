//! Bit-level float codec.
//!
//! Converts between native floating-point values and the fixed-width
//! encoded bit patterns exchanged with a device under test. It provides:
//! 1. **Formats:** The closed set of supported encodings as a tagged
//!    variant, validated at construction.
//! 2. **Encode/Decode:** Reinterpretation for widths with a native machine
//!    type (32, 64) and explicit range reduction and rounding for the
//!    16-bit format.
//! 3. **Round-trip identity:** `decode(encode(v))` is bit-identical for
//!    every value exactly representable in the target format; other values
//!    round to nearest, ties to even.

/// Explicit 32 ↔ 16-bit conversion (range reduction, RNE rounding).
mod half;

use serde::{Deserialize, Serialize};

use crate::common::CodecError;

/// A supported binary floating-point encoding.
///
/// The supported set is finite, so format dispatch is a match on this
/// variant rather than a branch on raw widths. Construct from raw widths
/// with [`FloatFormat::from_widths`], which fails fast on anything outside
/// the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatFormat {
    /// 16-bit: 5 exponent bits, 10 mantissa bits.
    Half,
    /// 32-bit: 8 exponent bits, 23 mantissa bits.
    Single,
    /// 64-bit: 11 exponent bits, 52 mantissa bits.
    Double,
}

impl FloatFormat {
    /// Total encoding width in bits.
    pub const fn total_bits(self) -> u32 {
        match self {
            FloatFormat::Half => 16,
            FloatFormat::Single => 32,
            FloatFormat::Double => 64,
        }
    }

    /// Exponent field width in bits.
    pub const fn exponent_bits(self) -> u32 {
        match self {
            FloatFormat::Half => 5,
            FloatFormat::Single => 8,
            FloatFormat::Double => 11,
        }
    }

    /// Mantissa field width in bits.
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            FloatFormat::Half => 10,
            FloatFormat::Single => 23,
            FloatFormat::Double => 52,
        }
    }

    /// Exponent bias.
    pub const fn bias(self) -> i32 {
        match self {
            FloatFormat::Half => 15,
            FloatFormat::Single => 127,
            FloatFormat::Double => 1023,
        }
    }

    /// Mask selecting the low `total_bits()` bits of a wire word.
    pub const fn mask(self) -> u64 {
        match self {
            FloatFormat::Half => 0xFFFF,
            FloatFormat::Single => 0xFFFF_FFFF,
            FloatFormat::Double => u64::MAX,
        }
    }

    /// Validates a raw width triple and returns the matching format.
    ///
    /// # Errors
    ///
    /// [`CodecError::WidthMismatch`] if `total != 1 + exponent + mantissa`,
    /// [`CodecError::UnsupportedFormat`] if the triple is consistent but
    /// not one of the three supported encodings. Either error is raised
    /// before any vector runs.
    pub const fn from_widths(total: u32, exponent: u32, mantissa: u32) -> Result<Self, CodecError> {
        if total != 1 + exponent + mantissa {
            return Err(CodecError::WidthMismatch {
                total,
                exponent,
                mantissa,
            });
        }
        match (total, exponent, mantissa) {
            (16, 5, 10) => Ok(FloatFormat::Half),
            (32, 8, 23) => Ok(FloatFormat::Single),
            (64, 11, 52) => Ok(FloatFormat::Double),
            _ => Err(CodecError::UnsupportedFormat {
                total,
                exponent,
                mantissa,
            }),
        }
    }
}

impl std::fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloatFormat::Half => write!(f, "fp16"),
            FloatFormat::Single => write!(f, "fp32"),
            FloatFormat::Double => write!(f, "fp64"),
        }
    }
}

impl std::str::FromStr for FloatFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "16" | "fp16" | "half" => Ok(FloatFormat::Half),
            "32" | "fp32" | "single" => Ok(FloatFormat::Single),
            "64" | "fp64" | "double" => Ok(FloatFormat::Double),
            other => Err(format!("unknown float format: {other}")),
        }
    }
}

/// Bit-level conversion between native values and wire encodings.
///
/// All operations are pure and side-effect free; encode output is always
/// pre-masked to the format width.
#[derive(Debug)]
pub struct Codec;

impl Codec {
    /// Encodes a native value as a wire word of exactly
    /// `format.total_bits()` bits.
    ///
    /// Widths with a native machine type (32, 64) reinterpret the value's
    /// bit pattern directly; no rounding occurs beyond the narrowing to
    /// the format's working precision, and NaN payloads pass through. The
    /// 16-bit format rounds explicitly from the 32-bit working value
    /// (nearest, ties to even).
    pub fn encode(value: f64, format: FloatFormat) -> u64 {
        match format {
            FloatFormat::Half => u64::from(half::encode_f32(value as f32)),
            FloatFormat::Single => u64::from((value as f32).to_bits()),
            FloatFormat::Double => value.to_bits(),
        }
    }

    /// Decodes a wire word into a native value.
    ///
    /// Bits above `format.total_bits()` are ignored. Subnormal, zero,
    /// Infinity, and NaN classes are preserved.
    pub fn decode(bits: u64, format: FloatFormat) -> f64 {
        match format {
            FloatFormat::Half => f64::from(half::decode_f32(bits as u16)),
            FloatFormat::Single => f64::from(f32::from_bits(bits as u32)),
            FloatFormat::Double => f64::from_bits(bits),
        }
    }

    /// Rounds a value to the nearest one representable in `format`.
    ///
    /// This is the transform applied to oracle outputs before comparison,
    /// so reference and device meet at the same precision.
    pub fn quantize(value: f64, format: FloatFormat) -> f64 {
        Self::decode(Self::encode(value, format), format)
    }
}
