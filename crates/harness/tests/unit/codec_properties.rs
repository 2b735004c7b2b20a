//! Codec Properties — Round-Trip and Rounding Correctness.
//!
//! Verifies the two codec invariants over the whole input space:
//! - every value exactly representable in a format round-trips
//!   bit-identically;
//! - every other value rounds to the nearest representable value, ties
//!   to even (checked here via neighbor-distance and monotonicity
//!   properties; the tie cases themselves are pinned in the inline codec
//!   tests).

use fpverif_core::codec::{Codec, FloatFormat};
use proptest::prelude::*;

proptest! {
    #[test]
    fn double_round_trip_is_bit_identical(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        prop_assume!(!v.is_nan());
        let rt = Codec::decode(Codec::encode(v, FloatFormat::Double), FloatFormat::Double);
        prop_assert_eq!(rt.to_bits(), bits);
    }

    #[test]
    fn single_round_trip_is_bit_identical(bits in any::<u32>()) {
        let v = f64::from(f32::from_bits(bits));
        prop_assume!(!v.is_nan());
        let encoded = Codec::encode(v, FloatFormat::Single);
        prop_assert_eq!(encoded, u64::from(bits));
        let rt = Codec::decode(encoded, FloatFormat::Single);
        prop_assert_eq!(Codec::encode(rt, FloatFormat::Single), u64::from(bits));
    }

    #[test]
    fn half_round_trip_is_bit_identical(bits in any::<u16>()) {
        let v = Codec::decode(u64::from(bits), FloatFormat::Half);
        prop_assume!(!v.is_nan());
        prop_assert_eq!(Codec::encode(v, FloatFormat::Half), u64::from(bits));
    }

    #[test]
    fn half_quantization_is_monotone(x in -65504.0_f64..65504.0, y in -65504.0_f64..65504.0) {
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        let ql = Codec::quantize(lo, FloatFormat::Half);
        let qh = Codec::quantize(hi, FloatFormat::Half);
        prop_assert!(ql <= qh, "quantize not monotone: {} -> {}, {} -> {}", lo, ql, hi, qh);
    }

    #[test]
    fn half_quantization_is_nearest(x in -60000.0_f64..60000.0) {
        let q = Codec::quantize(x, FloatFormat::Half);
        let bits = Codec::encode(x, FloatFormat::Half) as u16;
        let err = (q - x).abs();
        let magnitude = bits & 0x7FFF;
        // Neighbor toward zero.
        if magnitude > 0 {
            let toward = Codec::decode(u64::from(bits - 1), FloatFormat::Half);
            prop_assert!(err <= (toward - x).abs());
        }
        // Neighbor away from zero, unless that would be infinity.
        if magnitude < 0x7BFF {
            let away = Codec::decode(u64::from(bits + 1), FloatFormat::Half);
            prop_assert!(err <= (away - x).abs());
        }
    }

    #[test]
    fn single_quantization_is_exactly_f32_rounding(x in any::<f64>()) {
        prop_assume!(!x.is_nan());
        let q = Codec::quantize(x, FloatFormat::Single);
        prop_assert_eq!(q.to_bits(), f64::from(x as f32).to_bits());
    }
}
