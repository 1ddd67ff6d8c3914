//! Fixed-point math for the sine generator: the Q-format containers, the
//! conversions between them, and the quarter-wave sine evaluation.
//!
//! Everything here is integer-only and bounded: intermediates stay within
//! 22 significant bits, stored values within 16, so the same arithmetic
//! maps directly onto a 16-bit DSP with a 32-bit accumulator.

pub use fixed::types::*;

/// An unsigned value in `[0, 1)` with 16 fractional bits (UQ0.16).
///
/// Used for the momentary phase (scaled so that 1.0 corresponds to 2*pi
/// radians), the per-sample phase increment, the attenuation factor, and
/// unsigned sine magnitudes. Note that 1.0 itself is not representable;
/// where an exact 1.0 is needed the container code 0 stands for it
/// (arithmetic modulo 1), so `x.wrapping_neg()` computes `1 - x`.
pub type Scalar = U0F16;

/// A signed value in `[-1, 1)` with 15 fractional bits (SQ0.15).
///
/// The output sample format. +1 is not representable and saturates to
/// [`Sample::MAX`]; -1 is representable exactly.
pub type Sample = I1F15;

/// A [Sample] widened to a 32-bit container with 21 fractional bits
/// (SQ0.21). Only values in `[-1, 1)` are valid; the unused high bits of
/// the container must hold the sign extension.
pub type WideSample = I11F21;

/// A [Scalar] widened to a 32-bit container with 22 fractional bits
/// (UQ0.22). Only values in `[0, 1)` are valid.
pub type WideScalar = U10F22;

/// An unsigned accumulator in `[0, 2)` with 21 fractional bits (UQ1.21).
///
/// One integer bit of headroom for summing two [Scalar] terms, as in the
/// interpolation step of [qsin].
pub type SumScalar = U11F21;

/// Phase code for pi/2 radians.
pub const PHASE_PI_2: Scalar = Scalar::lit("0.25");
/// Phase code for pi radians.
pub const PHASE_PI: Scalar = Scalar::lit("0.5");
/// Phase code for 3*pi/2 radians.
pub const PHASE_3PI_2: Scalar = Scalar::lit("0.75");

/// Widens a sample to the 32-bit container, exactly.
pub fn widen_sample(x: Sample) -> WideSample {
    WideSample::from_num(x)
}

/// Narrows a wide sample back to 16 bits, truncating toward minus
/// infinity. The input must be a valid SQ0.21 value, i.e. in `[-1, 1)`.
pub fn narrow_sample(x: WideSample) -> Sample {
    debug_assert!(WideSample::NEG_ONE <= x && x < WideSample::ONE);
    Sample::from_num(x)
}

/// Widens a scalar to the 32-bit container, exactly.
pub fn widen_scalar(x: Scalar) -> WideScalar {
    WideScalar::from_num(x)
}

/// Narrows a wide scalar back to 16 bits, truncating toward zero. The
/// input must be a valid UQ0.22 value, i.e. in `[0, 1)`.
pub fn narrow_scalar(x: WideScalar) -> Scalar {
    debug_assert!(x < WideScalar::ONE);
    Scalar::from_num(x)
}

/// Reinterprets a non-negative sample as a scalar of the same total
/// width. The sign bit is dropped and the fraction grows by one bit, so
/// the value is preserved exactly. Negative input is a caller bug.
pub fn scalar_from_sample(x: Sample) -> Scalar {
    debug_assert!(x >= Sample::ZERO);
    Scalar::from_num(x)
}

/// Reinterprets a scalar as a non-negative sample of the same total
/// width. The least significant bit is discarded (logical shift right by
/// one) and the new sign bit is zero.
pub fn sample_from_scalar(x: Scalar) -> Sample {
    Sample::from_num(x)
}

/// Reinterprets a non-negative wide sample as a wide scalar. The input
/// must be in `[0, 1)`.
pub fn wide_scalar_from_wide_sample(x: WideSample) -> WideScalar {
    debug_assert!(WideSample::ZERO <= x && x < WideSample::ONE);
    WideScalar::from_num(x)
}

/// Reinterprets a wide scalar as a non-negative wide sample, discarding
/// one low bit. The input must be in `[0, 1)`.
pub fn wide_sample_from_wide_scalar(x: WideScalar) -> WideSample {
    debug_assert!(x < WideScalar::ONE);
    WideSample::from_num(x)
}

/// Product of two scalars, `(a * b) / 2^16` truncated toward zero.
///
/// Computed in a 32-bit widening multiply. Commutative, monotonic in
/// each argument; the product of two values below one never saturates.
pub fn qmul(a: Scalar, b: Scalar) -> Scalar {
    Scalar::from_num(a.wide_mul(b))
}

/// Phase-to-sine lookup table: `sin(k * pi/512)` for k = 0..256 as
/// UQ0.16 container codes, i.e. `round(sin(k*pi/512) * 2^16)` with the
/// unreachable 1.0 clamped to 0xFFFF. The k = 256 knot (exactly pi/2,
/// exactly 1.0) is not stored; [qsin] substitutes 1.0 modulo 1 for it.
static SINE_LUT: [u16; 256] = [
    0x0000, 0x0192, 0x0324, 0x04B6, 0x0648, 0x07DA, 0x096C, 0x0AFE,
    0x0C90, 0x0E21, 0x0FB3, 0x1144, 0x12D5, 0x1466, 0x15F7, 0x1787,
    0x1918, 0x1AA8, 0x1C38, 0x1DC7, 0x1F56, 0x20E5, 0x2274, 0x2402,
    0x2590, 0x271E, 0x28AB, 0x2A38, 0x2BC4, 0x2D50, 0x2EDC, 0x3067,
    0x31F1, 0x337C, 0x3505, 0x368E, 0x3817, 0x399F, 0x3B27, 0x3CAE,
    0x3E34, 0x3FBA, 0x413F, 0x42C3, 0x4447, 0x45CB, 0x474D, 0x48CF,
    0x4A50, 0x4BD1, 0x4D50, 0x4ECF, 0x504D, 0x51CB, 0x5348, 0x54C3,
    0x563E, 0x57B9, 0x5932, 0x5AAA, 0x5C22, 0x5D99, 0x5F0F, 0x6084,
    0x61F8, 0x636B, 0x64DD, 0x664E, 0x67BE, 0x692D, 0x6A9B, 0x6C08,
    0x6D74, 0x6EDF, 0x7049, 0x71B2, 0x731A, 0x7480, 0x75E6, 0x774A,
    0x78AD, 0x7A10, 0x7B70, 0x7CD0, 0x7E2F, 0x7F8C, 0x80E8, 0x8243,
    0x839C, 0x84F5, 0x864C, 0x87A1, 0x88F6, 0x8A49, 0x8B9A, 0x8CEB,
    0x8E3A, 0x8F88, 0x90D4, 0x921F, 0x9368, 0x94B0, 0x95F7, 0x973C,
    0x9880, 0x99C2, 0x9B03, 0x9C42, 0x9D80, 0x9EBC, 0x9FF7, 0xA130,
    0xA268, 0xA39E, 0xA4D2, 0xA605, 0xA736, 0xA866, 0xA994, 0xAAC1,
    0xABEB, 0xAD14, 0xAE3C, 0xAF62, 0xB086, 0xB1A8, 0xB2C9, 0xB3E8,
    0xB505, 0xB620, 0xB73A, 0xB852, 0xB968, 0xBA7D, 0xBB8F, 0xBCA0,
    0xBDAF, 0xBEBC, 0xBFC7, 0xC0D1, 0xC1D8, 0xC2DE, 0xC3E2, 0xC4E4,
    0xC5E4, 0xC6E2, 0xC7DE, 0xC8D9, 0xC9D1, 0xCAC7, 0xCBBC, 0xCCAE,
    0xCD9F, 0xCE8E, 0xCF7A, 0xD065, 0xD14D, 0xD234, 0xD318, 0xD3FB,
    0xD4DB, 0xD5BA, 0xD696, 0xD770, 0xD848, 0xD91E, 0xD9F2, 0xDAC4,
    0xDB94, 0xDC62, 0xDD2D, 0xDDF7, 0xDEBE, 0xDF83, 0xE046, 0xE107,
    0xE1C6, 0xE282, 0xE33C, 0xE3F4, 0xE4AA, 0xE55E, 0xE610, 0xE6BF,
    0xE76C, 0xE817, 0xE8BF, 0xE966, 0xEA0A, 0xEAAB, 0xEB4B, 0xEBE8,
    0xEC83, 0xED1C, 0xEDB3, 0xEE47, 0xEED9, 0xEF68, 0xEFF5, 0xF080,
    0xF109, 0xF18F, 0xF213, 0xF295, 0xF314, 0xF391, 0xF40C, 0xF484,
    0xF4FA, 0xF56E, 0xF5DF, 0xF64E, 0xF6BA, 0xF724, 0xF78C, 0xF7F1,
    0xF854, 0xF8B4, 0xF913, 0xF96E, 0xF9C8, 0xFA1F, 0xFA73, 0xFAC5,
    0xFB15, 0xFB62, 0xFBAD, 0xFBF5, 0xFC3B, 0xFC7F, 0xFCC0, 0xFCFE,
    0xFD3B, 0xFD74, 0xFDAC, 0xFDE1, 0xFE13, 0xFE43, 0xFE71, 0xFE9C,
    0xFEC4, 0xFEEB, 0xFF0E, 0xFF30, 0xFF4E, 0xFF6B, 0xFF85, 0xFF9C,
    0xFFB1, 0xFFC4, 0xFFD4, 0xFFE1, 0xFFEC, 0xFFF5, 0xFFFB, 0xFFFF,
];

// Width of the sub-step between adjacent LUT knots: the 14 significant
// phase bits split into an 8-bit key and a 6-bit interpolation index.
const COEF_BITS: u32 = 6;
const COEF_MASK: u16 = (1 << COEF_BITS) - 1;

fn lut(key: u8) -> Scalar {
    Scalar::from_bits(SINE_LUT[key as usize])
}

/// First-quadrant sine: `sin(phi)` for a phase in `[0, pi/2)`, returned
/// as an unsigned UQ0.16 magnitude in `[0, 1)`.
///
/// Looks up the two neighbouring LUT knots and blends them linearly with
/// the 6-bit sub-step scaled up to a full [Scalar] coefficient. When the
/// phase lands exactly on a knot the entry is returned as-is, with no
/// interpolation rounding. The right neighbour of the last knot is
/// `sin(pi/2) = 1.0`, stored as 0 modulo 1, so its weighted contribution
/// reduces to the bare coefficient.
pub fn qsin(phi: Scalar) -> Scalar {
    debug_assert!(phi < PHASE_PI_2);
    let bits = phi.to_bits();
    let key0 = (bits >> COEF_BITS) as u8;
    let coef = Scalar::from_bits((bits & COEF_MASK) << (16 - COEF_BITS));
    if coef == Scalar::ZERO {
        return lut(key0);
    }
    let key1 = key0.wrapping_add(1);
    let val1 = if key1 == 0 {
        coef
    } else {
        qmul(lut(key1), coef)
    };
    let val0 = qmul(lut(key0), coef.wrapping_neg());
    // Both taps are below one and their weights sum to one, so the sum
    // stays below one; UQ1.21 gives it an explicit bit of headroom.
    let sum = SumScalar::from_num(val0) + SumScalar::from_num(val1);
    debug_assert!(sum < SumScalar::ONE);
    Scalar::from_num(sum)
}

/// Attenuated sine over the full phase turn: `sin(phi) * (1 - att)`,
/// rounded to a signed SQ0.15 sample.
///
/// The phase covers `[0, 2*pi)` as a full-range [Scalar]; `att` is the
/// attenuation factor in `[0, 1)`. The two phases whose sine magnitude
/// is exactly one (pi/2 and 3*pi/2) are handled up front: +1 saturates
/// to [Sample::MAX], -1 is returned exactly. Every other phase folds
/// into the first quadrant, evaluates [qsin], scales by `1 - att`, and
/// narrows to SQ0.15 rounding half up (with saturation at the positive
/// maximum). The round-half-up step is what keeps very small amplitudes
/// alive: inputs that would truncate to a constant zero instead
/// alternate between zero and the next code, with an average that still
/// tracks the sine.
pub fn msin(phi: Scalar, att: Scalar) -> Sample {
    if phi == PHASE_PI_2 {
        return if att == Scalar::ZERO {
            Sample::MAX
        } else {
            sample_from_scalar(att.wrapping_neg())
        };
    }
    if phi == PHASE_3PI_2 {
        return if att == Scalar::ZERO {
            Sample::NEG_ONE
        } else {
            -sample_from_scalar(att.wrapping_neg())
        };
    }

    let mut phi1 = phi;
    let mut neg = false;
    if phi1 >= PHASE_PI {
        phi1 -= PHASE_PI;
        neg = true;
    }
    if phi1 > PHASE_PI_2 {
        phi1 = PHASE_PI - phi1;
    }

    let mut usin = qsin(phi1);
    if att > Scalar::ZERO {
        // 1 - att, with 1.0 encoded as 0 modulo 1.
        usin = qmul(usin, att.wrapping_neg());
    }

    let lsb = usin.to_bits() & 1 != 0;
    let mut ssin = sample_from_scalar(usin);
    if lsb && ssin < Sample::MAX {
        ssin += Sample::DELTA;
    }
    if neg {
        -ssin
    } else {
        ssin
    }
}

const fn squares() -> [u16; 128] {
    let mut table = [0u16; 128];
    let mut k = 0usize;
    while k < 128 {
        table[k] = (k * k) as u16;
        k += 1;
    }
    table
}

static SQUARES: [u16; 128] = squares();

/// Integer square root: the largest k with `k*k <= x`, for `x < 0x4000`.
///
/// Scans the table of squares for the first entry strictly greater than
/// x; monotonic non-decreasing, exact on perfect squares.
pub fn isqrt(x: u16) -> u16 {
    debug_assert!(x < 0x4000);
    for (k, sq) in SQUARES.iter().enumerate().skip(1) {
        if *sq > x {
            return (k - 1) as u16;
        }
    }
    127
}
