//! Q16.16 fixed-point scalar used for every world and camera quantity.

use fixed::types::{
    I16F16,
    I32F32,
};
use fixed_sqrt::FixedSqrt;

/// Signed fixed-point number, 16 integer bits and 16 fractional bits.
pub type Scalar = I16F16;

pub const ZERO: Scalar = Scalar::ZERO;
pub const ONE: Scalar = Scalar::ONE;
pub const HALF: Scalar = Scalar::from_bits(1 << 15);
/// π, the default half extent of the world's horizontal square.
pub const PI: Scalar = Scalar::from_bits(205_887);

/// Integer to scalar, usable in `const` context.
#[inline]
pub const fn from_int(v: i32) -> Scalar {
    Scalar::from_bits(v << 16)
}

/// Square root; negative inputs yield zero.
///
/// The root is taken in Q32.32: a root in Q16.16 only resolves half of the
/// fractional bits.
#[inline]
pub fn sqrt(v: Scalar) -> Scalar {
    let wide = I32F32::from_num(v.max(ZERO));
    Scalar::from_num(FixedSqrt::sqrt(wide))
}

/// Divides, saturating instead of panicking on a zero or overflowing divisor.
#[inline]
pub fn div_or_saturate(num: Scalar, den: Scalar) -> Scalar {
    match num.checked_div(den) {
        Some(q) => q,
        None if num.is_negative() != den.is_negative() => Scalar::MIN,
        None => Scalar::MAX,
    }
}

/// Arithmetic mean of two scalars without intermediate overflow.
#[inline]
pub const fn midpoint(a: Scalar, b: Scalar) -> Scalar {
    Scalar::from_bits(((a.to_bits() as i64 + b.to_bits() as i64) >> 1) as i32)
}
