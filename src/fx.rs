//! Q10 fixed-point arithmetic.
//!
//! An [`Fx`] holds `raw / 1024`. Products of two values carry a `1024²`
//! scale, so `Fx * Fx` divides by [`SCALE`] once (truncating toward zero,
//! like the C integer division the kernel was tuned against). All
//! arithmetic wraps on overflow; keep operands inside
//! [`MAX_COORD`](crate::config::MAX_COORD) and nothing overflows.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use fixed::types::I22F10;
use fixed_sqrt::FixedSqrt;

use crate::{config::SQRT_ITERATIONS, error::NoiseError};

pub const FRAC_BITS: u32 = 10;
pub const SCALE: i32 = 1 << FRAC_BITS;
pub const FRAC_MASK: i32 = SCALE - 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fx(i32);

impl Fx {
    pub const ZERO: Self = Self(0);
    pub const HALF: Self = Self(SCALE / 2);
    pub const ONE: Self = Self(SCALE);

    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// `i * 1024`. Wraps for `|i| >= 2^21`.
    #[inline]
    pub const fn from_int(i: i32) -> Self {
        Self(i.wrapping_mul(SCALE))
    }

    /// Truncates toward zero: `-0.5` becomes `0`, not `-1`.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 / SCALE
    }

    /// For logs and host tools only; the kernel never touches floats.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE as f32
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        sqrt_fixed(self)
    }

    /// Fully converged square root. Slower than [`sqrt_fixed`]; negative
    /// input is clamped to zero.
    #[inline]
    pub fn sqrt_converged(self) -> Self {
        let v = I22F10::from_bits(self.0.max(0));
        Self::from(FixedSqrt::sqrt(v))
    }
}

impl From<I22F10> for Fx {
    #[inline]
    fn from(value: I22F10) -> Self {
        Self(value.to_bits())
    }
}

impl From<Fx> for I22F10 {
    #[inline]
    fn from(value: Fx) -> Self {
        I22F10::from_bits(value.0)
    }
}

impl Add for Fx {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fx {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fx {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Fx {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fx {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.wrapping_neg())
    }
}

impl Mul for Fx {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        #[cfg(feature = "overflow-assert")]
        debug_assert!(
            i32::try_from(i64::from(self.0) * i64::from(rhs.0)).is_ok(),
            "fx mul overflow: {} * {}",
            self.0,
            rhs.0
        );
        Self(self.0.wrapping_mul(rhs.0) / SCALE)
    }
}

/// Scales by a plain integer; no compensation needed.
impl Mul<i32> for Fx {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self(self.0.wrapping_mul(rhs))
    }
}

impl Div for Fx {
    type Output = Self;

    /// Panics on a zero divisor, like integer division.
    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        Self(((i64::from(self.0) << FRAC_BITS) / i64::from(rhs.0)) as i32)
    }
}

impl Div<i32> for Fx {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self::Output {
        Self(self.0.wrapping_div(rhs))
    }
}

#[inline]
pub const fn to_fixed(i: i32) -> Fx {
    Fx::from_int(i)
}

#[inline]
pub const fn to_int(f: Fx) -> i32 {
    f.to_int()
}

#[inline]
pub fn to_float_debug(f: Fx) -> f32 {
    f.to_f32()
}

/// Newton-Raphson square root with the animation-tuned iteration count.
///
/// Not converged for large inputs: `sqrt_fixed(to_fixed(10_000))` lands 7 raw
/// units above 100. Non-positive input returns zero.
#[inline]
pub fn sqrt_fixed(f: Fx) -> Fx {
    sqrt_fixed_with(f, SQRT_ITERATIONS)
}

pub fn sqrt_fixed_with(f: Fx, iterations: u32) -> Fx {
    if f.0 <= 0 {
        return Fx::ZERO;
    }

    // f * 1024 leaves i32 above 2048.0, so the quotient runs in i64.
    let n = i64::from(f.0) << FRAC_BITS;
    let mut v = i64::from((f.0 / 2).max(1));
    for _ in 0..iterations {
        v = (v + n / v) / 2;
    }
    Fx(v as i32)
}

pub fn checked_sqrt(f: Fx) -> Result<Fx, NoiseError> {
    if f < Fx::ZERO {
        return Err(NoiseError::NegativeSqrt(f));
    }
    Ok(sqrt_fixed(f))
}
