//! 8.8 fixed-point numbers for integer-only motion.
//!
//! - `Fu8_8`: unsigned positions, 0.0 ..= 255.996
//! - `Fs8_8`: signed velocities, -128.0 ..= 127.996
//!
//! Both store `value * 256` in 16 bits. Arithmetic wraps at the fixed width;
//! anything that must not wrap is clamped by the caller.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

pub const FRAC_BITS: u32 = 8;
pub const ONE_RAW: i32 = 1 << FRAC_BITS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fu8_8(u16);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fs8_8(i16);

/// Parses a decimal literal such as `"2.5"` or `"-0.35"` into raw 8.8 units,
/// truncating the fraction toward zero.
///
/// Invalid input panics, which is a compile error when used in a `const`.
const fn parse_decimal_raw(text: &str) -> i32 {
    let bytes = text.as_bytes();
    let mut index = 0;
    let negative = !bytes.is_empty() && bytes[0] == b'-';
    if negative {
        index = 1;
    }
    if index >= bytes.len() {
        panic!("empty fixed-point literal");
    }

    let mut whole: i32 = 0;
    while index < bytes.len() && bytes[index] != b'.' {
        let digit = bytes[index];
        if digit < b'0' || digit > b'9' {
            panic!("invalid digit in fixed-point literal");
        }
        whole = whole * 10 + (digit - b'0') as i32;
        index += 1;
    }

    let mut numerator: i64 = 0;
    let mut denominator: i64 = 1;
    if index < bytes.len() {
        index += 1;
        while index < bytes.len() {
            let digit = bytes[index];
            if digit < b'0' || digit > b'9' {
                panic!("invalid digit in fixed-point literal");
            }
            // Digits past this precision cannot change a 1/256 result.
            if denominator < 1_000_000_000 {
                numerator = numerator * 10 + (digit - b'0') as i64;
                denominator *= 10;
            }
            index += 1;
        }
    }

    let fraction = ((numerator * ONE_RAW as i64) / denominator) as i32;
    let raw = whole * ONE_RAW + fraction;
    if negative {
        -raw
    } else {
        raw
    }
}

impl Fu8_8 {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_int(value: u8) -> Self {
        Self((value as u16) << FRAC_BITS)
    }

    /// Decimal literal, e.g. `Fu8_8::lit("120.5")`.
    pub const fn lit(text: &str) -> Self {
        let raw = parse_decimal_raw(text);
        if raw < 0 || raw > u16::MAX as i32 {
            panic!("unsigned fixed-point literal out of range");
        }
        Self(raw as u16)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Truncated integer coordinate.
    #[inline]
    pub const fn as_i(self) -> u8 {
        (self.0 >> FRAC_BITS) as u8
    }

    /// Moves the position by a signed velocity, wrapping like the hardware would.
    #[inline]
    pub const fn offset(self, velocity: Fs8_8) -> Self {
        Self(self.0.wrapping_add_signed(velocity.0))
    }
}

impl Fs8_8 {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_raw(raw: i16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn from_int(value: i8) -> Self {
        Self((value as i16) << FRAC_BITS)
    }

    /// Decimal literal, e.g. `Fs8_8::lit("-0.35")`.
    pub const fn lit(text: &str) -> Self {
        let raw = parse_decimal_raw(text);
        if raw < i16::MIN as i32 || raw > i16::MAX as i32 {
            panic!("signed fixed-point literal out of range");
        }
        Self(raw as i16)
    }

    #[inline]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Truncated integer part, rounding toward negative infinity like an
    /// arithmetic shift.
    #[inline]
    pub const fn as_i(self) -> i8 {
        (self.0 >> FRAC_BITS) as i8
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Halves the magnitude with an arithmetic shift.
    #[inline]
    pub const fn half(self) -> Self {
        Self(self.0 >> 1)
    }

    #[inline]
    pub const fn unsigned_abs(self) -> u16 {
        self.0.unsigned_abs()
    }

    #[inline]
    pub fn clamp_symmetric(self, limit: Self) -> Self {
        self.clamp(-limit, limit)
    }
}

impl Add for Fs8_8 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fs8_8 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fs8_8 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl AddAssign for Fs8_8 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fs8_8 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Add for Fu8_8 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fu8_8 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Add<Fs8_8> for Fu8_8 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Fs8_8) -> Self {
        self.offset(rhs)
    }
}

impl AddAssign<Fs8_8> for Fu8_8 {
    #[inline]
    fn add_assign(&mut self, rhs: Fs8_8) {
        *self = self.offset(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_truncate_toward_zero() {
        assert_eq!(Fs8_8::lit("0.15").raw(), 38);
        assert_eq!(Fs8_8::lit("0.35").raw(), 89);
        assert_eq!(Fs8_8::lit("2.5").raw(), 640);
        assert_eq!(Fs8_8::lit("-0.35").raw(), -89);
        assert_eq!(Fs8_8::lit("4").raw(), 1024);
        assert_eq!(Fu8_8::lit("120.5").raw(), 120 * 256 + 128);
    }

    #[test]
    fn literal_digits_beyond_precision_are_ignored() {
        assert_eq!(Fs8_8::lit("0.999999999999").raw(), 255);
    }

    #[test]
    fn as_i_truncates() {
        assert_eq!(Fu8_8::lit("17.99").as_i(), 17);
        assert_eq!(Fs8_8::lit("1.5").as_i(), 1);
        assert_eq!(Fs8_8::lit("-1.5").as_i(), -2);
    }

    #[test]
    fn signed_arithmetic_wraps_at_width() {
        let max = Fs8_8::from_raw(i16::MAX);
        assert_eq!((max + Fs8_8::from_raw(1)).raw(), i16::MIN);
        assert_eq!(-Fs8_8::lit("2.5"), Fs8_8::lit("-2.5"));
    }

    #[test]
    fn unsigned_offset_wraps_below_zero() {
        let pos = Fu8_8::from_int(1);
        assert_eq!(pos.offset(Fs8_8::from_int(-2)).raw(), 0u16.wrapping_sub(256));
        assert_eq!(pos + Fs8_8::lit("0.5"), Fu8_8::lit("1.5"));
    }

    #[test]
    fn ordering_compares_raw_values() {
        assert!(Fs8_8::lit("-0.01") < Fs8_8::ZERO);
        assert!(Fu8_8::from_int(3) > Fu8_8::lit("2.99"));
        assert_eq!(
            Fs8_8::lit("3.0").clamp_symmetric(Fs8_8::lit("2.5")),
            Fs8_8::lit("2.5")
        );
        assert_eq!(
            Fs8_8::lit("-3.0").clamp_symmetric(Fs8_8::lit("2.5")),
            Fs8_8::lit("-2.5")
        );
    }

    #[test]
    fn half_uses_arithmetic_shift() {
        assert_eq!(Fs8_8::from_raw(-3).half().raw(), -2);
        assert_eq!(Fs8_8::lit("1.0").half(), Fs8_8::lit("0.5"));
    }
}
