//! Arbitrary precision signed integers.
//!
//! A [BigInteger] is a sign together with a little-endian sequence of digit
//! groups in base 10^7. The sign is zero exactly when there are no groups, and
//! the most significant group is never zero.

mod arith;
mod convert;
pub(crate) mod digits;

use crate::traits::FractionBase;
use core::cmp::Ordering;

/// Radix of one digit group
pub const BASE: u32 = 10_000_000;

/// Number of decimal digits in one digit group
pub const BASE_DIGITS: usize = 7;

/// Largest exponent accepted by [BigInteger::pow] and [BigInteger::exp10]
pub const MAX_EXPONENT: i64 = 0x7FFF_FFFF;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInteger {
    sign: i8,
    digits: Vec<u32>,
}

impl BigInteger {
    /// Build a value from raw groups, restoring the normal form
    pub(crate) fn from_digits(sign: i8, mut digits: Vec<u32>) -> Self {
        digits::trim(&mut digits);
        if digits.is_empty() || sign == 0 {
            BigInteger { sign: 0, digits: Vec::new() }
        } else {
            BigInteger { sign: sign.signum(), digits }
        }
    }

    /// Sign of the value as -1, 0 or 1
    #[inline]
    pub fn sign(&self) -> i8 {
        self.sign
    }

    /// Digit groups of the magnitude, least significant first
    #[inline]
    pub fn digits(&self) -> &[u32] {
        &self.digits
    }

    /// Whether the value is 1 or -1
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 1
    }

    /// Compare magnitudes, ignoring signs
    pub fn compare_abs(&self, other: &Self) -> Ordering {
        digits::cmp_abs(&self.digits, &other.digits)
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return self.sign.cmp(&other.sign);
        }
        match self.sign {
            0 => Ordering::Equal,
            1 => self.compare_abs(other),
            _ => other.compare_abs(self),
        }
    }
}

impl PartialOrd for BigInteger {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for BigInteger {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl FractionBase for BigInteger {
    const MAX_LOOPS: u64 = 1 << 30;
    const TRACE_LOOPS: u64 = 1 << 16;

    #[inline]
    fn infinitesimal_precision() -> Self {
        BigInteger::from(u128::MAX)
    }

    #[inline]
    fn square(&self) -> Self {
        BigInteger::square(self)
    }

    fn checked_pow(&self, exp: u32) -> Option<Self> {
        self.pow(exp as i64).ok()
    }
}
