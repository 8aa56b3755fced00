use super::{digits, BigInteger, BASE_DIGITS, MAX_EXPONENT};
use crate::error::{Error, Result};
use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Signed, Zero};

impl BigInteger {
    /// Add `other` with its sign replaced by `other_sign`
    fn add_signed(&self, other: &BigInteger, other_sign: i8) -> BigInteger {
        if other_sign == 0 {
            return self.clone();
        }
        if self.sign == 0 {
            return BigInteger { sign: other_sign, digits: other.digits.clone() };
        }
        if self.sign == other_sign {
            let sum = if other.digits.len() == 1 {
                digits::add_small(&self.digits, other.digits[0])
            } else if self.digits.len() == 1 {
                digits::add_small(&other.digits, self.digits[0])
            } else {
                digits::add(&self.digits, &other.digits)
            };
            return BigInteger { sign: self.sign, digits: sum };
        }
        match digits::cmp_abs(&self.digits, &other.digits) {
            Ordering::Equal => BigInteger::zero(),
            Ordering::Greater => BigInteger::from_digits(self.sign, digits::sub(&self.digits, &other.digits)),
            Ordering::Less => BigInteger::from_digits(other_sign, digits::sub(&other.digits, &self.digits)),
        }
    }

    /// Return the absolute value
    pub fn abs(&self) -> BigInteger {
        BigInteger { sign: self.sign.abs(), digits: self.digits.clone() }
    }

    /// The value plus one
    pub fn next(&self) -> BigInteger {
        match self.sign {
            0 => BigInteger::one(),
            1 => BigInteger { sign: 1, digits: digits::add_small(&self.digits, 1) },
            _ => BigInteger::from_digits(-1, digits::sub_small(&self.digits, 1)),
        }
    }

    /// The value minus one
    pub fn prev(&self) -> BigInteger {
        match self.sign {
            0 => -BigInteger::one(),
            1 => BigInteger::from_digits(1, digits::sub_small(&self.digits, 1)),
            _ => BigInteger { sign: -1, digits: digits::add_small(&self.digits, 1) },
        }
    }

    /// Multiply by a value whose magnitude fits in one digit group
    pub(crate) fn multiply_single_digit(&self, n: u32) -> BigInteger {
        BigInteger::from_digits(self.sign, digits::mul_small(&self.digits, n))
    }

    /// Square the value, cheaper than multiplying it with itself
    pub fn square(&self) -> BigInteger {
        if self.sign == 0 {
            return BigInteger::zero();
        }
        if self.is_unit() {
            return BigInteger::one();
        }
        BigInteger { sign: 1, digits: digits::square(&self.digits) }
    }

    /// Truncated division. The quotient is rounded toward zero and
    /// the remainder takes the sign of the dividend.
    pub fn div_rem(&self, other: &BigInteger) -> Result<(BigInteger, BigInteger)> {
        if other.sign == 0 {
            return Err(Error::DivideByZero);
        }
        if self.sign == 0 {
            return Ok((BigInteger::zero(), BigInteger::zero()));
        }
        let sign = self.sign * other.sign;
        if other.digits.len() == 1 {
            let (q, r) = digits::divrem_small(&self.digits, other.digits[0]);
            return Ok((BigInteger::from_digits(sign, q), BigInteger::from_digits(self.sign, vec![r])));
        }
        match self.compare_abs(other) {
            Ordering::Equal => Ok((BigInteger::from(sign as i64), BigInteger::zero())),
            Ordering::Less => Ok((BigInteger::zero(), self.clone())),
            Ordering::Greater => {
                let (q, r) = digits::divrem(&self.digits, &other.digits);
                Ok((BigInteger::from_digits(sign, q), BigInteger::from_digits(self.sign, r)))
            }
        }
    }

    #[inline]
    pub fn quotient(&self, other: &BigInteger) -> Result<BigInteger> {
        self.div_rem(other).map(|(q, _)| q)
    }

    #[inline]
    pub fn remainder(&self, other: &BigInteger) -> Result<BigInteger> {
        self.div_rem(other).map(|(_, r)| r)
    }

    /// Halve the magnitude, keeping the sign
    fn halve(&self) -> BigInteger {
        BigInteger::from_digits(self.sign, digits::divrem_small(&self.digits, 2).0)
    }

    /// Raise to an integer power by repeated squaring.
    ///
    /// `0^0` is one, negative exponents truncate to zero (or to a unit for a
    /// unit base) and zero to a negative power fails.
    pub fn pow(&self, n: i64) -> Result<BigInteger> {
        if self.is_unit() {
            return Ok(if self.sign > 0 || n.is_even() { BigInteger::one() } else { self.clone() });
        }
        if n == 0 {
            return Ok(BigInteger::one());
        }
        if n < 0 {
            return if self.is_zero() { Err(Error::DivideByZero) } else { Ok(BigInteger::zero()) };
        }
        if self.is_zero() {
            return Ok(BigInteger::zero());
        }
        if n == 1 {
            return Ok(self.clone());
        }
        if n > MAX_EXPONENT {
            return Err(Error::ExponentTooLarge(n));
        }

        let mut exp = n;
        let mut base = self.clone();
        let mut acc = BigInteger::one();
        loop {
            if exp & 1 == 1 {
                acc = &acc * &base;
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            base = base.square();
        }
        Ok(acc)
    }

    /// Compute `self^exp mod modulus`, reducing after every step so the
    /// exponent is not bounded like in [BigInteger::pow]
    pub fn mod_pow(&self, exp: &BigInteger, modulus: &BigInteger) -> Result<BigInteger> {
        if modulus.is_zero() {
            return Err(Error::DivideByZero);
        }
        let mut result = BigInteger::one();
        let mut base = self.clone();
        let mut exp = exp.clone();
        while exp.is_positive() {
            if exp.is_odd() {
                result = (&result * &base).remainder(modulus)?;
            }
            exp = exp.halve();
            if exp.is_positive() {
                base = base.square().remainder(modulus)?;
            }
        }
        Ok(result)
    }

    /// Multiply by `10^n`, a negative `n` divides with truncation
    pub fn exp10(&self, n: i64) -> Result<BigInteger> {
        if n == 0 || self.is_zero() {
            return Ok(self.clone());
        }
        if n.abs() > MAX_EXPONENT {
            return Err(Error::ExponentTooLarge(n));
        }
        let groups = (n.abs() as usize) / BASE_DIGITS;
        let rest = (n.abs() as usize % BASE_DIGITS) as u32;
        if n > 0 {
            let mut digits = vec![0; groups];
            digits.extend_from_slice(&self.digits);
            let shifted = BigInteger { sign: self.sign, digits };
            Ok(shifted.multiply_single_digit(10u32.pow(rest)))
        } else if groups >= self.digits.len() {
            Ok(BigInteger::zero())
        } else {
            let kept = self.digits[groups..].to_vec();
            let (q, _) = digits::divrem_small(&kept, 10u32.pow(rest));
            Ok(BigInteger::from_digits(self.sign, q))
        }
    }

    /// Natural logarithm. Zero gives negative infinity and negative values NaN.
    pub fn ln(&self) -> f64 {
        match self.sign {
            0 => return f64::NEG_INFINITY,
            -1 => return f64::NAN,
            _ => {}
        }
        // only the leading 30 decimal digits matter for a double
        const LEADING: usize = (30 + BASE_DIGITS - 1) / BASE_DIGITS;
        let l = self.digits.len();
        if l * BASE_DIGITS < 30 {
            return self.to_f64_lossy().ln();
        }
        let head = BigInteger { sign: 1, digits: self.digits[l - LEADING..].to_vec() };
        head.to_f64_lossy().ln() + ((l - LEADING) * BASE_DIGITS) as f64 * core::f64::consts::LN_10
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;

    #[inline]
    fn neg(mut self) -> BigInteger {
        self.sign = -self.sign;
        self
    }
}

impl<'a> Neg for &'a BigInteger {
    type Output = BigInteger;

    #[inline]
    fn neg(self) -> BigInteger {
        -self.clone()
    }
}

impl<'a, 'b> Add<&'b BigInteger> for &'a BigInteger {
    type Output = BigInteger;

    #[inline]
    fn add(self, other: &BigInteger) -> BigInteger {
        self.add_signed(other, other.sign)
    }
}

impl<'a, 'b> Sub<&'b BigInteger> for &'a BigInteger {
    type Output = BigInteger;

    #[inline]
    fn sub(self, other: &BigInteger) -> BigInteger {
        self.add_signed(other, -other.sign)
    }
}

impl<'a, 'b> Mul<&'b BigInteger> for &'a BigInteger {
    type Output = BigInteger;

    fn mul(self, other: &BigInteger) -> BigInteger {
        if self.is_zero() || other.is_zero() {
            return BigInteger::zero();
        }
        if core::ptr::eq(self, other) {
            return self.square();
        }
        let sign = self.sign * other.sign;
        if self.is_unit() {
            return BigInteger { sign, digits: other.digits.clone() };
        }
        if other.is_unit() {
            return BigInteger { sign, digits: self.digits.clone() };
        }
        let digits = if other.digits.len() == 1 {
            digits::mul_small(&self.digits, other.digits[0])
        } else if self.digits.len() == 1 {
            digits::mul_small(&other.digits, self.digits[0])
        } else {
            digits::mul(&self.digits, &other.digits)
        };
        BigInteger::from_digits(sign, digits)
    }
}

/// Panics on a zero divisor, use [BigInteger::quotient] to handle it
impl<'a, 'b> Div<&'b BigInteger> for &'a BigInteger {
    type Output = BigInteger;

    fn div(self, other: &BigInteger) -> BigInteger {
        match self.div_rem(other) {
            Ok((q, _)) => q,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Panics on a zero divisor, use [BigInteger::remainder] to handle it
impl<'a, 'b> Rem<&'b BigInteger> for &'a BigInteger {
    type Output = BigInteger;

    fn rem(self, other: &BigInteger) -> BigInteger {
        match self.div_rem(other) {
            Ok((_, r)) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

macro_rules! forward_binop {
    (impl $imp:ident, $method:ident) => {
        impl $imp<BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, other: BigInteger) -> BigInteger {
                (&self).$method(&other)
            }
        }

        impl<'a> $imp<&'a BigInteger> for BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, other: &BigInteger) -> BigInteger {
                (&self).$method(other)
            }
        }

        impl<'a> $imp<BigInteger> for &'a BigInteger {
            type Output = BigInteger;

            #[inline]
            fn $method(self, other: BigInteger) -> BigInteger {
                self.$method(&other)
            }
        }
    };
}

forward_binop!(impl Add, add);
forward_binop!(impl Sub, sub);
forward_binop!(impl Mul, mul);
forward_binop!(impl Div, div);
forward_binop!(impl Rem, rem);

impl AddAssign<&BigInteger> for BigInteger {
    #[inline]
    fn add_assign(&mut self, other: &BigInteger) {
        *self = &*self + other;
    }
}

impl SubAssign<&BigInteger> for BigInteger {
    #[inline]
    fn sub_assign(&mut self, other: &BigInteger) {
        *self = &*self - other;
    }
}

impl MulAssign<&BigInteger> for BigInteger {
    #[inline]
    fn mul_assign(&mut self, other: &BigInteger) {
        *self = &*self * other;
    }
}

impl Zero for BigInteger {
    #[inline]
    fn zero() -> Self {
        BigInteger { sign: 0, digits: Vec::new() }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.sign == 0
    }
}

impl One for BigInteger {
    #[inline]
    fn one() -> Self {
        BigInteger { sign: 1, digits: vec![1] }
    }
}

impl Signed for BigInteger {
    #[inline]
    fn abs(&self) -> Self {
        BigInteger::abs(self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            BigInteger::zero()
        } else {
            self - other
        }
    }

    #[inline]
    fn signum(&self) -> Self {
        BigInteger::from(self.sign as i64)
    }

    #[inline]
    fn is_positive(&self) -> bool {
        self.sign > 0
    }

    #[inline]
    fn is_negative(&self) -> bool {
        self.sign < 0
    }
}

impl Integer for BigInteger {
    fn div_floor(&self, other: &Self) -> Self {
        let (q, r) = Integer::div_rem(self, other);
        if !r.is_zero() && r.sign != other.sign {
            q.prev()
        } else {
            q
        }
    }

    fn mod_floor(&self, other: &Self) -> Self {
        let r = self % other;
        if !r.is_zero() && r.sign != other.sign {
            r + other
        } else {
            r
        }
    }

    /// Euclid over the magnitudes, the result is never negative
    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.abs();
        let mut b = other.abs();
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() && other.is_zero() {
            return BigInteger::zero();
        }
        let g = Integer::gcd(self, other);
        (self * &(other / &g)).abs()
    }

    #[inline]
    fn divides(&self, other: &Self) -> bool {
        self.is_multiple_of(other)
    }

    fn is_multiple_of(&self, other: &Self) -> bool {
        if other.is_zero() {
            return self.is_zero();
        }
        (self % other).is_zero()
    }

    #[inline]
    fn is_even(&self) -> bool {
        // the radix is even, so the parity is the one of the lowest group
        self.digits.first().map_or(true, |d| d % 2 == 0)
    }

    #[inline]
    fn is_odd(&self) -> bool {
        !self.is_even()
    }

    fn div_rem(&self, other: &Self) -> (Self, Self) {
        match BigInteger::div_rem(self, other) {
            Ok(qr) => qr,
            Err(e) => panic!("{}", e),
        }
    }
}

impl CheckedAdd for BigInteger {
    #[inline]
    fn checked_add(&self, v: &Self) -> Option<Self> {
        Some(self + v)
    }
}

impl CheckedSub for BigInteger {
    #[inline]
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        Some(self - v)
    }
}

impl CheckedMul for BigInteger {
    #[inline]
    fn checked_mul(&self, v: &Self) -> Option<Self> {
        Some(self * v)
    }
}

impl CheckedDiv for BigInteger {
    #[inline]
    fn checked_div(&self, v: &Self) -> Option<Self> {
        self.quotient(v).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInteger {
        s.parse().unwrap()
    }

    #[test]
    fn add_sub_test() {
        assert_eq!(big("9999999") + big("1"), big("10000000"));
        assert_eq!(big("10000000") - big("1"), big("9999999"));
        assert_eq!(big("-5") + big("5"), BigInteger::zero());
        assert_eq!(big("3") - big("10000000000"), big("-9999999997"));
        assert_eq!(big("-123456789012") - big("-123456789012"), BigInteger::zero());
        assert_eq!(big("-1").next(), BigInteger::zero());
        assert_eq!(big("0").prev(), big("-1"));
        assert_eq!(big("-9999999").prev(), big("-10000000"));
        assert_eq!(big("10000000").prev(), big("9999999"));
    }

    #[test]
    fn mul_test() {
        let a = big("123456789012345678901234567890");
        let b = big("-987654321098765432109876543210");
        assert_eq!(
            &a * &b,
            big("-121932631137021795226185032733622923332237463801111263526900")
        );
        assert_eq!(&a * &a, a.square());
        assert_eq!(b.square(), &b * &b.clone());
        assert_eq!(a.multiply_single_digit(3), big("370370367037037036703703703670"));
        assert_eq!(big("-1").square(), BigInteger::one());
    }

    #[test]
    fn div_rem_test() {
        assert_eq!(big("5").quotient(&big("0")), Err(Error::DivideByZero));
        assert_eq!(big("0").div_rem(&big("7")), Ok((big("0"), big("0"))));

        let (q, r) = big("-7").div_rem(&big("2")).unwrap();
        assert_eq!((q, r), (big("-3"), big("-1")));
        let (q, r) = big("7").div_rem(&big("-2")).unwrap();
        assert_eq!((q, r), (big("-3"), big("1")));

        let a = big("121932631137021795226185032733622923332237463801111263526900");
        let b = big("987654321098765432109876543210");
        assert_eq!(a.div_rem(&b).unwrap(), (big("123456789012345678901234567890"), big("0")));

        let n = big("-31415926535897932384626433832795028841971");
        let d = big("2718281828459045235360");
        let (q, r) = n.div_rem(&d).unwrap();
        assert_eq!(&q * &d + &r, n);
        assert!(r.compare_abs(&d) == Ordering::Less);
        assert!(r.is_negative());

        assert_eq!(d.div_rem(&(-&d)).unwrap(), (big("-1"), big("0")));
        assert_eq!(d.div_rem(&n).unwrap(), (big("0"), d.clone()));
    }

    #[test]
    fn pow_test() {
        assert_eq!(big("0").pow(0), Ok(big("1")));
        assert_eq!(big("0").pow(-1), Err(Error::DivideByZero));
        assert_eq!(big("7").pow(-2), Ok(big("0")));
        assert_eq!(big("-1").pow(-3), Ok(big("-1")));
        assert_eq!(big("-1").pow(4), Ok(big("1")));
        assert_eq!(big("2").pow(100), Ok(big("1267650600228229401496703205376")));
        assert_eq!(big("-3").pow(5), Ok(big("-243")));
        assert_eq!(big("2").pow(MAX_EXPONENT + 1), Err(Error::ExponentTooLarge(MAX_EXPONENT + 1)));
    }

    #[test]
    fn mod_pow_test() {
        assert_eq!(big("4").mod_pow(&big("13"), &big("497")), Ok(big("445")));
        assert_eq!(big("2").mod_pow(&big("0"), &big("5")), Ok(big("1")));
        assert_eq!(big("2").mod_pow(&big("10"), &big("0")), Err(Error::DivideByZero));
        let p = big("170141183460469231731687303715884105727"); // 2^127 - 1
        assert_eq!(big("3").mod_pow(&(&p - &big("1")), &p), Ok(big("1")));
    }

    #[test]
    fn exp10_test() {
        assert_eq!(big("12").exp10(9), Ok(big("12000000000")));
        assert_eq!(big("-12").exp10(3), Ok(big("-12000")));
        assert_eq!(big("123456789012").exp10(-8), Ok(big("1234")));
        assert_eq!(big("123").exp10(-7), Ok(big("0")));
        assert_eq!(big("1").exp10(MAX_EXPONENT + 1), Err(Error::ExponentTooLarge(MAX_EXPONENT + 1)));
    }

    #[test]
    fn integer_trait_test() {
        assert_eq!(Integer::gcd(&big("-360"), &big("666")), big("18"));
        assert_eq!(big("4").lcm(&big("6")), big("12"));
        assert_eq!(big("-7").div_floor(&big("2")), big("-4"));
        assert_eq!(big("-7").mod_floor(&big("2")), big("1"));
        assert!(big("10000000").is_even());
        assert!(big("-10000001").is_odd());
        assert!(big("0").is_even());
    }

    #[test]
    fn ln_test() {
        assert_eq!(big("0").ln(), f64::NEG_INFINITY);
        assert!(big("-3").ln().is_nan());
        assert!((big("1000").ln() - 1000f64.ln()).abs() < 1e-12);
        let huge = big("10").pow(400).unwrap();
        assert!((huge.ln() - 400.0 * core::f64::consts::LN_10).abs() < 1e-9);
    }
}
