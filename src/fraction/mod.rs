//! Fractions over an integral ring.
//!
//! A [Fraction] keeps its numerator and denominator as given by the ring, with
//! zero denominators standing for the infinity `1/0` and the indeterminate
//! value `0/0`. Arithmetic never fails: dividing by zero yields one of these
//! values instead.

mod parametric;
mod render;
mod search;

pub use search::{Convergents, Node, SearchConfig};

use crate::bigint::BigInteger;
use crate::error::Error;
use crate::traits::FractionBase;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};
use core::str::FromStr;
use log::debug;
use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, ToPrimitive, Zero};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction<T> {
    numer: T,
    denom: T,
}

impl<T> Fraction<T> {
    /// Create a fraction without normalizing it
    #[inline]
    pub const fn new_raw(numer: T, denom: T) -> Self {
        Fraction { numer, denom }
    }

    #[inline]
    pub fn numer(&self) -> &T {
        &self.numer
    }

    #[inline]
    pub fn denom(&self) -> &T {
        &self.denom
    }

    /// Split into numerator and denominator
    #[inline]
    pub fn into_raw(self) -> (T, T) {
        (self.numer, self.denom)
    }

    /// Swap numerator and denominator. The result is not normalized.
    #[inline]
    pub fn recip(self) -> Self {
        Fraction { numer: self.denom, denom: self.numer }
    }
}

impl<T: FractionBase> Fraction<T> {
    /// Create a fraction in its canonical form
    #[inline]
    pub fn new(numer: T, denom: T) -> Self {
        Fraction { numer, denom }.normalize()
    }

    /// Bring the fraction into its canonical form.
    ///
    /// `0/0` stays indeterminate, a zero numerator gives `0/1`, a zero
    /// denominator gives `1/0` and equal parts give `1/1`. Otherwise the sign
    /// moves to the numerator and common factors are divided out.
    pub fn normalize(self) -> Self {
        let Fraction { numer, denom } = self;
        if numer.is_zero() && denom.is_zero() {
            return Self::infinull();
        }
        if numer.is_zero() {
            return Self::zero();
        }
        if denom.is_zero() {
            return Self::infinity();
        }
        if numer == denom {
            return Self::one();
        }

        // g is the negated divisor, dividing by it flips both signs
        let g = negated_gcd(&numer, &denom);
        let (numer, denom) = if g < -T::one() { (numer / g.clone(), denom / g) } else { (numer, denom) };
        if !denom.is_negative() {
            return Fraction { numer, denom };
        }
        match (T::zero().checked_sub(&numer), T::zero().checked_sub(&denom)) {
            (Some(numer), Some(denom)) => Fraction { numer, denom },
            // the most negative integer has no positive counterpart, step toward zero
            (None, _) => Fraction { numer: numer + T::one(), denom }.normalize(),
            (_, None) => Fraction { numer, denom: denom + T::one() }.normalize(),
        }
    }

    #[inline]
    pub fn neg_one() -> Self {
        Fraction::new_raw(-T::one(), T::one())
    }

    /// The infinity `1/0`, result of dividing a non-zero value by zero
    #[inline]
    pub fn infinity() -> Self {
        Fraction::new_raw(T::one(), T::zero())
    }

    /// The indeterminate value `0/0`
    #[inline]
    pub fn infinull() -> Self {
        Fraction::new_raw(T::zero(), T::zero())
    }

    #[inline]
    pub fn from_integer(n: T) -> Self {
        Fraction::new_raw(n, T::one())
    }

    /// Create `1/n`
    #[inline]
    pub fn from_integer_inverse(n: T) -> Self {
        Fraction::new(T::one(), n)
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.denom.is_zero() && !self.numer.is_zero()
    }

    #[inline]
    pub fn is_infinull(&self) -> bool {
        self.denom.is_zero() && self.numer.is_zero()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        !self.denom.is_zero()
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    #[inline]
    pub fn abs(&self) -> Self {
        Fraction::new_raw(self.numer.abs(), self.denom.clone())
    }

    /// Mediant `(a + c) / (b + d)` of `a/b` and `c/d`, the child of two
    /// neighbours in the Stern-Brocot tree
    pub fn mediant(&self, other: &Self) -> Self {
        Fraction::new(
            self.numer.clone() + other.numer.clone(),
            self.denom.clone() + other.denom.clone(),
        )
    }

    pub fn scalar_mul(&self, k: &T) -> Self {
        Fraction::new(self.numer.clone() * k.clone(), self.denom.clone())
    }

    pub fn scalar_div(&self, k: &T) -> Self {
        Fraction::new(self.numer.clone(), self.denom.clone() * k.clone())
    }

    /// Sum of the products of numerators and of denominators
    pub fn dot(&self, other: &Self) -> T {
        self.numer.clone() * other.numer.clone() + self.denom.clone() * other.denom.clone()
    }

    /// Raise to an integer power, a negative power raises the reciprocal
    pub fn pow(&self, p: i32) -> Self {
        let exp = p.unsigned_abs() as usize;
        match p {
            0 => Self::one(),
            2 => Fraction::new(self.numer.square(), self.denom.square()),
            p if p > 0 => Fraction::new(
                num_traits::pow(self.numer.clone(), exp),
                num_traits::pow(self.denom.clone(), exp),
            ),
            _ => Fraction::new(
                num_traits::pow(self.denom.clone(), exp),
                num_traits::pow(self.numer.clone(), exp),
            ),
        }
    }

    /// Same as [Fraction::pow], `None` if a component overflows
    pub fn checked_pow(&self, p: i32) -> Option<Self> {
        let exp = p.unsigned_abs();
        match p {
            0 => Some(Self::one()),
            p if p > 0 => Some(Fraction::new(self.numer.checked_pow(exp)?, self.denom.checked_pow(exp)?)),
            _ => Some(Fraction::new(self.denom.checked_pow(exp)?, self.numer.checked_pow(exp)?)),
        }
    }

    /// Equality with every zero and every infinity collapsed together
    pub fn equals(&self, other: &Self) -> bool {
        if self.numer.is_zero() && other.numer.is_zero() {
            return true;
        }
        if self.denom.is_zero() && other.denom.is_zero() {
            return true;
        }
        self.numer == other.numer && self.denom == other.denom
    }

    /// Whether the values are equal or closer than the infinitesimal of the ring
    #[inline]
    pub fn approximates(&self, other: &Self) -> bool {
        self.approximates_within(other, &T::infinitesimal_precision())
    }

    /// Whether the values are equal or differ by less than `1 / precision`
    pub fn approximates_within(&self, other: &Self, precision: &T) -> bool {
        if self.equals(other) {
            return true;
        }
        if !self.is_finite() || !other.is_finite() {
            return false;
        }
        match self.checked_sub(other) {
            // a scaled numerator that overflows is larger than any denominator
            Some(diff) => diff
                .numer
                .abs()
                .checked_mul(precision)
                .map_or(false, |scaled| scaled < diff.denom),
            None => {
                debug!("difference of {} and {} overflows, comparing as big fractions", self, other);
                match (self.widen(), other.widen(), precision.to_i128()) {
                    (Some(a), Some(b), Some(p)) => a.approximates_within(&b, &BigInteger::from(p)),
                    _ => false,
                }
            }
        }
    }

    /// Lift a fraction with components within `i128` to big integers
    fn widen(&self) -> Option<Fraction<BigInteger>> {
        Some(Fraction::new_raw(
            BigInteger::from(self.numer.to_i128()?),
            BigInteger::from(self.denom.to_i128()?),
        ))
    }

    /// Compare by cross multiplication, falling back to comparing the
    /// expansions when a product overflows
    fn cross_cmp(&self, other: &Self) -> Ordering {
        if let (Some(l), Some(r)) = (
            self.numer.checked_mul(&other.denom),
            other.numer.checked_mul(&self.denom),
        ) {
            return l.cmp(&r);
        }
        let (an, ad) = self.clone().with_positive_denom().into_raw();
        let (bn, bd) = other.clone().with_positive_denom().into_raw();
        cmp_by_expansion(an, ad, bn, bd)
    }

    fn with_positive_denom(self) -> Self {
        if self.denom.is_negative() {
            Fraction::new_raw(-self.numer, -self.denom)
        } else {
            self
        }
    }

    pub fn is_greater_than(&self, other: &Self) -> bool {
        !self.equals(other) && self.cross_cmp(other) == Ordering::Greater
    }

    pub fn is_less_than(&self, other: &Self) -> bool {
        !self.equals(other) && self.cross_cmp(other) == Ordering::Less
    }

    /// The smaller value, `other` if they are not ordered
    pub fn min(self, other: Self) -> Self {
        if self.is_less_than(&other) {
            self
        } else {
            other
        }
    }

    /// The larger value, `other` if they are not ordered
    pub fn max(self, other: Self) -> Self {
        if self.is_greater_than(&other) {
            self
        } else {
            other
        }
    }

    /// Largest integer not greater than the value, `None` for infinite values
    pub fn floor(&self) -> Option<T> {
        if !self.is_finite() {
            return None;
        }
        Some(self.numer.div_floor(&self.denom))
    }

    pub fn ceil(&self) -> Option<T> {
        if !self.is_finite() {
            return None;
        }
        let (q, r) = self.numer.div_mod_floor(&self.denom);
        Some(if r.is_zero() { q } else { q + T::one() })
    }

    /// Nearest integer, halves round up
    pub fn round(&self) -> Option<T> {
        if !self.is_finite() {
            return None;
        }
        let (q, r) = self.numer.div_mod_floor(&self.denom);
        let rest = self.denom.clone() - r.clone();
        Some(if r >= rest { q + T::one() } else { q })
    }

    /// Integer part, rounded toward zero
    pub fn trunc(&self) -> Option<T> {
        if !self.is_finite() {
            return None;
        }
        Some(self.numer.clone() / self.denom.clone())
    }

    /// Alias of [Fraction::round]
    #[inline]
    pub fn to_integer(&self) -> Option<T> {
        self.round()
    }

    /// Convert to a [Ratio], `None` for the infinity and the indeterminate value
    pub fn to_ratio(&self) -> Option<Ratio<T>> {
        if self.is_finite() {
            Some(Ratio::new(self.numer.clone(), self.denom.clone()))
        } else {
            None
        }
    }
}

/// Greatest common divisor of the magnitudes as a non-positive value.
///
/// Works on non-positive values throughout, so the most negative integer of a
/// native ring keeps a representable magnitude.
fn negated_gcd<T: FractionBase>(a: &T, b: &T) -> T {
    let nonpositive = |v: &T| if v.is_positive() { -v.clone() } else { v.clone() };
    let (mut a, mut b) = (nonpositive(a), nonpositive(b));
    let unit = -T::one();
    while !b.is_zero() {
        if b == unit {
            return unit;
        }
        let t = b.clone();
        b = a % b;
        a = t;
    }
    a
}

/// Order two fractions with positive denominators through their continued
/// fraction expansions, without forming any product
fn cmp_by_expansion<T: FractionBase>(mut an: T, mut ad: T, mut bn: T, mut bd: T) -> Ordering {
    let mut reversed = false;
    loop {
        let (ai, ar) = an.div_mod_floor(&ad);
        let (bi, br) = bn.div_mod_floor(&bd);
        let ord = match ai.cmp(&bi) {
            Ordering::Equal => match (ar.is_zero(), br.is_zero()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => {
                    // continue with the reciprocals of the remainders, in reverse order
                    an = ad;
                    ad = ar;
                    bn = bd;
                    bd = br;
                    reversed = !reversed;
                    continue;
                }
            },
            ord => ord,
        };
        return if reversed { ord.reverse() } else { ord };
    }
}

impl<T: FractionBase> Zero for Fraction<T> {
    #[inline]
    fn zero() -> Self {
        Fraction::new_raw(T::zero(), T::one())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.numer.is_zero() && !self.denom.is_zero()
    }
}

impl<T: FractionBase> One for Fraction<T> {
    #[inline]
    fn one() -> Self {
        Fraction::new_raw(T::one(), T::one())
    }
}

/// Ordering of the values. The indeterminate value is not ordered and all
/// infinities compare equal.
impl<T: FractionBase> PartialOrd for Fraction<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_infinull() || other.is_infinull() {
            return None;
        }
        if self.equals(other) {
            return Some(Ordering::Equal);
        }
        Some(self.cross_cmp(other))
    }
}

impl<T: FractionBase> Neg for Fraction<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fraction::new_raw(-self.numer, self.denom)
    }
}

impl<T: FractionBase> Add for Fraction<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        if self.denom == other.denom {
            return Fraction::new(self.numer + other.numer, self.denom);
        }
        Fraction::new(
            self.numer * other.denom.clone() + other.numer * self.denom.clone(),
            self.denom * other.denom,
        )
    }
}

impl<T: FractionBase> Sub for Fraction<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        if self.denom == other.denom {
            return Fraction::new(self.numer - other.numer, self.denom);
        }
        Fraction::new(
            self.numer * other.denom.clone() - other.numer * self.denom.clone(),
            self.denom * other.denom,
        )
    }
}

impl<T: FractionBase> Mul for Fraction<T> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Fraction::new(self.numer * other.numer, self.denom * other.denom)
    }
}

/// Division never fails, a zero divisor gives the infinity or the indeterminate value
impl<T: FractionBase> Div for Fraction<T> {
    type Output = Self;

    #[inline]
    fn div(self, other: Self) -> Self {
        Fraction::new(self.numer * other.denom, self.denom * other.numer)
    }
}

macro_rules! forward_ref_binop {
    (impl $imp:ident, $method:ident) => {
        impl<'a, T: FractionBase> $imp<&'a Fraction<T>> for Fraction<T> {
            type Output = Fraction<T>;

            #[inline]
            fn $method(self, other: &Fraction<T>) -> Fraction<T> {
                self.$method(other.clone())
            }
        }

        impl<'a, 'b, T: FractionBase> $imp<&'b Fraction<T>> for &'a Fraction<T> {
            type Output = Fraction<T>;

            #[inline]
            fn $method(self, other: &Fraction<T>) -> Fraction<T> {
                self.clone().$method(other.clone())
            }
        }
    };
}

forward_ref_binop!(impl Add, add);
forward_ref_binop!(impl Sub, sub);
forward_ref_binop!(impl Mul, mul);
forward_ref_binop!(impl Div, div);

impl<T: FractionBase> CheckedAdd for Fraction<T> {
    fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.denom == other.denom {
            return Some(Fraction::new(self.numer.checked_add(&other.numer)?, self.denom.clone()));
        }
        let l = self.numer.checked_mul(&other.denom)?;
        let r = other.numer.checked_mul(&self.denom)?;
        Some(Fraction::new(l.checked_add(&r)?, self.denom.checked_mul(&other.denom)?))
    }
}

impl<T: FractionBase> CheckedSub for Fraction<T> {
    fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.denom == other.denom {
            return Some(Fraction::new(self.numer.checked_sub(&other.numer)?, self.denom.clone()));
        }
        let l = self.numer.checked_mul(&other.denom)?;
        let r = other.numer.checked_mul(&self.denom)?;
        Some(Fraction::new(l.checked_sub(&r)?, self.denom.checked_mul(&other.denom)?))
    }
}

impl<T: FractionBase> CheckedMul for Fraction<T> {
    fn checked_mul(&self, other: &Self) -> Option<Self> {
        Some(Fraction::new(
            self.numer.checked_mul(&other.numer)?,
            self.denom.checked_mul(&other.denom)?,
        ))
    }
}

impl<T: FractionBase> CheckedDiv for Fraction<T> {
    fn checked_div(&self, other: &Self) -> Option<Self> {
        Some(Fraction::new(
            self.numer.checked_mul(&other.denom)?,
            self.denom.checked_mul(&other.numer)?,
        ))
    }
}

impl<T: FractionBase> From<T> for Fraction<T> {
    #[inline]
    fn from(n: T) -> Self {
        Fraction::from_integer(n)
    }
}

impl<T: FractionBase> From<Ratio<T>> for Fraction<T> {
    #[inline]
    fn from(r: Ratio<T>) -> Self {
        Fraction::new(r.numer().clone(), r.denom().clone())
    }
}

/// Integers are printed bare, everything else as `numer/denom`
impl<T: fmt::Display + One + PartialEq> fmt::Display for Fraction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

/// Parse `n` or `n/d` into a normalized fraction
impl<T: FractionBase> FromStr for Fraction<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let parse = |t: &str| T::from_str_radix(t.trim(), 10).map_err(|_| Error::Parse(s.to_owned()));
        match s.split_once('/') {
            Some((n, d)) => Ok(Fraction::new(parse(n)?, parse(d)?)),
            None => Ok(Fraction::from_integer(parse(s)?)),
        }
    }
}

impl<T: FractionBase> ToPrimitive for Fraction<T> {
    fn to_i64(&self) -> Option<i64> {
        self.trunc()?.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc()?.to_u64()
    }

    /// Quotient of the parts as doubles. Parts beyond the range of a double
    /// are scaled down together first.
    fn to_f64(&self) -> Option<f64> {
        let mut numer = self.numer.clone();
        let mut denom = self.denom.clone();
        loop {
            let (n, d) = (numer.to_f64()?, denom.to_f64()?);
            if n.is_finite() && d.is_finite() {
                return Some(n / d);
            }
            let scale = T::from_u128(1 << 100)?;
            numer = numer / scale.clone();
            denom = denom / scale;
        }
    }
}
