//! Fractions over [BigInteger].
//!
//! Besides the generic operations of [Fraction], big fractions can be built
//! from doubles through continued fractions and from factorials, and can be
//! narrowed back to [Rat].

use crate::bigint::BigInteger;
use crate::fraction::{Fraction, Node};
use crate::rat::Rat;
use crate::traits::FractionBase;
use log::debug;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

pub type BigRat = Fraction<BigInteger>;

/// Tolerance of the continued fraction conversion from doubles
const EPSILON: f64 = 2e-16;

const PI_NUMER: &str = "3141592653589793238462643383279502884197169399375105820974944592307816406286208998628034825342117067982148086513282306647093844609550582231725359408128481117450284102701938521105559644622948954930381964428810975665933446128475648233786783165271201909145648566923460348610454326648213393607260249141273724587";
const PI_DENOM: &str = "1000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000";

/// π to 306 decimal places
pub fn pi() -> BigRat {
    match (BigInteger::parse(PI_NUMER), BigInteger::parse(PI_DENOM)) {
        (Ok(numer), Ok(denom)) => BigRat::new(numer, denom),
        _ => BigRat::infinull(),
    }
}

/// Integer part of a finite double
fn truncated(x: f64) -> BigInteger {
    BigInteger::from_f64(x).unwrap_or_else(BigInteger::zero)
}

/// The exact value of the shortest decimal rendering of `x`
fn from_decimal_digits(x: f64) -> Option<BigRat> {
    let s = x.to_string();
    let (int, frac) = s.split_once('.')?;
    let numer = BigInteger::parse(&format!("{}{}", int, frac)).ok()?;
    let denom = BigInteger::one().exp10(frac.len() as i64).ok()?;
    Some(BigRat::new(numer, denom))
}

/// Convert a double by expanding it into a continued fraction.
///
/// The expansion stops once a convergent is within `2e-16` of `x`. When the
/// floating point expansion terminates before that, the decimal digits of
/// `x` are taken literally. Every infinity maps to `1/0` and NaN to `0/0`.
pub fn from_decimal(x: f64) -> BigRat {
    if x.is_nan() {
        return BigRat::infinull();
    }
    if x.is_infinite() {
        return BigRat::infinity();
    }
    if x.abs() < EPSILON {
        return BigRat::zero();
    }
    if (x - 1.).abs() < EPSILON {
        return BigRat::one();
    }
    if x.fract().abs() < EPSILON {
        return BigRat::from_integer(truncated(x));
    }
    let inv = 1. / x;
    if inv.fract().abs() < EPSILON {
        return BigRat::from_integer_inverse(truncated(inv.round()));
    }

    let mut block = Node::identity();
    let mut out = BigRat::one();
    let mut test = x;
    let mut loops = BigInteger::MAX_LOOPS;
    while (x - out.to_f64().unwrap_or(f64::NAN)).abs() > EPSILON {
        if loops == 0 {
            debug!("decimal conversion of {} stopped at {}", x, out);
            break;
        }
        loops -= 1;

        let ip = test.floor();
        let (p, q) = block.rmove(truncated(ip));
        out = Fraction::new_raw(p.clone(), q.clone());

        let diff = test - ip;
        if diff == 0. {
            if out.to_f64() != Some(x) {
                out = from_decimal_digits(x).unwrap_or(out);
            }
            break;
        }
        test = 1. / diff;
        block.update(p, q);
    }
    out
}

impl Fraction<BigInteger> {
    /// `n!` as a fraction
    pub fn from_factorial(n: u32) -> Self {
        let f = (2..=n).fold(BigInteger::one(), |acc, k| acc * BigInteger::from(k));
        Fraction::from_integer(f)
    }

    /// Narrow to native integers, `None` if a component does not fit
    pub fn to_rat(&self) -> Option<Rat> {
        Some(Rat::new_raw(self.numer().to_i64()?, self.denom().to_i64()?))
    }
}

impl From<Rat> for BigRat {
    fn from(r: Rat) -> Self {
        let (numer, denom) = r.into_raw();
        Fraction::new_raw(BigInteger::from(numer), BigInteger::from(denom))
    }
}
