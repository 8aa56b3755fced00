//! Fractions over native 64-bit integers.
//!
//! Products of large components can overflow. The searches detect this and
//! stop with their best candidate, use [crate::BigRat] when the operands may
//! be large.

use crate::fraction::Fraction;

pub type Rat = Fraction<i64>;

/// The closest approximation of π with a denominator below 10^12
pub fn pi() -> Rat {
    Rat::new_raw(1320192667429, 420230377710)
}

/// Convert a double through a walk of the Stern-Brocot tree, the best
/// candidate is returned when the walk does not converge
#[inline]
pub fn from_decimal(x: f64) -> Rat {
    Rat::from_f64(x).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::gcd;
    use num_traits::{One, ToPrimitive, Zero};

    #[test]
    fn constants_test() {
        assert_eq!(Rat::zero().to_string(), "0");
        assert_eq!(Rat::one().to_string(), "1");
        assert_eq!(Rat::neg_one().to_string(), "-1");
        assert_eq!(Rat::infinity().to_string(), "1/0");
        assert_eq!(Rat::infinull().to_string(), "0/0");
        assert_eq!(pi().to_f64(), Some(std::f64::consts::PI));
        assert_eq!(gcd(*pi().numer(), *pi().denom()), 1);
    }

    #[test]
    fn divide_by_zero_test() {
        assert_eq!(Rat::one() / Rat::zero(), Rat::infinity());
        assert!((Rat::zero() / Rat::zero()).is_infinull());
        assert!((Rat::new(-3, 4) / Rat::zero()).is_infinity());
    }

    #[test]
    fn from_decimal_test() {
        assert_eq!(from_decimal(1. / 7.).to_string(), "1/7");
        assert_eq!(from_decimal(1. / 107.).to_string(), "1/107");
        assert_eq!(from_decimal(69. / 256.).to_f64(), Some(69. / 256.));
        assert_eq!(from_decimal(0.1).to_string(), "1/10");
        assert_eq!(from_decimal(100000.000001).to_f64(), Some(100000.000001));
        assert_eq!(from_decimal(420.00000069).to_f64(), Some(420.00000069));
    }

    #[test]
    fn scenario_test() {
        assert_eq!(Rat::new(-1, 6).to_string(), "-1/6");
        assert_eq!(Rat::new(-2734593, 72 * 2734593).to_string(), "-1/72");
        assert_eq!(Rat::new(17, 360).to_egyptian(), "1/22 + 1/566 + 1/1120680");
        assert_eq!(Rat::new(1, 2).sin().to_string(), "4/5");
        assert!(Rat::new(5, 0).equals(&Rat::new(1, 0)));
        assert!(Rat::new(0, 0).equals(&Rat::new(0, 7)));
    }

    #[test]
    fn root_of_inverse_square_test() {
        let t = Rat::from_integer(2).pow(-2);
        assert_eq!(t, Rat::new(1, 4));
        assert_eq!(t.sqrt(), Rat::new(1, 2));
        assert_eq!(t.sqrt().sqrt().to_f64().map(|v| (v - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-15), Some(true));
    }
}
