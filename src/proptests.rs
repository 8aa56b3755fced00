//! Property-based tests for the integer engine and the fraction type.

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::integer::gcd;
    use crate::{BigInteger, Rat};

    // Strategy for generating integers spanning a few digit groups
    fn wide_int() -> impl Strategy<Value = i128> {
        prop_oneof![-1_000_000i128..1_000_000i128, any::<i64>().prop_map(i128::from)]
    }

    // Strategy for generating non-zero divisors
    fn non_zero_int() -> impl Strategy<Value = i128> {
        wide_int().prop_filter("divisor must not be zero", |v| *v != 0)
    }

    // Strategy for generating decimal literals of many digit groups
    fn long_literal() -> impl Strategy<Value = String> {
        "-?[1-9][0-9]{0,80}"
    }

    fn small_int() -> impl Strategy<Value = i64> {
        -1_000_000i64..1_000_000i64
    }

    proptest! {
        #[test]
        fn division_identity(a in wide_int(), b in non_zero_int()) {
            let x = BigInteger::from(a);
            let y = BigInteger::from(b);
            let q = x.quotient(&y).unwrap();
            let r = x.remainder(&y).unwrap();
            prop_assert_eq!(&y * &q + &r, x.clone());
            prop_assert_eq!(q, BigInteger::from(a / b));
            prop_assert_eq!(r, BigInteger::from(a % b));
        }

        #[test]
        fn square_is_self_product(a in wide_int()) {
            let x = BigInteger::from(a);
            let y = x.clone();
            prop_assert_eq!(x.square(), &x * &y);
            prop_assert_eq!(x.square(), BigInteger::from(a.unsigned_abs().pow(2)));
        }

        #[test]
        fn arithmetic_matches_reference(a in long_literal(), b in long_literal()) {
            let (x, y): (BigInteger, BigInteger) = (a.parse().unwrap(), b.parse().unwrap());
            let (rx, ry): (BigInt, BigInt) = (a.parse().unwrap(), b.parse().unwrap());

            prop_assert_eq!((&x + &y).to_string(), (&rx + &ry).to_string());
            prop_assert_eq!((&x - &y).to_string(), (&rx - &ry).to_string());
            prop_assert_eq!((&x * &y).to_string(), (&rx * &ry).to_string());

            let (q, r) = x.div_rem(&y).unwrap();
            prop_assert_eq!(q.to_string(), (&rx / &ry).to_string());
            prop_assert_eq!(r.to_string(), (&rx % &ry).to_string());
        }

        #[test]
        fn long_division_identity(a in long_literal(), b in long_literal()) {
            let x: BigInteger = a.parse().unwrap();
            let y: BigInteger = b.parse().unwrap();
            let (q, r) = x.div_rem(&y).unwrap();
            prop_assert_eq!(&y * &q + &r, x);
            prop_assert!(r.is_zero() || r.compare_abs(&y) == core::cmp::Ordering::Less);
        }

        #[test]
        fn normalize_is_idempotent(n in small_int(), d in small_int()) {
            let once = Rat::new_raw(n, d).normalize();
            prop_assert_eq!(once.clone().normalize(), once);
        }

        #[test]
        fn normalized_terms_are_coprime(n in small_int(), d in small_int()) {
            let r = Rat::new(n, d);
            if r.is_finite() && !r.numer().is_zero() {
                prop_assert_eq!(gcd(r.numer().abs(), *r.denom()), 1);
                prop_assert!(*r.denom() > 0);
            }
        }

        #[test]
        fn continued_fraction_round_trip(n in small_int(), d in small_int()) {
            let r = Rat::new(n, d);
            prop_assume!(r.is_finite());
            let terms = r.to_continued_fraction();
            prop_assert_eq!(Rat::from_continued_fraction(&terms), r);
        }

        #[test]
        fn decimal_walk_finds_small_fractions(n in -1000i64..1000, d in 1i64..1000) {
            let r = Rat::new(n, d);
            let x = n as f64 / d as f64;
            prop_assert_eq!(Rat::from_f64(x).value(), r);
        }
    }
}
