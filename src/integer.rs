//! Integer helpers shared by the native fraction type

use num_integer::Integer;

/// Greatest common divisor by the Euclidean algorithm.
///
/// Returns one right away if either side is one. The sign of the result
/// follows the remainder chain, pass absolute values for a canonical divisor.
pub fn gcd<T: Integer + Clone>(a: T, b: T) -> T {
    if a.is_one() || b.is_one() {
        return T::one();
    }
    let (mut a, mut b) = (a, b);
    while !b.is_zero() {
        let t = b.clone();
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_test() {
        assert_eq!(gcd(560501559i64, 132746685), 69);
        assert_eq!(gcd(360, 666), 18);
        assert_eq!(gcd(420, 666), 6);
        assert_eq!(gcd(8123215, 1923865), 5);
        assert_eq!(gcd(7, 7), 7);
        assert_eq!(gcd(1, 0), 1);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(gcd(12i128, 0), 12);
    }
}
