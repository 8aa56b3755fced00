//! String renderings: Egyptian sums, sexagesimal expansions and a
//! diagnostic dump. The sums are written so that a calculator can evaluate them.

use super::Fraction;
use crate::traits::FractionBase;
use core::fmt::Write;
use log::debug;
use num_traits::{CheckedSub, ToPrimitive};

/// Join the terms of a positive rendering, prefixing the sign of a negative value
fn signed_sum(terms: Vec<String>, negative: bool) -> String {
    let sum = terms.join(" + ");
    match (negative, terms.len()) {
        (false, _) | (_, 0) => sum,
        (true, 1) => format!("-{}", sum),
        (true, _) => format!("-({})", sum),
    }
}

/// Continued fraction terms in the `[a0; a1, a2, ...]` notation
fn format_terms<T: core::fmt::Display>(terms: &[T]) -> String {
    let mut s = String::from("[");
    for (i, t) in terms.iter().enumerate() {
        match i {
            0 => write!(s, "{}", t),
            1 => write!(s, "; {}", t),
            _ => write!(s, ", {}", t),
        }
        .ok();
    }
    s.push(']');
    s
}

impl<T: FractionBase> Fraction<T> {
    /// Render as the integer part followed by a greedy sum of distinct unit
    /// fractions, for example `17/360` gives `1/22 + 1/566 + 1/1120680`.
    pub fn to_egyptian(&self) -> String {
        if !self.is_finite() || self.numer.is_zero() {
            return self.to_string();
        }

        let t = self.abs();
        let (int, numer) = t.numer.div_mod_floor(&t.denom);
        let mut terms = Vec::new();
        if !int.is_zero() {
            terms.push(int.to_string());
        }

        let mut rest = Fraction::new(numer, t.denom);
        while !rest.numer.is_zero() && !rest.numer.is_one() {
            // the largest unit fraction below the remainder
            let d = rest.denom.clone() / rest.numer.clone() + T::one();
            let unit = Fraction::new_raw(T::one(), d);
            match rest.checked_sub(&unit) {
                Some(next) => {
                    terms.push(unit.to_string());
                    rest = next;
                }
                None => {
                    debug!("egyptian sum of {} overflowed at remainder {}", self, rest);
                    break;
                }
            }
        }
        if !rest.numer.is_zero() {
            terms.push(rest.to_string());
        }

        signed_sum(terms, self.is_negative())
    }

    /// Render as a sum of sexagesimal digits `d * 60^p`, highest power first.
    ///
    /// Zero digits are skipped. A repeating expansion stops after its first
    /// period and ends with `+ ...`, as does an expansion longer than the
    /// iteration ceiling of the ring.
    pub fn to_babylonian(&self) -> String {
        if !self.is_finite() {
            return self.to_string();
        }

        let one = T::one();
        let two = one.clone() + one.clone();
        let three = two.clone() + one.clone();
        let five = three.clone() + two.clone();
        let sixty = two.clone() * two.clone() * three.clone() * five.clone();

        let t = self.abs();
        let (mut int, mut rem) = t.numer.div_mod_floor(&t.denom);
        let den = t.denom;

        let mut terms = Vec::new();
        let mut p = 0i64;
        while !int.is_zero() {
            let (q, d) = int.div_mod_floor(&sixty);
            if !d.is_zero() {
                terms.push(format!("{} * 60^{}", d, p));
            }
            int = q;
            p += 1;
        }
        terms.reverse();

        // digits before the expansion turns periodic, from the factors of 60
        let preperiod = {
            let mut d = den.clone();
            let mut count = |f: &T| {
                let mut e = 0u64;
                while !d.is_zero() && d.is_multiple_of(f) {
                    d = d.clone() / f.clone();
                    e += 1;
                }
                e
            };
            let e2 = count(&two);
            let e3 = count(&three);
            let e5 = count(&five);
            ((e2 + 1) / 2).max(e3).max(e5)
        };

        let mut periodic = false;
        let mut start: Option<T> = None;
        let mut digits = 0u64;
        p = -1;
        while !rem.is_zero() {
            if digits == preperiod {
                start = Some(rem.clone());
            } else if digits > preperiod && start.as_ref() == Some(&rem) {
                periodic = true;
                break;
            }
            if digits >= T::MAX_LOOPS {
                debug!("babylonian expansion of {} stopped after {} digits", self, digits);
                periodic = true;
                break;
            }

            let scaled = match rem.checked_mul(&sixty) {
                Some(v) => v,
                None => {
                    debug!("babylonian expansion of {} overflowed", self);
                    periodic = true;
                    break;
                }
            };
            let (d, r) = scaled.div_mod_floor(&den);
            if !d.is_zero() {
                terms.push(format!("{} * 60^{}", d, p));
            }
            rem = r;
            digits += 1;
            p -= 1;
        }

        if terms.is_empty() {
            return String::from("0");
        }
        if periodic {
            terms.push(String::from("..."));
        }
        signed_sum(terms, self.is_negative())
    }

    /// Multi-line summary of the value, its decimal approximation, its
    /// continued fraction and its path in the Stern-Brocot tree
    pub fn dump(&self) -> String {
        format!(
            "{}\n~\t{}\nCF:\t{}\nSB:\t{}\n",
            self,
            self.to_f64().unwrap_or(f64::NAN),
            format_terms(&self.to_continued_fraction()),
            self.trace_stern_brocot()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    type R = Fraction<i64>;

    #[test]
    fn egyptian_test() {
        assert_eq!(R::new(17, 360).to_egyptian(), "1/22 + 1/566 + 1/1120680");
        assert_eq!(R::new(2, 3).to_egyptian(), "1/2 + 1/6");
        assert_eq!(R::new(5, 2).to_egyptian(), "2 + 1/2");
        assert_eq!(R::new(1, 7).to_egyptian(), "1/7");
        assert_eq!(R::from_integer(3).to_egyptian(), "3");
        assert_eq!(R::new(-1, 7).to_egyptian(), "-1/7");
        assert_eq!(R::new(-2, 3).to_egyptian(), "-(1/2 + 1/6)");
        assert_eq!(R::zero().to_egyptian(), "0");
        assert_eq!(R::infinity().to_egyptian(), "1/0");
    }

    #[test]
    fn babylonian_test() {
        assert_eq!(
            R::new(181237, 10).to_babylonian(),
            "5 * 60^2 + 2 * 60^1 + 3 * 60^0 + 42 * 60^-1"
        );
        assert_eq!(
            R::new(1, 7).to_babylonian(),
            "8 * 60^-1 + 34 * 60^-2 + 17 * 60^-3 + ..."
        );
        assert_eq!(R::new(1, 2).to_babylonian(), "30 * 60^-1");
        assert_eq!(R::from_integer(60).to_babylonian(), "1 * 60^1");
        assert_eq!(R::new(1, 3600).to_babylonian(), "1 * 60^-2");
        assert_eq!(R::new(-3, 2).to_babylonian(), "-(1 * 60^0 + 30 * 60^-1)");
        assert_eq!(R::zero().to_babylonian(), "0");
        // 1/120 ends right after its second digit
        assert_eq!(R::new(1, 120).to_babylonian(), "30 * 60^-2");
        // 1/14 repeats from the second digit on
        assert_eq!(
            R::new(1, 14).to_babylonian(),
            "4 * 60^-1 + 17 * 60^-2 + 8 * 60^-3 + 34 * 60^-4 + ..."
        );
    }

    #[test]
    fn dump_test() {
        assert_eq!(R::new(45, 16).dump(), "45/16\n~\t2.8125\nCF:\t[2; 1, 4, 3]\nSB:\tR2 L R4 L2\n");
        assert_eq!(format_terms(&[3]), "[3]");
    }
}
