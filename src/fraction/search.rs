//! Searches over the Stern-Brocot tree.
//!
//! Every fraction in lowest terms appears exactly once in the tree, as the
//! mediant of its two nearest ancestors. A [Node] keeps these ancestors and
//! walks down toward a target, which gives root finding, decimal conversion,
//! continued fraction expansion and path tracing from the same primitive.

use super::Fraction;
use crate::traits::{Approximation, FractionBase};
use core::mem::swap;
use log::{debug, trace};
use num_traits::{One, ToPrimitive, Zero};

/// Tunables of the tree searches
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig<T> {
    /// Iteration ceiling, reaching it yields the best candidate so far
    pub max_loops: u64,
    /// Two values closer than `1 / precision` approximate each other
    pub precision: T,
}

impl<T: FractionBase> Default for SearchConfig<T> {
    fn default() -> Self {
        SearchConfig {
            max_loops: T::MAX_LOOPS,
            precision: T::infinitesimal_precision(),
        }
    }
}

impl<T> SearchConfig<T> {
    pub fn with_max_loops(mut self, max_loops: u64) -> Self {
        self.max_loops = max_loops;
        self
    }

    pub fn with_precision(mut self, precision: T) -> Self {
        self.precision = precision;
        self
    }
}

/// A node of the Stern-Brocot tree, stored as the homographic block of its
/// two bounding ancestors.
///
/// `pm1/qm1` is the upper ancestor and `pm2/qm2` the lower one, the node
/// itself is their mediant. In continued fraction terms the block holds the
/// last two convergents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<T> {
    pm1: T, // p_(k-1)
    pm2: T, // p_(k-2)
    qm1: T, // q_(k-1)
    qm2: T, // q_(k-2)
}

impl<T> Node<T> {
    /// Push the latest convergent to the block
    pub fn update(&mut self, p: T, q: T) {
        swap(&mut self.pm2, &mut self.pm1); // self.pm2 = self.pm1
        swap(&mut self.qm2, &mut self.qm1); // self.qm2 = self.qm1
        self.pm1 = p;
        self.qm1 = q;
    }
}

impl<T: Zero + One> Node<T> {
    /// The root of the tree, bounded by `1/0` above and `0/1` below
    pub fn identity() -> Self {
        Node { pm1: T::one(), pm2: T::zero(), qm1: T::zero(), qm2: T::one() }
    }
}

impl<T: FractionBase> Node<T> {
    /// Move with a coefficient of a regular continued fraction
    pub fn rmove(&self, a: T) -> (T, T) {
        let p = a.clone() * self.pm1.clone() + self.pm2.clone();
        let q = a * self.qm1.clone() + self.qm2.clone();
        (p, q)
    }

    pub fn checked_rmove(&self, a: &T) -> Option<(T, T)> {
        let p = a.checked_mul(&self.pm1).and_then(|v| v.checked_add(&self.pm2))?;
        let q = a.checked_mul(&self.qm1).and_then(|v| v.checked_add(&self.qm2))?;
        Some((p, q))
    }

    /// The fraction at this node, already in lowest terms
    pub fn checked_mediant(&self) -> Option<Fraction<T>> {
        Some(Fraction::new_raw(
            self.pm1.checked_add(&self.pm2)?,
            self.qm1.checked_add(&self.qm2)?,
        ))
    }

    /// Descend to the left child, the node becomes the upper ancestor
    pub fn checked_left(&mut self) -> Option<()> {
        let p = self.pm1.checked_add(&self.pm2)?;
        let q = self.qm1.checked_add(&self.qm2)?;
        self.pm1 = p;
        self.qm1 = q;
        Some(())
    }

    /// Descend to the right child, the node becomes the lower ancestor
    pub fn checked_right(&mut self) -> Option<()> {
        let p = self.pm2.checked_add(&self.pm1)?;
        let q = self.qm2.checked_add(&self.qm1)?;
        self.pm2 = p;
        self.qm2 = q;
        Some(())
    }
}

/// Iterator over the convergents of a fraction
pub struct Convergents<T> {
    coeffs: std::vec::IntoIter<T>,
    block: Node<T>,
    neg: bool, // store the sign
}

impl<T: FractionBase> Iterator for Convergents<T> {
    type Item = Fraction<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let a = self.coeffs.next()?;
        let (p, q) = self.block.checked_rmove(&a)?;
        self.block.update(p.clone(), q.clone());

        let r = Fraction::new_raw(p, q);
        if self.neg {
            Some(-r)
        } else {
            Some(r)
        }
    }
}

impl<T: FractionBase> Fraction<T> {
    /// The n-th root with the default search tunables of the ring
    #[inline]
    pub fn nth_root(&self, n: u32) -> Self {
        self.nth_root_with(n, &SearchConfig::default()).value()
    }

    #[inline]
    pub fn sqrt(&self) -> Self {
        self.nth_root(2)
    }

    /// Search the tree for a fraction whose n-th power approximates this value.
    ///
    /// Negative values are searched by magnitude and the root is negated for
    /// odd `n` only, so an even root of a negative value approximates the root
    /// of its magnitude. The result is exact only when the power of the root
    /// equals the value.
    pub fn nth_root_with(&self, n: u32, config: &SearchConfig<T>) -> Approximation<Self> {
        if self.is_infinull() || n == 0 {
            return Approximation::Exact(Self::infinull());
        }
        if self.numer.is_zero() {
            return Approximation::Exact(Self::zero());
        }
        if self.is_infinity() {
            return Approximation::Exact(Self::infinity());
        }
        if self.is_one() {
            return Approximation::Exact(Self::one());
        }

        let target = self.abs();
        let mut node: Node<T> = Node::identity();
        let mut root = Self::one();
        let mut test = Self::one();
        let mut loops = config.max_loops;
        while !target.approximates_within(&test, &config.precision) {
            if loops == 0 {
                debug!("root search of {} stopped after {} loops at {}", self, config.max_loops, root);
                break;
            }
            loops -= 1;

            let moved = if target.is_less_than(&test) { node.checked_left() } else { node.checked_right() };
            let next = moved.and_then(|_| {
                let r = node.checked_mediant()?;
                let t = Fraction::new_raw(r.numer.checked_pow(n)?, r.denom.checked_pow(n)?);
                Some((r, t))
            });
            match next {
                Some((r, t)) => {
                    root = r;
                    test = t;
                }
                None => {
                    debug!("root search of {} overflowed at {}", self, root);
                    break;
                }
            }
        }

        let exact = test.equals(&target);
        if self.is_negative() && n % 2 == 1 {
            root = -root;
        }
        if exact {
            Approximation::Exact(root)
        } else {
            Approximation::Approximated(root)
        }
    }

    /// Convert a double with the default iteration ceiling of the ring
    #[inline]
    pub fn from_f64(x: f64) -> Approximation<Self> {
        Self::from_f64_with(x, T::MAX_LOOPS)
    }

    /// Find the simplest fraction whose decimal value is `x`.
    ///
    /// The tree is walked toward `|x|` until the candidate converts back to
    /// exactly `|x|`. Zero, one, the infinities, NaN, integers and unit
    /// fractions skip the walk. Every infinity maps to `1/0` and NaN maps to
    /// `0/0`.
    pub fn from_f64_with(x: f64, max_loops: u64) -> Approximation<Self> {
        if x == 0. {
            return Approximation::Exact(Self::zero());
        }
        if x == 1. {
            return Approximation::Exact(Self::one());
        }
        if x.is_infinite() {
            return Approximation::Exact(Self::infinity());
        }
        if x.is_nan() {
            return Approximation::Exact(Self::infinull());
        }
        if x.fract() == 0. {
            return match T::from_f64(x) {
                Some(n) => Approximation::Exact(Self::from_integer(n)),
                None => Approximation::Approximated(Self::infinity()),
            };
        }
        let inv = 1. / x;
        if inv.fract() == 0. {
            return match T::from_f64(inv) {
                Some(n) => {
                    let r = Self::from_integer_inverse(n);
                    if r.to_f64() == Some(x) {
                        Approximation::Exact(r)
                    } else {
                        Approximation::Approximated(r)
                    }
                }
                None => Approximation::Approximated(Self::zero()),
            };
        }

        let a = x.abs();
        let mut node = Node::identity();
        let mut out = Self::one();
        let mut loops = max_loops;
        let mut exact = true;
        loop {
            let value = out.to_f64().unwrap_or(f64::INFINITY);
            if value == a {
                break;
            }
            if loops == 0 {
                debug!("conversion of {} stopped after {} loops at {}", x, max_loops, out);
                exact = false;
                break;
            }
            loops -= 1;

            let moved = if value > a { node.checked_left() } else { node.checked_right() };
            match moved.and_then(|_| node.checked_mediant()) {
                Some(next) => out = next,
                None => {
                    debug!("conversion of {} overflowed at {}", x, out);
                    exact = false;
                    break;
                }
            }
        }

        if x < 0. {
            out = -out;
        }
        if exact {
            Approximation::Exact(out)
        } else {
            Approximation::Approximated(out)
        }
    }

    /// Continued fraction terms with the trace ceiling of the ring
    #[inline]
    pub fn to_continued_fraction(&self) -> Vec<T> {
        self.to_continued_fraction_with_limit(T::TRACE_LOOPS)
    }

    /// Expand into continued fraction terms by walking down the tree, each
    /// term being the length of a run in one direction.
    ///
    /// `1/0` expands to `[1, 0]` and `0/0` to `[0, 0]`. An expansion cut by
    /// the loop limit ends with an extra `0`. All terms of a negative value
    /// are negated.
    pub fn to_continued_fraction_with_limit(&self, limit: u64) -> Vec<T> {
        if self.is_infinull() {
            return vec![T::zero(), T::zero()];
        }
        if self.numer.is_zero() {
            return vec![T::zero()];
        }
        if self.is_infinity() {
            return vec![T::one(), T::zero()];
        }
        if self.is_one() {
            return vec![T::one()];
        }
        if self.equals(&Self::neg_one()) {
            return vec![-T::one()];
        }

        let target = self.abs();
        let mut node = Node::identity();
        let mut test = Self::one();
        let mut right = true;
        let mut result = vec![T::zero()];
        let mut loops = limit;
        let mut complete = true;
        while !target.equals(&test) {
            if loops == 0 {
                complete = false;
                break;
            }
            loops -= 1;

            let go_left = target.is_less_than(&test);
            if go_left == right {
                right = !right;
                result.push(T::one());
            } else if let Some(last) = result.last_mut() {
                *last = last.clone() + T::one();
            }

            let moved = if go_left { node.checked_left() } else { node.checked_right() };
            match moved.and_then(|_| node.checked_mediant()) {
                Some(next) => test = next,
                None => {
                    debug!("expansion of {} overflowed after {} terms", self, result.len());
                    complete = false;
                    break;
                }
            }
        }

        if complete {
            if let Some(last) = result.last_mut() {
                *last = last.clone() + T::one();
            }
        } else {
            trace!("expansion of {} truncated", self);
            result.push(T::zero());
        }

        if self.is_negative() {
            result.into_iter().map(|t| -t).collect()
        } else {
            result
        }
    }

    /// Fold continued fraction terms back into a fraction, no terms give `0/0`
    pub fn from_continued_fraction(terms: &[T]) -> Self {
        let (last, rest) = match terms.split_last() {
            Some(split) => split,
            None => return Self::infinull(),
        };
        rest.iter().rev().fold(Self::from_integer(last.clone()), |acc, t| {
            Self::from_integer(t.clone()) + acc.recip()
        })
    }

    /// Path from the root of the tree down to this value, with the trace
    /// ceiling of the ring
    #[inline]
    pub fn trace_stern_brocot(&self) -> String {
        self.trace_stern_brocot_with_limit(T::TRACE_LOOPS)
    }

    /// Path from the root of the tree down to the magnitude of this value.
    ///
    /// Runs are written as `L` or `R` followed by their length when it is not
    /// one, separated by spaces. A path cut by the loop limit ends in `...`.
    /// Zero, one, `1/0` and `0/0` have an empty path.
    pub fn trace_stern_brocot_with_limit(&self, limit: u64) -> String {
        let mut path = String::new();
        if self.numer.is_zero() || self.denom.is_zero() || self.is_one() {
            return path;
        }

        let target = self.abs();
        let mut node = Node::identity();
        let mut test = Self::one();
        let (mut l_streak, mut r_streak) = (0u64, 0u64);
        let mut loops = limit;
        let mut complete = true;

        fn push_run(path: &mut String, dir: char, streak: u64) {
            path.push(dir);
            if streak != 1 {
                path.push_str(&streak.to_string());
            }
        }

        while !target.equals(&test) {
            if loops == 0 {
                complete = false;
                break;
            }
            loops -= 1;

            let moved = if target.is_less_than(&test) {
                l_streak += 1;
                if r_streak > 0 {
                    push_run(&mut path, 'R', r_streak);
                    path.push(' ');
                    r_streak = 0;
                }
                node.checked_left()
            } else {
                r_streak += 1;
                if l_streak > 0 {
                    push_run(&mut path, 'L', l_streak);
                    path.push(' ');
                    l_streak = 0;
                }
                node.checked_right()
            };
            match moved.and_then(|_| node.checked_mediant()) {
                Some(next) => test = next,
                None => {
                    debug!("trace of {} overflowed", self);
                    complete = false;
                    break;
                }
            }
        }

        if l_streak > 0 {
            push_run(&mut path, 'L', l_streak);
        } else if r_streak > 0 {
            push_run(&mut path, 'R', r_streak);
        }
        if !complete {
            path.push_str("...");
        }
        path
    }

    /// Convergents of the continued fraction expansion, none for `1/0` and `0/0`
    pub fn convergents(&self) -> Convergents<T> {
        let mut coeffs = if self.is_finite() { self.to_continued_fraction() } else { Vec::new() };
        if coeffs.len() > 1 && coeffs.last().map_or(false, |t| t.is_zero()) {
            coeffs.pop();
        }
        Convergents {
            coeffs: coeffs.into_iter().map(|t| t.abs()).collect::<Vec<_>>().into_iter(),
            block: Node::identity(),
            neg: self.is_negative(),
        }
    }

    /// The closest convergent with a denominator not larger than `limit`
    pub fn approximated(&self, limit: &T) -> Approximation<Self> {
        if !self.is_finite() || &self.denom <= limit {
            return Approximation::Exact(self.clone());
        }
        let mut best = Self::infinull();
        for conv in self.convergents() {
            if &conv.denom > limit {
                break;
            }
            best = conv;
        }
        Approximation::Approximated(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = Fraction<i64>;

    #[test]
    fn node_test() {
        let mut node = Node::<i64>::identity();
        assert_eq!(node.checked_mediant(), Some(R::one()));
        node.checked_right().unwrap();
        node.checked_left().unwrap();
        assert_eq!(node.checked_mediant(), Some(R::new(3, 2)));

        let mut block = Node::<i64>::identity();
        let (p, q) = block.rmove(2);
        block.update(p, q);
        assert_eq!(block.checked_rmove(&3), Some((7, 3)));

        let mut edge = Node { pm1: i64::MAX, pm2: 0, qm1: 1, qm2: 1 };
        assert_eq!(edge.checked_right(), Some(()));
        assert_eq!(edge.checked_left(), None);
    }

    #[test]
    fn nth_root_test() {
        assert_eq!(R::from_integer(4).sqrt(), R::from_integer(2));
        assert_eq!(R::from_integer(25).sqrt(), R::from_integer(5));
        assert_eq!(R::new(1, 100).sqrt(), R::new(1, 10));
        assert_eq!(R::new(12167, 729).nth_root(3), R::new(23, 9));
        assert_eq!(R::new(-8, 27).nth_root(3), R::new(-2, 3));
        assert_eq!(R::new(-4, 9).sqrt(), R::new(2, 3));
        assert!(R::new(4, 9).nth_root_with(2, &SearchConfig::default()).is_exact());

        let root2 = R::from_integer(2).nth_root_with(2, &SearchConfig::default());
        assert!(!root2.is_exact());
        let v = root2.value().to_f64().unwrap();
        assert!((v - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn nth_root_sentinel_test() {
        assert_eq!(R::zero().sqrt(), R::zero());
        assert_eq!(R::one().sqrt(), R::one());
        assert_eq!(R::infinity().sqrt(), R::infinity());
        assert!(R::infinull().sqrt().is_infinull());
        assert!(R::from_integer(2).nth_root(0).is_infinull());
        assert_eq!(R::neg_one().nth_root(3), R::neg_one());
    }

    #[test]
    fn nth_root_config_test() {
        let config = SearchConfig::default().with_max_loops(3);
        assert_eq!(
            R::from_integer(100).nth_root_with(2, &config),
            Approximation::Approximated(R::from_integer(4))
        );
        let loose = SearchConfig::default().with_precision(10);
        let r = R::from_integer(2).nth_root_with(2, &loose).value();
        assert!(r.denom() < &10);
    }

    #[test]
    fn from_f64_test() {
        assert_eq!(R::from_f64(1. / 7.).value().to_string(), "1/7");
        assert_eq!(R::from_f64(1. / 49.).value().to_string(), "1/49");
        assert_eq!(R::from_f64(1. / 98.).value().to_string(), "1/98");
        assert_eq!(R::from_f64(1. / 103.).value().to_string(), "1/103");
        assert_eq!(R::from_f64(1. / 107.).value().to_string(), "1/107");
        assert_eq!(R::from_f64(-1. / 2.).value().to_string(), "-1/2");
        assert_eq!(R::from_f64(-1. / 101.).value().to_string(), "-1/101");
        assert_eq!(R::from_f64(1. / -100001.).value().to_string(), "-1/100001");
        assert_eq!(R::from_f64(611951. / 611953.).value().to_string(), "611951/611953");
        assert_eq!(R::from_f64(-611953. / 611951.).value().to_string(), "-611953/611951");
        assert_eq!(R::from_f64(0.3), Approximation::Exact(R::new(3, 10)));

        for x in &[69. / 256., 169. / 256., -420. / 666., std::f64::consts::PI, std::f64::consts::E] {
            assert_eq!(R::from_f64(*x).value().to_f64(), Some(*x));
        }
    }

    #[test]
    fn from_f64_special_test() {
        assert_eq!(R::from_f64(0.), Approximation::Exact(R::zero()));
        assert_eq!(R::from_f64(1.), Approximation::Exact(R::one()));
        assert_eq!(R::from_f64(-42.), Approximation::Exact(R::from_integer(-42)));
        assert_eq!(R::from_f64(f64::INFINITY), Approximation::Exact(R::infinity()));
        assert_eq!(R::from_f64(f64::NEG_INFINITY), Approximation::Exact(R::infinity()));
        assert!(R::from_f64(f64::NAN).value().is_infinull());
        assert_eq!(R::from_f64(1e30), Approximation::Approximated(R::infinity()));
        assert!(R::from_f64_with(1e-10, 100).is_exact());
        assert!(!R::from_f64_with(0.123456789, 100).is_exact());
        assert!(R::from_f64_with(0.123456789, 1 << 20).is_exact());
    }

    #[test]
    fn continued_fraction_test() {
        assert_eq!(R::new(45, 16).to_continued_fraction(), vec![2, 1, 4, 3]);
        assert_eq!(R::new(-16, 45).to_continued_fraction(), vec![0, -2, -1, -4, -3]);
        assert_eq!(R::new(1, 3).to_continued_fraction(), vec![0, 3]);
        assert_eq!(R::zero().to_continued_fraction(), vec![0]);
        assert_eq!(R::one().to_continued_fraction(), vec![1]);
        assert_eq!(R::neg_one().to_continued_fraction(), vec![-1]);
        assert_eq!(R::infinity().to_continued_fraction(), vec![1, 0]);
        assert_eq!(R::infinull().to_continued_fraction(), vec![0, 0]);
        assert_eq!(R::new(45, 16).to_continued_fraction_with_limit(3), vec![2, 1, 0]);

        assert_eq!(R::from_continued_fraction(&[2, 1, 4, 3]), R::new(45, 16));
        assert_eq!(R::from_continued_fraction(&[0, -2, -1, -4, -3]), R::new(-16, 45));
        assert_eq!(R::from_continued_fraction(&[5]), R::from_integer(5));
        assert!(R::from_continued_fraction(&[]).is_infinull());
    }

    #[test]
    fn trace_test() {
        assert_eq!(R::new(45, 16).trace_stern_brocot(), "R2 L R4 L2");
        assert_eq!(R::new(-45, 16).trace_stern_brocot(), "R2 L R4 L2");
        assert_eq!(R::new(1, 3).trace_stern_brocot(), "L2");
        assert_eq!(R::new(3, 2).trace_stern_brocot(), "R L");
        assert_eq!(R::new(45, 16).trace_stern_brocot_with_limit(3), "R2 L...");
        assert_eq!(R::zero().trace_stern_brocot(), "");
        assert_eq!(R::one().trace_stern_brocot(), "");
        assert_eq!(R::infinity().trace_stern_brocot(), "");
        assert_eq!(R::infinull().trace_stern_brocot(), "");
    }

    #[test]
    fn convergents_test() {
        let convs: Vec<_> = R::new(45, 16).convergents().collect();
        assert_eq!(convs, vec![R::from_integer(2), R::from_integer(3), R::new(14, 5), R::new(45, 16)]);
        let convs: Vec<_> = R::new(-16, 45).convergents().collect();
        assert_eq!(convs.last(), Some(&R::new(-16, 45)));
        assert_eq!(R::infinity().convergents().count(), 0);

        assert_eq!(R::new(45, 16).approximated(&10), Approximation::Approximated(R::new(14, 5)));
        assert_eq!(R::new(45, 16).approximated(&16), Approximation::Exact(R::new(45, 16)));
    }
}
