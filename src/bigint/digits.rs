//! Magnitude kernels over little-endian digit groups in base 10^7.
//!
//! Every function here takes magnitudes without trailing (most significant)
//! zero groups and returns a magnitude in the same form.

use super::BASE;
use core::cmp::Ordering;
use log::trace;

const B: u64 = BASE as u64;

/// Drop the most significant zero groups
#[inline]
pub(crate) fn trim(d: &mut Vec<u32>) {
    while let Some(&0) = d.last() {
        d.pop();
    }
}

/// Collect a scratch buffer of values already reduced below the base
#[inline]
fn finish(scratch: Vec<u64>) -> Vec<u32> {
    let mut out: Vec<u32> = scratch.into_iter().map(|v| v as u32).collect();
    trim(&mut out);
    out
}

pub(crate) fn cmp_abs(a: &[u32], b: &[u32]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        if x != y {
            return x.cmp(y);
        }
    }
    Ordering::Equal
}

pub(crate) fn add(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0;
    for (i, &x) in long.iter().enumerate() {
        let mut sum = x + carry + short.get(i).copied().unwrap_or(0);
        if sum >= BASE {
            sum -= BASE;
            carry = 1;
        } else {
            carry = 0;
        }
        out.push(sum);
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// Add a single digit group `n < BASE`, the carry usually dies after one group
pub(crate) fn add_small(a: &[u32], n: u32) -> Vec<u32> {
    debug_assert!(n < BASE);
    let mut out = a.to_vec();
    let mut carry = n;
    for g in out.iter_mut() {
        if carry == 0 {
            break;
        }
        let sum = *g + carry;
        if sum >= BASE {
            *g = sum - BASE;
            carry = 1;
        } else {
            *g = sum;
            carry = 0;
        }
    }
    if carry > 0 {
        out.push(carry);
    }
    out
}

/// Subtract magnitudes, `a` must not be smaller than `b`
pub(crate) fn sub(a: &[u32], b: &[u32]) -> Vec<u32> {
    debug_assert!(cmp_abs(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0;
    for (i, &x) in a.iter().enumerate() {
        let y = b.get(i).copied().unwrap_or(0) + borrow;
        if x >= y {
            out.push(x - y);
            borrow = 0;
        } else {
            out.push(x + BASE - y);
            borrow = 1;
        }
    }
    debug_assert_eq!(borrow, 0);
    trim(&mut out);
    out
}

#[inline]
pub(crate) fn sub_small(a: &[u32], n: u32) -> Vec<u32> {
    sub(a, &[n])
}

/// Schoolbook multiplication
pub(crate) fn mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let x = x as u64;
        let mut carry = 0;
        for (j, &y) in b.iter().enumerate() {
            let t = out[i + j] + x * y as u64 + carry;
            carry = t / B;
            out[i + j] = t % B;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let t = out[k] + carry;
            carry = t / B;
            out[k] = t % B;
            k += 1;
        }
    }
    finish(out)
}

/// Multiply by a single digit group `n < BASE`
pub(crate) fn mul_small(a: &[u32], n: u32) -> Vec<u32> {
    if n == 0 || a.is_empty() {
        return Vec::new();
    }
    let n = n as u64;
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = 0;
    for &x in a {
        let t = x as u64 * n + carry;
        carry = t / B;
        out.push((t % B) as u32);
    }
    if carry > 0 {
        out.push(carry as u32);
    }
    out
}

/// Square a magnitude, computing each diagonal term once and every cross
/// term once doubled
pub(crate) fn square(a: &[u32]) -> Vec<u32> {
    let n = a.len();
    if n == 0 {
        return Vec::new();
    }
    let mut out = vec![0u64; 2 * n];
    for i in 0..n {
        let x = a[i] as u64;
        let t = out[2 * i] + x * x;
        out[2 * i] = t % B;
        let mut carry = t / B;
        for j in (i + 1)..n {
            let t = out[i + j] + 2 * x * a[j] as u64 + carry;
            carry = t / B;
            out[i + j] = t % B;
        }
        let mut k = i + n;
        while carry > 0 {
            let t = out[k] + carry;
            carry = t / B;
            out[k] = t % B;
            k += 1;
        }
    }
    finish(out)
}

/// Divide by a single non-zero digit group, returning the quotient and remainder
pub(crate) fn divrem_small(a: &[u32], n: u32) -> (Vec<u32>, u32) {
    debug_assert!(n > 0 && n < BASE);
    let n = n as u64;
    let mut quot = vec![0u32; a.len()];
    let mut rem = 0u64;
    for i in (0..a.len()).rev() {
        let cur = rem * B + a[i] as u64;
        quot[i] = (cur / n) as u32;
        rem = cur % n;
    }
    trim(&mut quot);
    (quot, rem as u32)
}

/// Long division of `a` by a divisor of at least two groups, with `a > b`.
///
/// Each quotient group is estimated from the two leading groups of the running
/// remainder and of the divisor. The estimate never falls below the true digit,
/// so the correction loop only walks downwards and stops within the radix.
pub(crate) fn divrem(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(b.len() >= 2);
    let base = B as u128;
    let ylen = b.len();
    let highy = b[ylen - 1] as u128 * base + b[ylen - 2] as u128;

    let mut quot = vec![0u32; a.len()];
    let mut part: Vec<u32> = Vec::with_capacity(ylen + 1);
    for i in (0..a.len()).rev() {
        part.insert(0, a[i]);
        trim(&mut part);
        if cmp_abs(&part, b) == Ordering::Less {
            continue;
        }

        let xlen = part.len();
        let mut highx = part[xlen - 1] as u128 * base + part[xlen - 2] as u128;
        if xlen > ylen {
            // the running remainder is at most one group longer than the divisor
            highx = (highx + 1) * base;
        }
        let mut guess = ((highx + highy - 1) / highy).min(base - 1) as u32;

        let check = loop {
            let check = mul_small(b, guess);
            if cmp_abs(&check, &part) != Ordering::Greater {
                break check;
            }
            trace!("quotient group estimate {} too large at position {}", guess, i);
            guess -= 1;
        };
        part = sub(&part, &check);
        quot[i] = guess;
    }
    trim(&mut quot);
    (quot, part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_test() {
        assert_eq!(add(&[9_999_999], &[1]), vec![0, 1]);
        assert_eq!(add_small(&[9_999_999, 9_999_999], 1), vec![0, 0, 1]);
        assert_eq!(add(&[5], &[]), vec![5]);
    }

    #[test]
    fn borrow_test() {
        assert_eq!(sub(&[0, 1], &[1]), vec![9_999_999]);
        assert_eq!(sub(&[0, 0, 1], &[1]), vec![9_999_999, 9_999_999]);
        assert_eq!(sub_small(&[3], 3), Vec::<u32>::new());
    }

    #[test]
    fn mul_test() {
        // (10^7 - 1)^2 = 99999980000001
        assert_eq!(mul(&[9_999_999], &[9_999_999]), vec![1, 9_999_998]);
        assert_eq!(square(&[9_999_999]), vec![1, 9_999_998]);
        let a = [1234567, 7654321, 42];
        assert_eq!(square(&a), mul(&a, &a));
        assert_eq!(mul_small(&a, 1), a.to_vec());
        assert_eq!(mul(&a, &[]), Vec::<u32>::new());
    }

    #[test]
    fn divrem_test() {
        assert_eq!(divrem_small(&[1, 9_999_998], 9_999_999), (vec![9_999_999], 0));
        assert_eq!(divrem_small(&[7], 2), (vec![3], 1));

        // 10^21 + 5 divided by 10^7 + 3
        let (q, r) = divrem(&[5, 0, 0, 1], &[3, 1]);
        let back = add(&mul(&q, &[3, 1]), &r);
        assert_eq!(back, vec![5, 0, 0, 1]);
        assert_eq!(cmp_abs(&r, &[3, 1]), Ordering::Less);

        let (q, r) = divrem(&[0, 0, 9_999_999], &[9_999_999, 9_999_999]);
        assert_eq!(q, vec![9_999_999]);
        assert_eq!(r, vec![9_999_999]);
    }
}
