use super::{digits, BigInteger, BASE, BASE_DIGITS, MAX_EXPONENT};
use crate::error::{Error, Result};
use core::cmp::Ordering;
use core::convert::TryFrom;
use core::fmt::{self, Write};
use core::str::FromStr;
use num_traits::{Float, FromPrimitive, Num, ToPrimitive, Zero};

const NUMERALS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Split a decimal literal in exponential form into mantissa and exponent.
/// Accepts `1.5e3` as well as `1.5 * 10^3`, `1.5 x 10^3` and `1.5 * 10 ** 3`.
fn split_exponent(s: &str) -> Option<(&str, &str)> {
    for (k, c) in s.char_indices() {
        if c == '*' || c == 'x' || c == 'X' {
            let rest = s[k + 1..].trim_start();
            if let Some(rest) = rest.strip_prefix("10") {
                let rest = rest.trim_start();
                if let Some(exp) = rest.strip_prefix("**").or_else(|| rest.strip_prefix('^')) {
                    return Some((s[..k].trim_end(), exp.trim_start()));
                }
            }
        }
    }
    s.find(|c: char| c == 'e' || c == 'E').map(|k| (&s[..k], &s[k + 1..]))
}

/// Rewrite an exponential literal into plain integer digits, dropping the
/// fractional part. Returns `None` if the text is not in exponential form.
fn expand_exponential(s: &str) -> Result<Option<String>> {
    let (mantissa, exponent) = match split_exponent(s) {
        Some(parts) => parts,
        None => return Ok(None),
    };
    let is_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());

    let (sign, mantissa) = match mantissa.as_bytes().first() {
        Some(b'-') => ("-", &mantissa[1..]),
        Some(b'+') => ("", &mantissa[1..]),
        _ => ("", mantissa),
    };
    let (int, frac) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    let exp_digits = exponent.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(exponent);
    if int.is_empty() || !is_digits(int) || !is_digits(frac) || exp_digits.is_empty() || !is_digits(exp_digits) {
        return Ok(None);
    }
    let exp: i64 = exponent.parse().map_err(|_| Error::Parse(s.to_owned()))?;
    if exp.abs() > MAX_EXPONENT {
        return Err(Error::ExponentTooLarge(exp));
    }

    let mut all = String::with_capacity(int.len() + frac.len());
    all.push_str(int);
    all.push_str(frac);
    let point = int.len() as i64 + exp;
    let body = if point <= 0 {
        String::from("0")
    } else if point as usize >= all.len() {
        let pad = point as usize - all.len();
        all.extend(core::iter::repeat('0').take(pad));
        all
    } else {
        all.truncate(point as usize);
        all
    };
    Ok(Some(format!("{}{}", sign, body)))
}

/// Strip the radix prefix. Without an explicit radix, `0x`, `0c` and `0b`
/// select hexadecimal, octal and binary, anything else is decimal.
fn strip_radix_prefix(s: &str, radix: Option<u32>) -> (u32, &str) {
    let prefix = s.get(..2).map(|p| p.to_ascii_lowercase());
    let guessed = match prefix.as_deref() {
        Some("0x") => Some(16),
        Some("0c") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    match (radix, guessed) {
        (None, Some(r)) => (r, &s[2..]),
        (None, None) => (10, s),
        (Some(r), Some(g)) if r == g => (r, &s[2..]),
        (Some(r), _) => (r, s),
    }
}

fn parse_impl(s: &str, radix: Option<u32>) -> Result<BigInteger> {
    if let Some(r) = radix {
        if !(2..=36).contains(&r) {
            return Err(Error::InvalidRadix(r));
        }
    }

    let expanded;
    let mut text = s.trim();
    if radix.map_or(true, |r| r == 10) {
        if let Some(e) = expand_exponential(text)? {
            expanded = e;
            text = &expanded;
        }
    }

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, rest) = strip_radix_prefix(rest, radix);
    let (body, frac) = match rest.find('.') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    if let Some(f) = frac {
        if !f.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Parse(s.to_owned()));
        }
    }
    if body.is_empty() && frac.map_or(true, str::is_empty) {
        return Err(Error::Parse(s.to_owned()));
    }

    let mut values = Vec::with_capacity(body.len());
    for c in body.chars() {
        match c.to_digit(36) {
            Some(d) if d < radix => values.push(d),
            _ => return Err(Error::Parse(format!("bad digit {:?} for radix {} in {:?}", c, radix, s))),
        }
    }
    let skip = values.iter().take_while(|&&d| d == 0).count();
    let values = &values[skip..];

    let groups = if radix == 10 {
        values
            .rchunks(BASE_DIGITS)
            .map(|chunk| chunk.iter().fold(0, |acc, &d| acc * 10 + d))
            .collect()
    } else {
        values.iter().fold(Vec::new(), |acc, &d| {
            digits::add_small(&digits::mul_small(&acc, radix), d)
        })
    };
    Ok(BigInteger::from_digits(if negative { -1 } else { 1 }, groups))
}

impl BigInteger {
    /// Parse an integer literal. The radix is read from a `0x`, `0c` or `0b` prefix,
    /// decimal literals may use exponential forms like `1.5e3` or `-13.441*10^5`.
    /// A fractional part is accepted and truncated.
    #[inline]
    pub fn parse(s: &str) -> Result<Self> {
        parse_impl(s, None)
    }

    /// Parse an integer literal in the given radix
    #[inline]
    pub fn parse_radix(s: &str, radix: u32) -> Result<Self> {
        parse_impl(s, Some(radix))
    }

    /// Render in the given radix with upper case digits
    pub fn to_string_radix(&self, radix: u32) -> Result<String> {
        if !(2..=36).contains(&radix) {
            return Err(Error::InvalidRadix(radix));
        }
        if radix == 10 {
            return Ok(self.to_string());
        }
        if self.is_zero() {
            return Ok(String::from("0"));
        }

        let mut out = Vec::new();
        let mut mag = self.digits.clone();
        while !mag.is_empty() {
            let (q, r) = digits::divrem_small(&mag, radix);
            out.push(NUMERALS[r as usize]);
            mag = q;
        }
        if self.sign < 0 {
            out.push(b'-');
        }
        Ok(out.iter().rev().map(|&b| b as char).collect())
    }

    fn from_magnitude(sign: i8, mut n: u128) -> Self {
        let mut digits = Vec::new();
        while n > 0 {
            digits.push((n % BASE as u128) as u32);
            n /= BASE as u128;
        }
        BigInteger::from_digits(sign, digits)
    }

    /// Magnitude as a native integer if it fits
    fn magnitude_u128(&self) -> Option<u128> {
        self.digits
            .iter()
            .rev()
            .try_fold(0u128, |acc, &d| acc.checked_mul(BASE as u128)?.checked_add(d as u128))
    }

    /// Nearest double, through the decimal rendering
    pub(crate) fn to_f64_lossy(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(self.digits.len() * BASE_DIGITS);
        match self.digits.split_last() {
            None => s.push('0'),
            Some((top, rest)) => {
                write!(s, "{}", top)?;
                for g in rest.iter().rev() {
                    write!(s, "{:07}", g)?;
                }
            }
        }
        f.pad_integral(self.sign >= 0, "", &s)
    }
}

impl FromStr for BigInteger {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        BigInteger::parse(s)
    }
}

impl Num for BigInteger {
    type FromStrRadixErr = Error;

    #[inline]
    fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        BigInteger::parse_radix(s, radix)
    }
}

macro_rules! impl_from_primitive {
    ($($T:ty),*) => {$(
        impl From<$T> for BigInteger {
            #[inline]
            #[allow(unused_comparisons)]
            fn from(n: $T) -> Self {
                let sign = if n < 0 { -1 } else { 1 };
                BigInteger::from_magnitude(sign, (n as i128).unsigned_abs())
            }
        }
    )*};
}
impl_from_primitive!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<i128> for BigInteger {
    #[inline]
    fn from(n: i128) -> Self {
        BigInteger::from_magnitude(if n < 0 { -1 } else { 1 }, n.unsigned_abs())
    }
}

impl From<u128> for BigInteger {
    #[inline]
    fn from(n: u128) -> Self {
        BigInteger::from_magnitude(1, n)
    }
}

impl FromPrimitive for BigInteger {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        Some(BigInteger::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Some(BigInteger::from(n))
    }

    #[inline]
    fn from_i128(n: i128) -> Option<Self> {
        Some(BigInteger::from(n))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<Self> {
        Some(BigInteger::from(n))
    }

    /// Exact integer part of a finite double, truncated toward zero
    fn from_f64(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }
        let (mantissa, exponent, sign) = Float::integer_decode(n.trunc());
        if mantissa == 0 {
            return Some(BigInteger::zero());
        }
        let magnitude = if exponent >= 0 {
            BigInteger::from(mantissa) * BigInteger::from(2u32).pow(exponent as i64).ok()?
        } else if exponent > -64 {
            BigInteger::from(mantissa >> (-exponent) as u32)
        } else {
            BigInteger::zero()
        };
        Some(if sign < 0 { -magnitude } else { magnitude })
    }
}

impl ToPrimitive for BigInteger {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|v| i64::try_from(v).ok())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        let m = self.magnitude_u128()?;
        if self.sign < 0 {
            if m == 1 << 127 {
                Some(i128::MIN)
            } else {
                i128::try_from(m).ok().map(|v| -v)
            }
        } else {
            i128::try_from(m).ok()
        }
    }

    fn to_u128(&self) -> Option<u128> {
        if self.sign < 0 {
            None
        } else {
            self.magnitude_u128()
        }
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(self.to_f64_lossy())
    }
}

impl PartialEq<f64> for BigInteger {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Comparison against a double. NaN is unordered and the infinities lie
/// beyond every integer.
impl PartialOrd<f64> for BigInteger {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if other.is_nan() {
            return None;
        }
        if other.is_infinite() {
            return Some(if *other > 0.0 { Ordering::Less } else { Ordering::Greater });
        }
        let whole = BigInteger::from_f64(*other)?;
        let frac = other.fract();
        Some(self.compare(&whole).then_with(|| 0f64.partial_cmp(&frac).unwrap_or(Ordering::Equal)))
    }
}

#[cfg(feature = "num-bigint")]
mod bigint_interop {
    use super::BigInteger;
    use crate::bigint::BASE;
    use num_bigint::{BigInt, Sign};

    impl From<&BigInt> for BigInteger {
        fn from(n: &BigInt) -> Self {
            let (sign, words) = n.to_u32_digits();
            let shift = BigInteger::from(1u64 << 32);
            let magnitude = words
                .iter()
                .rev()
                .fold(BigInteger::from(0), |acc, &w| &acc * &shift + BigInteger::from(w));
            if sign == Sign::Minus {
                -magnitude
            } else {
                magnitude
            }
        }
    }

    impl From<&BigInteger> for BigInt {
        fn from(n: &BigInteger) -> Self {
            let magnitude = n
                .digits()
                .iter()
                .rev()
                .fold(BigInt::from(0), |acc, &g| acc * BASE + g);
            if n.sign() < 0 {
                -magnitude
            } else {
                magnitude
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn num_bigint_conversion_test() {
            let s = "-98765432109876543210987654321";
            let ours: BigInteger = s.parse().unwrap();
            let theirs: BigInt = s.parse().unwrap();
            assert_eq!(BigInt::from(&ours), theirs);
            assert_eq!(BigInteger::from(&theirs), ours);
        }
    }
}
