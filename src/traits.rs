use core::fmt::{Debug, Display};
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, Signed, ToPrimitive};

/// Result of a search or conversion that may stop before reaching the exact value
#[derive(PartialEq, Debug, Clone)]
pub enum Approximation<T> {
    Approximated(T),
    Exact(T),
}

impl<T> Approximation<T> {
    /// Take the value regardless of its exactness
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) | Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

/// The integral ring a fraction is built on.
///
/// Besides the arithmetic, every ring carries the tunables of the
/// Stern-Brocot searches run over its fractions.
pub trait FractionBase:
    Integer + Signed + Clone + Debug + Display + FromPrimitive + ToPrimitive + CheckedAdd + CheckedSub + CheckedMul
{
    /// Iteration ceiling of root finding and decimal conversion
    const MAX_LOOPS: u64;

    /// Iteration ceiling of tree traces and continued fraction expansion
    const TRACE_LOOPS: u64;

    /// Inverse of the largest difference two values may have while still
    /// approximating each other
    fn infinitesimal_precision() -> Self;

    #[inline]
    fn square(&self) -> Self {
        self.clone() * self.clone()
    }

    /// Raise to a power, `None` if the result does not fit
    fn checked_pow(&self, exp: u32) -> Option<Self> {
        let mut base = self.clone();
        let mut acc = Self::one();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Some(acc)
    }
}

macro_rules! impl_primitive_base {
    ($($T:ty),*) => {$(
        impl FractionBase for $T {
            const MAX_LOOPS: u64 = 1 << 24;
            const TRACE_LOOPS: u64 = 1 << 24;

            #[inline]
            fn infinitesimal_precision() -> Self {
                1 << 56
            }
        }
    )*};
}
impl_primitive_base!(i64, i128);
