//! Rational parametrization of the unit circle.
//!
//! A parameter `a` stands for the point `((1 - a²) / (1 + a²), 2a / (1 + a²))`,
//! which is the point at angle `2 atan(a)`. The infinite parameter is the
//! point `(-1, 0)`.

use super::Fraction;
use crate::traits::FractionBase;
use num_traits::{One, Zero};

impl<T: FractionBase> Fraction<T> {
    /// Parametric sine `2a / (1 + a²)`
    pub fn sin(&self) -> Self {
        if !self.is_finite() {
            return Self::zero();
        }
        let a2 = self.pow(2);
        self.scalar_mul(&(T::one() + T::one())) / (a2 + Self::one())
    }

    /// Parametric cosine `(1 - a²) / (1 + a²)`
    pub fn cos(&self) -> Self {
        if !self.is_finite() {
            return Self::neg_one();
        }
        let a2 = self.pow(2);
        (Self::one() - a2.clone()) / (Self::one() + a2)
    }

    /// Parametric tangent, the quotient of [Fraction::sin] and
    /// [Fraction::cos]: `2a / (1 - a²)`
    pub fn tan(&self) -> Self {
        if !self.is_finite() {
            return Self::zero();
        }
        let a2 = self.pow(2);
        self.scalar_mul(&(T::one() + T::one())) / (Self::one() - a2)
    }
}
