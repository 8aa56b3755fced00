//! Exact rational arithmetic over native and arbitrary precision integers.
//!
//! [Rat] and [BigRat] are the same [Fraction] type instantiated over `i64`
//! and [BigInteger]. Division by zero never fails, it yields the infinity
//! `1/0` or the indeterminate value `0/0`. Roots, decimal conversion and
//! continued fractions are computed by walking the Stern-Brocot tree.

pub mod bigint;
pub mod bigrat;
mod error;
pub mod fraction;
pub mod integer;
pub mod rat;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use bigint::BigInteger;
pub use bigrat::BigRat;
pub use error::{Error, Result};
pub use fraction::{Fraction, SearchConfig};
pub use rat::Rat;
pub use traits::{Approximation, FractionBase};
