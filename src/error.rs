use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the big integer engine. Fractions never fail, division by zero
/// on a fraction yields the infinity or indeterminate value instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid radix {0}, must be in [2, 36]")]
    InvalidRadix(u32),
    #[error("Division by zero")]
    DivideByZero,
    #[error("Exponent {0} is too large")]
    ExponentTooLarge(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_test() {
        assert_eq!(Error::InvalidRadix(40).to_string(), "Invalid radix 40, must be in [2, 36]");
        assert_eq!(Error::Parse("1x".into()).to_string(), "Parse error: 1x");
    }
}
