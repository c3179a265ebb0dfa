//! Error types for vault arithmetic
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Integer arithmetic errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    #[error("Arithmetic overflow: intermediate exceeds 256 bits")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "Arithmetic overflow: intermediate exceeds 256 bits"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "Division by zero");
    }
}
