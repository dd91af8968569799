//! Error types for numeric values
//!
//! Covers exchange rate construction and human-readable unit parsing.

use thiserror::Error;

/// Numeric conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Exchange rate must be a positive integer")]
    ZeroRate,

    #[error("Malformed amount: {value}")]
    Malformed { value: String },

    #[error("Amount must not be negative: {value}")]
    Negative { value: String },

    #[error("Amount {value} has more than {decimals} fractional digits")]
    TooPrecise { value: String, decimals: u32 },

    #[error("Amount does not fit the numeric domain")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_precise_display() {
        let err = NumericError::TooPrecise {
            value: "0.001".to_string(),
            decimals: 2,
        };
        assert_eq!(err.to_string(), "Amount 0.001 has more than 2 fractional digits");
    }

    #[test]
    fn test_zero_rate_display() {
        assert!(NumericError::ZeroRate.to_string().contains("positive"));
    }
}
