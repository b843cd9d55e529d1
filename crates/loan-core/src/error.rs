use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Monthly payments too low: {payment} cannot amortize the loan (minimum {minimum})")]
    PaymentTooLow { payment: Decimal, minimum: Decimal },

    #[error("Monthly payments too high: {payment} exceeds the maximum feasible payment {maximum}")]
    PaymentTooHigh { payment: Decimal, maximum: Decimal },

    #[error("No root bracketed: f has the same sign at both ends of [{lower}, {upper}]")]
    NoRootBracketed { lower: Decimal, upper: Decimal },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
