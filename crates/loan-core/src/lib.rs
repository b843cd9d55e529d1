pub mod annuity;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod loan;
pub mod projection;
pub mod roots;
pub mod types;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loan-solver operations
pub type LoanResult<T> = Result<T, LoanError>;
