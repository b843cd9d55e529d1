use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (3.5 = 3.5%). Periodic rates are
/// always derived, never stored as inputs.
pub type Rate = Decimal;

/// Which of the four loan quantities is being solved for.
///
/// Exactly one quantity is unknown per solve; the other three must be
/// supplied. This replaces a process-wide "selected unknown" flag with an
/// explicit argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownQuantity {
    Principal,
    InterestRate,
    TermYears,
    Payment,
}

impl UnknownQuantity {
    pub fn field_name(&self) -> &'static str {
        match self {
            UnknownQuantity::Principal => "principal",
            UnknownQuantity::InterestRate => "annual_rate_pct",
            UnknownQuantity::TermYears => "term_years",
            UnknownQuantity::Payment => "payment",
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
