use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan solver
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_loan(input_json: String) -> NapiResult<String> {
    let input: loan_core::loan::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_core::loan::solve_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_curve(input_json: String) -> NapiResult<String> {
    let input: loan_core::projection::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_core::projection::amortization_curve(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rate_sensitivity(input_json: String) -> NapiResult<String> {
    let input: loan_core::projection::SensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_core::projection::rate_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Charting
// ---------------------------------------------------------------------------

#[napi]
pub fn render_chart(input_json: String) -> NapiResult<String> {
    let input: loan_core::chart::ChartInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_core::chart::render_chart(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
