//! Amortization and rate-sensitivity projections.
//!
//! Both projections reuse the loan model's recurrences to produce ordered
//! coordinate sequences for plotting: balance decay over the term, and
//! payment as a function of the annual rate over a fixed grid.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::pv_ordinary_annuity;
use crate::error::LoanError;
use crate::loan::PCT_TO_PERIODIC;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default lower end of the sensitivity sweep (annual %).
pub const DEFAULT_RATE_MIN_PCT: Decimal = dec!(0);

/// Default upper end of the sensitivity sweep (annual %).
pub const DEFAULT_RATE_MAX_PCT: Decimal = dec!(24);

/// Default sweep step: an eighth of a percentage point.
pub const DEFAULT_RATE_STEP_PCT: Decimal = dec!(0.125);

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Amortization curve input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    /// Starting principal.
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate_pct: Rate,
    /// Periodic (monthly) payment.
    pub payment: Money,
    /// Nominal term in months; iteration never runs past this.
    pub term_months: u32,
}

/// One month of the amortization curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPoint {
    /// Period number (0 = origination).
    pub period: u32,
    /// Interest accrued this period.
    pub interest: Money,
    /// Principal repaid this period.
    pub principal_repaid: Money,
    /// Remaining balance after the payment.
    pub balance: Money,
}

/// Amortization curve output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// Ordered (period, balance) points starting at (0, principal).
    pub points: Vec<AmortizationPoint>,
    /// Total interest accrued over the plotted horizon.
    pub total_interest: Money,
    /// Period at which the balance first reached zero, if inside the term.
    pub payoff_period: Option<u32>,
}

/// Rate-sensitivity sweep input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Principal held fixed across the sweep.
    pub principal: Money,
    /// Term in months held fixed across the sweep.
    pub term_months: u32,
    /// Sweep lower bound (annual %).
    #[serde(default = "default_rate_min")]
    pub rate_min_pct: Rate,
    /// Sweep upper bound (annual %).
    #[serde(default = "default_rate_max")]
    pub rate_max_pct: Rate,
    /// Sweep step (annual percentage points).
    #[serde(default = "default_rate_step")]
    pub rate_step_pct: Rate,
}

fn default_rate_min() -> Rate {
    DEFAULT_RATE_MIN_PCT
}

fn default_rate_max() -> Rate {
    DEFAULT_RATE_MAX_PCT
}

fn default_rate_step() -> Rate {
    DEFAULT_RATE_STEP_PCT
}

/// One grid point of the sensitivity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePaymentPoint {
    /// Candidate annual rate (%).
    pub annual_rate_pct: Rate,
    /// Level payment the principal and term imply at that rate.
    pub payment: Money,
}

/// Rate-sensitivity sweep output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    /// Ordered (rate, payment) points from min to max rate.
    pub points: Vec<RatePaymentPoint>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the month-by-month balance decay of a loan.
///
/// Iteration stops at the nominal term or as soon as the balance turns
/// non-positive, whichever comes first, so an over-sized payment cannot
/// produce a runaway negative tail in the rendered curve.
pub fn amortization_curve(
    input: &AmortizationInput,
) -> LoanResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    validate_amortization(input)?;

    let periodic_rate = input.annual_rate_pct / PCT_TO_PERIODIC;
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;
    let mut payoff_period = None;

    let mut points = Vec::with_capacity(input.term_months as usize + 1);
    points.push(AmortizationPoint {
        period: 0,
        interest: Decimal::ZERO,
        principal_repaid: Decimal::ZERO,
        balance,
    });

    for period in 1..=input.term_months {
        let interest = balance * periodic_rate;
        balance += interest;
        balance -= input.payment;
        total_interest += interest;

        points.push(AmortizationPoint {
            period,
            interest,
            principal_repaid: input.payment - interest,
            balance,
        });

        if balance <= Decimal::ZERO {
            payoff_period = Some(period);
            break;
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization balance-decay projection",
        input,
        Vec::new(),
        elapsed,
        AmortizationOutput {
            points,
            total_interest,
            payoff_period,
        },
    ))
}

/// Sweep the annual rate over a grid, recording the implied payment at
/// each step while principal and term stay fixed.
pub fn rate_sensitivity(
    input: &SensitivityInput,
) -> LoanResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    validate_sensitivity(input)?;

    let mut points = Vec::new();
    let mut rate = input.rate_min_pct;

    while rate <= input.rate_max_pct {
        let factor = pv_ordinary_annuity(rate / PCT_TO_PERIODIC, input.term_months);
        if factor.is_zero() {
            return Err(LoanError::DivisionByZero {
                context: format!("annuity factor at {rate}% in sensitivity sweep"),
            });
        }
        points.push(RatePaymentPoint {
            annual_rate_pct: rate,
            payment: input.principal / factor,
        });
        rate += input.rate_step_pct;
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rate-to-payment sensitivity sweep",
        input,
        Vec::new(),
        elapsed,
        SensitivityOutput { points },
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_amortization(input: &AmortizationInput) -> LoanResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.payment <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "payment".into(),
            reason: "Payment must be positive".into(),
        });
    }
    if input.term_months == 0 {
        return Err(LoanError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    Ok(())
}

fn validate_sensitivity(input: &SensitivityInput) -> LoanResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.term_months == 0 {
        return Err(LoanError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if input.rate_min_pct < Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate_min_pct".into(),
            reason: "Sweep lower bound cannot be negative".into(),
        });
    }
    if input.rate_max_pct <= input.rate_min_pct {
        return Err(LoanError::InvalidInput {
            field: "rate_max_pct".into(),
            reason: "Sweep upper bound must exceed the lower bound".into(),
        });
    }
    if input.rate_step_pct <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate_step_pct".into(),
            reason: "Sweep step must be positive".into(),
        });
    }
    Ok(())
}
