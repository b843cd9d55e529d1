//! Fixed-rate loan solver: derive any one of principal, annual rate, term,
//! or payment from the other three.
//!
//! Payment and principal come straight from the annuity present-value
//! factor. Term has no closed form here and is found by simulating the
//! amortization period by period. Rate has no closed form at all and is
//! recovered by bisecting the payment equation over an annual-percentage
//! bracket. All math in `rust_decimal::Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annuity::{pv_ordinary_annuity, round_up_to_cent};
use crate::error::LoanError;
use crate::roots::{bisect, RootStatus};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, UnknownQuantity};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Annual percentage to periodic fractional rate divisor (100 x 12).
pub const PCT_TO_PERIODIC: Decimal = dec!(1200);

/// Upper end of the annual-percentage bracket searched for the rate.
pub const RATE_BRACKET_MAX_PCT: Decimal = dec!(100);

/// Bisection convergence tolerance (annual percentage points).
const RATE_TOL: Decimal = dec!(0.000001);

/// Maximum bisection iterations for the rate solve.
const RATE_MAX_ITERATIONS: u32 = 100;

/// Hard ceiling on simulated amortization periods (1000 years of months).
const TERM_PERIOD_CAP: u32 = 12_000;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Loan solve input. The field named by `unknown` is left `None`; the other
/// three must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Which quantity to solve for.
    pub unknown: UnknownQuantity,
    /// Principal in currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    /// Annual interest rate as a percentage (3.5 = 3.5%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Rate>,
    /// Term in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_years: Option<Decimal>,
    /// Periodic (monthly) payment in currency units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
}

/// The consistent quartet after a solve, plus derived values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSolution {
    /// Which quantity was derived.
    pub solved: UnknownQuantity,
    /// Principal in currency units.
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub annual_rate_pct: Rate,
    /// Periodic (monthly) fractional rate: annual percentage / 1200.
    pub periodic_rate: Rate,
    /// Term in whole months.
    pub term_months: u32,
    /// Term in years (term_months / 12).
    pub term_years: Decimal,
    /// Exact periodic payment.
    pub payment: Money,
    /// Payment rounded up to the next cent.
    pub payment_rounded: Money,
    /// The solved value formatted for display: 2 decimal places for
    /// currency amounts, 3 for the rate percentage.
    pub formatted: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Solve for the unknown loan quantity given the other three.
pub fn solve_loan(input: &LoanInput) -> LoanResult<ComputationOutput<LoanSolution>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let (solution, methodology) = match input.unknown {
        UnknownQuantity::Payment => {
            let principal = require(input.principal, "principal")?;
            let rate_pct = require(input.annual_rate_pct, "annual_rate_pct")?;
            let months = term_to_months(require(input.term_years, "term_years")?)?;
            let payment = solve_payment(principal, rate_pct / PCT_TO_PERIODIC, months)?;
            (
                build_solution(UnknownQuantity::Payment, principal, rate_pct, months, payment),
                "Level payment from annuity present-value factor",
            )
        }
        UnknownQuantity::Principal => {
            let payment = require(input.payment, "payment")?;
            let rate_pct = require(input.annual_rate_pct, "annual_rate_pct")?;
            let months = term_to_months(require(input.term_years, "term_years")?)?;
            let principal = solve_principal(payment, rate_pct / PCT_TO_PERIODIC, months);
            (
                build_solution(UnknownQuantity::Principal, principal, rate_pct, months, payment),
                "Principal from annuity present-value factor",
            )
        }
        UnknownQuantity::TermYears => {
            let principal = require(input.principal, "principal")?;
            let rate_pct = require(input.annual_rate_pct, "annual_rate_pct")?;
            let payment = require(input.payment, "payment")?;
            let months = solve_term_months(principal, rate_pct / PCT_TO_PERIODIC, payment)?;
            (
                build_solution(UnknownQuantity::TermYears, principal, rate_pct, months, payment),
                "Term by period-by-period amortization simulation",
            )
        }
        UnknownQuantity::InterestRate => {
            let principal = require(input.principal, "principal")?;
            let payment = require(input.payment, "payment")?;
            let months = term_to_months(require(input.term_years, "term_years")?)?;
            let rate_pct = solve_rate_pct(principal, payment, months, &mut warnings)?;
            (
                build_solution(UnknownQuantity::InterestRate, principal, rate_pct, months, payment),
                "Rate by bisection of the payment equation",
            )
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, solution))
}

// ---------------------------------------------------------------------------
// Solve operations
// ---------------------------------------------------------------------------

/// payment = principal / pv(rate, months).
fn solve_payment(principal: Money, periodic_rate: Rate, months: u32) -> LoanResult<Money> {
    let factor = pv_ordinary_annuity(periodic_rate, months);
    if factor.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity factor in payment solve".into(),
        });
    }
    Ok(principal / factor)
}

/// principal = payment x pv(rate, months).
fn solve_principal(payment: Money, periodic_rate: Rate, months: u32) -> Money {
    payment * pv_ordinary_annuity(periodic_rate, months)
}

/// Count periods until the balance amortizes to zero: each period accrues
/// interest, then subtracts the payment. The payment must exceed one
/// period's interest on the full principal or the balance never shrinks;
/// that is rejected up front so the loop always terminates.
fn solve_term_months(principal: Money, periodic_rate: Rate, payment: Money) -> LoanResult<u32> {
    let first_interest = principal * periodic_rate;
    if payment <= first_interest {
        return Err(LoanError::PaymentTooLow {
            payment,
            minimum: first_interest,
        });
    }

    let mut balance = principal;
    let mut months: u32 = 0;

    while balance > Decimal::ZERO && months < TERM_PERIOD_CAP {
        balance += balance * periodic_rate;
        balance -= payment;
        months += 1;
    }

    if balance > Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "payment".into(),
            reason: format!("Loan does not amortize within {TERM_PERIOD_CAP} months"),
        });
    }

    Ok(months)
}

/// Bisect g(r) = principal - payment x pv(r/1200, months) for the annual
/// percentage over [0, RATE_BRACKET_MAX_PCT].
fn solve_rate_pct(
    principal: Money,
    payment: Money,
    months: u32,
    warnings: &mut Vec<String>,
) -> LoanResult<Rate> {
    // Too low: even with zero interest, months x payment must cover the
    // principal for any rate in the bracket to fit.
    let undiscounted = Decimal::from(months) * payment;
    if undiscounted < principal {
        return Err(LoanError::PaymentTooLow {
            payment,
            minimum: principal / Decimal::from(months.max(1)),
        });
    }

    // Too high: above the payment implied at the top of the bracket, no
    // rate in range can reproduce it.
    let max_payment = solve_payment(principal, RATE_BRACKET_MAX_PCT / PCT_TO_PERIODIC, months)?;
    if payment > max_payment {
        return Err(LoanError::PaymentTooHigh {
            payment,
            maximum: max_payment,
        });
    }

    let g = |annual_pct: Decimal| {
        principal - payment * pv_ordinary_annuity(annual_pct / PCT_TO_PERIODIC, months)
    };

    let found = bisect(
        Decimal::ZERO,
        RATE_BRACKET_MAX_PCT,
        g,
        RATE_TOL,
        RATE_MAX_ITERATIONS,
    )?;

    if found.status == RootStatus::IterationCapReached {
        warnings.push(format!(
            "Rate bisection hit the {RATE_MAX_ITERATIONS}-iteration cap; \
             returning the best estimate"
        ));
    }

    Ok(found.root)
}

// ---------------------------------------------------------------------------
// Validation and assembly
// ---------------------------------------------------------------------------

fn validate_input(input: &LoanInput, warnings: &mut Vec<String>) -> LoanResult<()> {
    let provided_unknown = match input.unknown {
        UnknownQuantity::Principal => input.principal.is_some(),
        UnknownQuantity::InterestRate => input.annual_rate_pct.is_some(),
        UnknownQuantity::TermYears => input.term_years.is_some(),
        UnknownQuantity::Payment => input.payment.is_some(),
    };
    if provided_unknown {
        warnings.push(format!(
            "Value supplied for unknown quantity '{}' is ignored",
            input.unknown.field_name()
        ));
    }

    if let Some(p) = input.principal {
        if p < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "principal".into(),
                reason: "Principal cannot be negative".into(),
            });
        }
    }
    if let Some(r) = input.annual_rate_pct {
        if r < Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "annual_rate_pct".into(),
                reason: "Annual rate cannot be negative".into(),
            });
        }
    }
    if let Some(t) = input.term_years {
        if t <= Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be positive".into(),
            });
        }
    }
    if let Some(p) = input.payment {
        if p <= Decimal::ZERO {
            return Err(LoanError::InvalidInput {
                field: "payment".into(),
                reason: "Payment must be positive".into(),
            });
        }
    }
    Ok(())
}

fn require(value: Option<Decimal>, field: &str) -> LoanResult<Decimal> {
    value.ok_or_else(|| LoanError::InvalidInput {
        field: field.into(),
        reason: "Required for this solve but not provided".into(),
    })
}

fn term_to_months(term_years: Decimal) -> LoanResult<u32> {
    let months = (term_years * MONTHS_PER_YEAR).round();
    if months < Decimal::ONE {
        return Err(LoanError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must cover at least one month".into(),
        });
    }
    months.to_u32().ok_or_else(|| LoanError::InvalidInput {
        field: "term_years".into(),
        reason: format!("Term of {months} months is out of range"),
    })
}

fn build_solution(
    solved: UnknownQuantity,
    principal: Money,
    annual_rate_pct: Rate,
    term_months: u32,
    payment: Money,
) -> LoanSolution {
    let formatted = match solved {
        UnknownQuantity::Principal => format!("{}", principal.round_dp(2)),
        UnknownQuantity::InterestRate => format!("{}", annual_rate_pct.round_dp(3)),
        UnknownQuantity::TermYears => {
            format!("{}", (Decimal::from(term_months) / MONTHS_PER_YEAR).round_dp(2))
        }
        UnknownQuantity::Payment => format!("{}", payment.round_dp(2)),
    };

    LoanSolution {
        solved,
        principal,
        annual_rate_pct,
        periodic_rate: annual_rate_pct / PCT_TO_PERIODIC,
        term_months,
        term_years: Decimal::from(term_months) / MONTHS_PER_YEAR,
        payment,
        payment_rounded: round_up_to_cent(payment),
        formatted,
    }
}
