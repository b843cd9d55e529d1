use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use loan_core::loan::{self, LoanInput};
use loan_core::UnknownQuantity;

use crate::input;

/// CLI spelling of the solvable quantities.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Unknown {
    Principal,
    InterestRate,
    TermYears,
    Payment,
}

impl From<Unknown> for UnknownQuantity {
    fn from(u: Unknown) -> Self {
        match u {
            Unknown::Principal => UnknownQuantity::Principal,
            Unknown::InterestRate => UnknownQuantity::InterestRate,
            Unknown::TermYears => UnknownQuantity::TermYears,
            Unknown::Payment => UnknownQuantity::Payment,
        }
    }
}

/// Arguments for the loan solve
#[derive(Args)]
pub struct SolveArgs {
    /// Which quantity to solve for
    #[arg(long, value_enum)]
    pub unknown: Option<Unknown>,

    /// Principal in currency units
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 3.5 for 3.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<Decimal>,

    /// Monthly payment in currency units
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            unknown: args
                .unknown
                .ok_or("--unknown is required (or provide --input)")?
                .into(),
            principal: args.principal,
            annual_rate_pct: args.annual_rate_pct,
            term_years: args.term_years,
            payment: args.payment,
        }
    };
    let result = loan::solve_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
