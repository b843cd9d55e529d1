use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_core::projection::{self, AmortizationInput, SensitivityInput};

use crate::input;

/// Arguments for the amortization curve
#[derive(Args)]
pub struct AmortizationArgs {
    /// Starting principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Nominal term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the rate-sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Principal held fixed across the sweep
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Term in months held fixed across the sweep
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Sweep lower bound (annual %)
    #[arg(long, default_value = "0")]
    pub rate_min: Decimal,

    /// Sweep upper bound (annual %)
    #[arg(long, default_value = "24")]
    pub rate_max: Decimal,

    /// Sweep step (annual percentage points)
    #[arg(long, default_value = "0.125")]
    pub rate_step: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let proj_input: AmortizationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AmortizationInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args
                .annual_rate_pct
                .ok_or("--annual-rate-pct is required (or provide --input)")?,
            payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        }
    };
    let result = projection::amortization_curve(&proj_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep_input: SensitivityInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SensitivityInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            rate_min_pct: args.rate_min,
            rate_max_pct: args.rate_max,
            rate_step_pct: args.rate_step,
        }
    };
    let result = projection::rate_sensitivity(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}
