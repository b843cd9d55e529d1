use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use loan_core::chart::{self, ChartCurve, ChartInput};
use loan_core::projection::{AmortizationInput, SensitivityInput};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Curve {
    Amortization,
    RateSensitivity,
}

/// Arguments for chart rendering
#[derive(Args)]
pub struct ChartArgs {
    /// Which curve to render
    #[arg(long, value_enum)]
    pub curve: Option<Curve>,

    /// Device canvas width in pixels
    #[arg(long, default_value = "640")]
    pub width: Decimal,

    /// Device canvas height in pixels
    #[arg(long, default_value = "480")]
    pub height: Decimal,

    /// Starting principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (amortization curve)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Monthly payment (amortization curve)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Sweep lower bound, annual % (sensitivity curve)
    #[arg(long, default_value = "0")]
    pub rate_min: Decimal,

    /// Sweep upper bound, annual % (sensitivity curve)
    #[arg(long, default_value = "24")]
    pub rate_max: Decimal,

    /// Sweep step, annual percentage points (sensitivity curve)
    #[arg(long, default_value = "0.125")]
    pub rate_step: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let chart_input: ChartInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let curve = match args.curve.ok_or("--curve is required (or provide --input)")? {
            Curve::Amortization => ChartCurve::Amortization(AmortizationInput {
                principal: args
                    .principal
                    .ok_or("--principal is required for the amortization curve")?,
                annual_rate_pct: args
                    .annual_rate_pct
                    .ok_or("--annual-rate-pct is required for the amortization curve")?,
                payment: args
                    .payment
                    .ok_or("--payment is required for the amortization curve")?,
                term_months: args
                    .term_months
                    .ok_or("--term-months is required for the amortization curve")?,
            }),
            Curve::RateSensitivity => ChartCurve::RateSensitivity(SensitivityInput {
                principal: args
                    .principal
                    .ok_or("--principal is required for the sensitivity curve")?,
                term_months: args
                    .term_months
                    .ok_or("--term-months is required for the sensitivity curve")?,
                rate_min_pct: args.rate_min,
                rate_max_pct: args.rate_max,
                rate_step_pct: args.rate_step,
            }),
        };
        ChartInput {
            curve,
            width: args.width,
            height: args.height,
        }
    };
    let result = chart::render_chart(&chart_input)?;
    Ok(serde_json::to_value(result)?)
}
