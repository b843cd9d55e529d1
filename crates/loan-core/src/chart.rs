//! Graphing entry point: turn a projection into device-space segments.
//!
//! The caller supplies a device canvas size; this module runs the selected
//! projection, derives model-space bounds from it, and maps the curve
//! through the viewport transform. What comes back is ready to stroke.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanError;
use crate::geometry::{AffineTransform, Line, Point, PolyLine};
use crate::projection::{
    amortization_curve, rate_sensitivity, AmortizationInput, SensitivityInput,
};
use crate::types::{with_metadata, ComputationOutput};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Which projection to plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChartCurve {
    /// Months on x, remaining balance on y.
    Amortization(AmortizationInput),
    /// Annual rate (%) on x, payment on y.
    RateSensitivity(SensitivityInput),
}

/// Chart rendering input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartInput {
    /// Curve to render.
    pub curve: ChartCurve,
    /// Device canvas width in pixels.
    pub width: Decimal,
    /// Device canvas height in pixels.
    pub height: Decimal,
}

/// Chart rendering output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOutput {
    /// Device-space segments to stroke, in curve order.
    pub segments: Vec<Line>,
    /// Model-space x bound the viewport was built from.
    pub x_max: Decimal,
    /// Model-space y bound the viewport was built from.
    pub y_max: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render the selected curve into device-space line segments.
pub fn render_chart(input: &ChartInput) -> LoanResult<ComputationOutput<ChartOutput>> {
    let start = Instant::now();
    validate_chart(input)?;

    let (polyline, x_max, y_max, methodology, mut warnings) = match &input.curve {
        ChartCurve::Amortization(proj) => {
            let out = amortization_curve(proj)?;
            let points: Vec<Point> = out
                .result
                .points
                .iter()
                .map(|p| Point::new(Decimal::from(p.period), p.balance.max(Decimal::ZERO)))
                .collect();
            (
                PolyLine::new(points)?,
                Decimal::from(proj.term_months),
                proj.principal,
                "Amortization curve mapped to device space",
                out.warnings,
            )
        }
        ChartCurve::RateSensitivity(proj) => {
            let out = rate_sensitivity(proj)?;
            let y_max = out
                .result
                .points
                .iter()
                .map(|p| p.payment)
                .max()
                .unwrap_or(Decimal::ZERO);
            let points: Vec<Point> = out
                .result
                .points
                .iter()
                .map(|p| Point::new(p.annual_rate_pct, p.payment))
                .collect();
            (
                PolyLine::new(points)?,
                proj.rate_max_pct,
                y_max,
                "Rate-sensitivity curve mapped to device space",
                out.warnings,
            )
        }
    };

    let transform = AffineTransform::viewport(x_max, y_max, input.width, input.height);
    if x_max <= Decimal::ZERO || y_max <= Decimal::ZERO {
        warnings.push("Degenerate model bounds; curve collapsed to the origin".into());
    }

    let device = transform.apply_polyline(&polyline);
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        input,
        warnings,
        elapsed,
        ChartOutput {
            segments: device.segments(),
            x_max,
            y_max,
        },
    ))
}

fn validate_chart(input: &ChartInput) -> LoanResult<()> {
    if input.width <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "width".into(),
            reason: "Canvas width must be positive".into(),
        });
    }
    if input.height <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "height".into(),
            reason: "Canvas height must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // 720/360 and 480/200000 divide exactly, keeping corner checks exact.
    fn amortization_chart() -> ChartInput {
        ChartInput {
            curve: ChartCurve::Amortization(AmortizationInput {
                principal: dec!(200000),
                annual_rate_pct: dec!(3.5),
                payment: dec!(898.09),
                term_months: 360,
            }),
            width: dec!(720),
            height: dec!(480),
        }
    }

    // -----------------------------------------------------------------------
    // 1. Amortization chart spans the canvas
    // -----------------------------------------------------------------------
    #[test]
    fn test_amortization_chart_bounds() {
        let out = render_chart(&amortization_chart()).unwrap();
        let chart = &out.result;
        assert_eq!(chart.x_max, dec!(360));
        assert_eq!(chart.y_max, dec!(200000));
        assert!(!chart.segments.is_empty());

        // Origination point: full balance at month 0 renders at the top left.
        let first = chart.segments[0].start;
        assert_eq!(first.x, dec!(0));
        assert_eq!(first.y, dec!(0));

        // Every device coordinate stays on the canvas.
        for seg in &chart.segments {
            for p in [seg.start, seg.end] {
                assert!(p.x >= dec!(0) && p.x <= dec!(720), "x {} off canvas", p.x);
                assert!(p.y >= dec!(0) && p.y <= dec!(480), "y {} off canvas", p.y);
            }
        }
    }

    // -----------------------------------------------------------------------
    // 2. Balance decay renders downward-left-to-right
    // -----------------------------------------------------------------------
    #[test]
    fn test_amortization_chart_direction() {
        let out = render_chart(&amortization_chart()).unwrap();
        let segments = &out.result.segments;
        let first = segments.first().unwrap();
        let last = segments.last().unwrap();
        // Device y grows downward, so a shrinking balance moves down.
        assert!(last.end.y > first.start.y);
        assert!(last.end.x > first.start.x);
    }

    // -----------------------------------------------------------------------
    // 3. Sensitivity chart uses the sweep's own bounds
    // -----------------------------------------------------------------------
    #[test]
    fn test_sensitivity_chart_bounds() {
        let input = ChartInput {
            curve: ChartCurve::RateSensitivity(SensitivityInput {
                principal: dec!(200000),
                term_months: 360,
                rate_min_pct: dec!(0),
                rate_max_pct: dec!(24),
                rate_step_pct: dec!(0.125),
            }),
            width: dec!(600),
            height: dec!(480),
        };
        let out = render_chart(&input).unwrap();
        let chart = &out.result;
        assert_eq!(chart.x_max, dec!(24));
        assert_eq!(chart.segments.len(), 192);

        // Highest payment (top rate) renders at the top right corner;
        // y carries division round-off, so compare within a hair.
        let last = chart.segments.last().unwrap().end;
        assert_eq!(last.x, dec!(600));
        assert!(last.y.abs() < dec!(0.000001), "top-right y {} not ~0", last.y);
    }

    // -----------------------------------------------------------------------
    // 4. Canvas dimensions are validated
    // -----------------------------------------------------------------------
    #[test]
    fn test_canvas_validation() {
        let mut input = amortization_chart();
        input.width = dec!(0);
        assert!(render_chart(&input).is_err());
    }
}
