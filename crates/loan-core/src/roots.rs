//! Generic bisection root finding on a bracketed interval.
//!
//! The target function is an ordinary closure, so one finder serves any
//! equation the loan model needs to invert. A bracket with no sign change
//! is an error; running out of iterations is not — bisection's error bound
//! after N halvings is `(upper - lower) / 2^N`, so the last midpoint is
//! still the best available estimate and is returned flagged as such.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// How a bisection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStatus {
    /// The midpoint satisfied the tolerance (or hit the root exactly).
    Converged,
    /// The iteration cap ran out first; `root` is the last midpoint, good
    /// to within `(upper - lower) / 2^max_iterations` of the true root.
    IterationCapReached,
}

/// Result of a bisection search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFind {
    pub root: Decimal,
    pub iterations: u32,
    pub status: RootStatus,
}

/// Sign of `t`: -1, 0, or +1.
pub fn sign(t: Decimal) -> i8 {
    if t < Decimal::ZERO {
        -1
    } else if t > Decimal::ZERO {
        1
    } else {
        0
    }
}

/// Find a root of `f` on `[lower, upper]` by bisection.
///
/// Requires a sign change across the bracket; same-sign endpoints return
/// `LoanError::NoRootBracketed`. Stops when `f` hits zero exactly or the
/// half-width drops below `tol`, accepting the midpoint.
pub fn bisect<F>(
    lower: Decimal,
    upper: Decimal,
    f: F,
    tol: Decimal,
    max_iterations: u32,
) -> LoanResult<RootFind>
where
    F: Fn(Decimal) -> Decimal,
{
    if upper <= lower {
        return Err(LoanError::InvalidInput {
            field: "bracket".into(),
            reason: format!("Lower bound {lower} must be below upper bound {upper}"),
        });
    }
    if tol <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "tol".into(),
            reason: "Tolerance must be positive".into(),
        });
    }

    let mut lo = lower;
    let mut hi = upper;
    let mut f_lo = f(lo);

    if sign(f_lo) == sign(f(hi)) {
        return Err(LoanError::NoRootBracketed { lower, upper });
    }

    let two = Decimal::TWO;
    let mut mid = (lo + hi) / two;

    for iteration in 1..=max_iterations {
        mid = (lo + hi) / two;
        let f_mid = f(mid);

        if f_mid.is_zero() || (hi - lo) / two < tol {
            return Ok(RootFind {
                root: mid,
                iterations: iteration,
                status: RootStatus::Converged,
            });
        }

        if sign(f_mid) == sign(f_lo) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Ok(RootFind {
        root: mid,
        iterations: max_iterations,
        status: RootStatus::IterationCapReached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.000001);

    // -----------------------------------------------------------------------
    // 1. sqrt(2) from x^2 - 2 on [0, 2]
    // -----------------------------------------------------------------------
    #[test]
    fn test_bisect_sqrt_two() {
        let out = bisect(dec!(0), dec!(2), |x| x * x - dec!(2), TOL, 100).unwrap();
        assert_eq!(out.status, RootStatus::Converged);
        let diff = (out.root - dec!(1.41421356)).abs();
        assert!(diff < TOL * dec!(2), "root {} off by {}", out.root, diff);
    }

    // -----------------------------------------------------------------------
    // 2. Cube root of 6 from x^3 - 6 on [0, 2]
    // -----------------------------------------------------------------------
    #[test]
    fn test_bisect_cbrt_six() {
        let out = bisect(dec!(0), dec!(2), |x| x * x * x - dec!(6), TOL, 100).unwrap();
        assert_eq!(out.status, RootStatus::Converged);
        let diff = (out.root - dec!(1.81712059)).abs();
        assert!(diff < TOL * dec!(2), "root {} off by {}", out.root, diff);
    }

    // -----------------------------------------------------------------------
    // 3. Same-sign endpoints do not bracket a root
    // -----------------------------------------------------------------------
    #[test]
    fn test_bisect_no_sign_change() {
        let result = bisect(dec!(3), dec!(4), |x| x * x - dec!(2), TOL, 100);
        assert!(matches!(
            result,
            Err(LoanError::NoRootBracketed { lower, upper })
                if lower == dec!(3) && upper == dec!(4)
        ));
    }

    // -----------------------------------------------------------------------
    // 4. Iteration cap returns the best estimate, not an error
    // -----------------------------------------------------------------------
    #[test]
    fn test_bisect_iteration_cap_best_estimate() {
        let out = bisect(dec!(0), dec!(2), |x| x * x - dec!(2), TOL, 3).unwrap();
        assert_eq!(out.status, RootStatus::IterationCapReached);
        assert_eq!(out.iterations, 3);
        // Error bound after 3 halvings of a width-2 bracket is 0.25.
        let diff = (out.root - dec!(1.41421356)).abs();
        assert!(diff <= dec!(0.25), "estimate {} off by {}", out.root, diff);
    }

    // -----------------------------------------------------------------------
    // 5. Degenerate bracket is rejected
    // -----------------------------------------------------------------------
    #[test]
    fn test_bisect_inverted_bracket() {
        let result = bisect(dec!(2), dec!(0), |x| x, TOL, 100);
        assert!(matches!(result, Err(LoanError::InvalidInput { .. })));
    }

    // -----------------------------------------------------------------------
    // 6. Sign helper
    // -----------------------------------------------------------------------
    #[test]
    fn test_sign() {
        assert_eq!(sign(dec!(-0.5)), -1);
        assert_eq!(sign(dec!(0)), 0);
        assert_eq!(sign(dec!(0.5)), 1);
    }
}
