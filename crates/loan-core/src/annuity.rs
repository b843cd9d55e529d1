//! Annuity-immediate present value and cent rounding.
//!
//! The present-value factor here is the single formula the rest of the loan
//! model leans on: every solve except term-from-payment routes through it.
//! All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

const CENTS_PER_UNIT: Decimal = dec!(100);

/// Present value of an ordinary annuity paying 1.0 at the end of each of
/// `periods` periods, discounted at `rate` per period.
///
/// A negative rate is out of domain and returns zero rather than erroring;
/// a zero rate degenerates to `periods` (no discounting). For positive
/// rates this is the standard annuity-immediate factor
/// `(1 - (1 + i)^-n) / i`.
pub fn pv_ordinary_annuity(rate: Rate, periods: u32) -> Money {
    if rate < Decimal::ZERO {
        return Decimal::ZERO;
    }
    if rate.is_zero() {
        return Decimal::from(periods);
    }

    let v_to_the_n = (Decimal::ONE + rate).powd(-Decimal::from(periods));
    (Decimal::ONE - v_to_the_n) / rate
}

/// Round up to the next-highest cent: the smallest multiple of 0.01 that is
/// >= `x`. Decimal ceiling is exact, so multiples of a cent are unchanged.
pub fn round_up_to_cent(x: Money) -> Money {
    (x * CENTS_PER_UNIT).ceil() / CENTS_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    // -----------------------------------------------------------------------
    // 1. Zero rate degenerates to the period count
    // -----------------------------------------------------------------------
    #[test]
    fn test_pv_zero_rate_is_period_count() {
        assert_eq!(pv_ordinary_annuity(dec!(0), 0), dec!(0));
        assert_eq!(pv_ordinary_annuity(dec!(0), 1), dec!(1));
        assert_eq!(pv_ordinary_annuity(dec!(0), 360), dec!(360));
    }

    // -----------------------------------------------------------------------
    // 2. Negative rate is out of domain and returns zero
    // -----------------------------------------------------------------------
    #[test]
    fn test_pv_negative_rate_is_zero() {
        assert_eq!(pv_ordinary_annuity(dec!(-0.01), 12), dec!(0));
    }

    // -----------------------------------------------------------------------
    // 3. Discounting strictly reduces value
    // -----------------------------------------------------------------------
    #[test]
    fn test_pv_discounting_reduces_value() {
        for (rate, n) in [(dec!(0.0001), 12u32), (dec!(0.01), 360), (dec!(0.5), 5)] {
            let pv = pv_ordinary_annuity(rate, n);
            assert!(
                pv < Decimal::from(n),
                "pv({rate}, {n}) = {pv} should be below {n}"
            );
            assert!(pv > Decimal::ZERO, "pv({rate}, {n}) should be positive");
        }
    }

    // -----------------------------------------------------------------------
    // 4. Known factor: 30y at 3.5%/12 per month
    // -----------------------------------------------------------------------
    #[test]
    fn test_pv_standard_mortgage_factor() {
        let monthly = dec!(3.5) / dec!(1200);
        let factor = pv_ordinary_annuity(monthly, 360);
        // 200000 / factor ~ 898.0893756176412
        let payment = dec!(200000) / factor;
        let diff = (payment - dec!(898.0893756176412)).abs();
        assert!(diff < dec!(0.0001), "payment off by {diff}");
    }

    // -----------------------------------------------------------------------
    // 5. Round up to cent
    // -----------------------------------------------------------------------
    #[test]
    fn test_round_up_to_cent() {
        assert_eq!(round_up_to_cent(dec!(898.0893756176412)), dec!(898.09));
        assert_eq!(round_up_to_cent(dec!(898.091)), dec!(898.10));
        assert_eq!(round_up_to_cent(dec!(898.00)), dec!(898.00));
        assert_eq!(round_up_to_cent(dec!(0.001)), dec!(0.01));
        assert_eq!(round_up_to_cent(dec!(0)), dec!(0));
    }
}
