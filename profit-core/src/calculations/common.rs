//! Common utility functions for profit calculations.
//!
//! Every ratio the engine reports goes through [`ratio`] so that a zero
//! denominator or an overflowing operation resolves to zero in exactly one
//! place. Rounding helpers are for the presentation boundary only; the
//! calculators themselves keep full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// One hundred, the percentage scale.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Months in a year, used to turn annual rates into monthly charges.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Collapses the outcome of a checked operation, mapping overflow to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::or_zero;
///
/// assert_eq!(or_zero(dec!(2).checked_add(dec!(3))), dec!(5));
/// assert_eq!(or_zero(Decimal::MAX.checked_add(Decimal::ONE)), Decimal::ZERO);
/// ```
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Divides `numerator` by `denominator`, returning zero when the division
/// is degenerate (zero denominator or overflow).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::ratio;
///
/// assert_eq!(ratio(dec!(1), dec!(4)), dec!(0.25));
/// assert_eq!(ratio(dec!(1), dec!(0)), dec!(0));
/// ```
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    or_zero(numerator.checked_div(denominator))
}

/// Expresses `value` as a percentage of `revenue`.
///
/// Returns zero whenever `revenue` is zero. This is the single
/// percentage-of-revenue policy shared by the engine, the reports and the
/// health indicators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::percentage_of_revenue;
///
/// assert_eq!(percentage_of_revenue(dec!(5000), dec!(20000)), dec!(25));
/// assert_eq!(percentage_of_revenue(dec!(5000), dec!(0)), dec!(0));
/// ```
pub fn percentage_of_revenue(
    value: Decimal,
    revenue: Decimal,
) -> Decimal {
    or_zero(ratio(value, revenue).checked_mul(HUNDRED))
}

/// Percentage change from `old` to `new`, measured against `|old|`.
///
/// Dividing by the magnitude keeps the sign meaningful when the old figure
/// is negative: a rise is always positive. Zero when `old` is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::percentage_change;
///
/// assert_eq!(percentage_change(dec!(110), dec!(100)), dec!(10));
/// assert_eq!(percentage_change(dec!(-50), dec!(-100)), dec!(50));
/// assert_eq!(percentage_change(dec!(10), dec!(0)), dec!(0));
/// ```
pub fn percentage_change(
    new: Decimal,
    old: Decimal,
) -> Decimal {
    let delta = or_zero(new.checked_sub(old));
    or_zero(ratio(delta, old.abs()).checked_mul(HUNDRED))
}

/// Applies a percentage variation to a base figure, flooring the result at zero.
///
/// `pct` is expressed in percent, so `5` means +5% and `-100` wipes the
/// figure out. A variation below -100% would make the figure negative and
/// is clamped to zero instead.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::apply_pct;
///
/// assert_eq!(apply_pct(dec!(30000), dec!(10)), dec!(33000));
/// assert_eq!(apply_pct(dec!(30000), dec!(-150)), dec!(0));
/// ```
pub fn apply_pct(
    base: Decimal,
    pct: Decimal,
) -> Decimal {
    let factor = or_zero(Decimal::ONE.checked_add(ratio(pct, HUNDRED)));
    max(or_zero(base.checked_mul(factor)), Decimal::ZERO)
}

/// Converts an annual percentage rate applied to `value` into a monthly charge.
///
/// Computes `value × annual_pct / 100 / 12` with a single division so that
/// repeating fractions are carried at full precision.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::{monthly_charge, round_half_up};
///
/// assert_eq!(monthly_charge(dec!(1000000), dec!(12)), dec!(10000));
/// assert_eq!(round_half_up(monthly_charge(dec!(100000), dec!(10))), dec!(833.33));
/// ```
pub fn monthly_charge(
    value: Decimal,
    annual_pct: Decimal,
) -> Decimal {
    let annual = or_zero(value.checked_mul(annual_pct));
    ratio(annual, HUNDRED * MONTHS_PER_YEAR)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero). Used for monetary figures
/// at the presentation boundary.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to one decimal place, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use profit_core::calculations::common::round_percentage;
///
/// assert_eq!(round_percentage(dec!(16.666)), dec!(16.7));
/// assert_eq!(round_percentage(dec!(-0.05)), dec!(-0.1));
/// ```
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // ratio tests
    // =========================================================================

    #[test]
    fn ratio_divides_normally() {
        assert_eq!(ratio(dec!(1000), dec!(8000)), dec!(0.125));
    }

    #[test]
    fn ratio_returns_zero_for_zero_denominator() {
        assert_eq!(ratio(dec!(25000), dec!(0)), dec!(0));
    }

    #[test]
    fn ratio_returns_zero_for_negative_zero_denominator() {
        assert_eq!(ratio(dec!(25000), dec!(-0.00)), dec!(0));
    }

    #[test]
    fn ratio_returns_zero_on_overflow() {
        assert_eq!(ratio(Decimal::MAX, dec!(0.1)), dec!(0));
    }

    // =========================================================================
    // percentage_of_revenue tests
    // =========================================================================

    #[test]
    fn percentage_of_revenue_scales_to_percent() {
        assert_eq!(percentage_of_revenue(dec!(7000), dec!(28000)), dec!(25));
    }

    #[test]
    fn percentage_of_revenue_handles_negative_values() {
        assert_eq!(percentage_of_revenue(dec!(-3000), dec!(30000)), dec!(-10));
    }

    #[test]
    fn percentage_of_revenue_is_zero_without_revenue() {
        assert_eq!(percentage_of_revenue(dec!(-3000), dec!(0)), dec!(0));
        assert_eq!(percentage_of_revenue(dec!(0), dec!(0)), dec!(0));
    }

    // =========================================================================
    // percentage_change tests
    // =========================================================================

    #[test]
    fn percentage_change_reports_decrease_as_negative() {
        assert_eq!(percentage_change(dec!(4000), dec!(5000)), dec!(-20));
    }

    #[test]
    fn percentage_change_uses_magnitude_of_negative_base() {
        // -200 -> -100 is an improvement of half the original loss.
        assert_eq!(percentage_change(dec!(-100), dec!(-200)), dec!(50));
    }

    #[test]
    fn percentage_change_is_zero_for_zero_base() {
        assert_eq!(percentage_change(dec!(100), dec!(0)), dec!(0));
    }

    // =========================================================================
    // apply_pct tests
    // =========================================================================

    #[test]
    fn apply_pct_increases_base() {
        assert_eq!(apply_pct(dec!(5000), dec!(5)), dec!(5250));
    }

    #[test]
    fn apply_pct_decreases_base() {
        assert_eq!(apply_pct(dec!(18000), dec!(-10)), dec!(16200));
    }

    #[test]
    fn apply_pct_zero_variation_is_identity() {
        assert_eq!(apply_pct(dec!(18000), dec!(0)), dec!(18000));
    }

    #[test]
    fn apply_pct_minus_hundred_yields_zero() {
        assert_eq!(apply_pct(dec!(18000), dec!(-100)), dec!(0));
    }

    #[test]
    fn apply_pct_clamps_below_minus_hundred() {
        for pct in [dec!(-100.01), dec!(-150), dec!(-1000)] {
            let result = apply_pct(dec!(18000), pct);

            assert_eq!(result, dec!(0));
            assert!(result >= Decimal::ZERO);
        }
    }

    #[test]
    fn apply_pct_clamps_negative_base() {
        assert_eq!(apply_pct(dec!(-500), dec!(10)), dec!(0));
    }

    // =========================================================================
    // monthly_charge tests
    // =========================================================================

    #[test]
    fn monthly_charge_spreads_annual_rate() {
        assert_eq!(monthly_charge(dec!(120000), dec!(10)), dec!(1000));
    }

    #[test]
    fn monthly_charge_keeps_full_precision() {
        let result = monthly_charge(dec!(500000), dec!(4));

        assert_eq!(round_half_up(result), dec!(1666.67));
        assert!(result > dec!(1666.666) && result < dec!(1666.667));
    }

    #[test]
    fn monthly_charge_allows_negative_value() {
        assert_eq!(monthly_charge(dec!(-120000), dec!(10)), dec!(-1000));
    }

    // =========================================================================
    // rounding tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    #[test]
    fn round_percentage_keeps_one_place() {
        assert_eq!(round_percentage(dec!(83.3333)), dec!(83.3));
        assert_eq!(round_percentage(dec!(23.35)), dec!(23.4));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_values() {
        assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
    }
}
