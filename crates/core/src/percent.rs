//! Percentage helpers shared by budget comparisons and statistics.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept when a percentage is shown to the user.
pub const DISPLAY_SCALE: u32 = 1;

/// Returns `part / whole * 100`, or zero when `whole` is zero.
#[must_use]
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Rounds a percentage half away from zero and fixes its scale at one place,
/// so `50` serializes as `"50.0"`.
#[must_use]
pub fn for_display(percentage: Decimal) -> Decimal {
    let mut rounded =
        percentage.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ratio_percent() {
        assert_eq!(ratio_percent(dec!(150), dec!(300)), dec!(50));
        assert_eq!(ratio_percent(dec!(450), dec!(300)), dec!(150));
        assert_eq!(ratio_percent(dec!(10), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_for_display_pads_and_rounds() {
        assert_eq!(for_display(dec!(50)).to_string(), "50.0");
        assert_eq!(for_display(dec!(0)).to_string(), "0.0");
        assert_eq!(for_display(dec!(33.333333)).to_string(), "33.3");
        assert_eq!(for_display(dec!(66.66)).to_string(), "66.7");
        assert_eq!(for_display(dec!(12.25)).to_string(), "12.3");
    }
}
