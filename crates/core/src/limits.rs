//! Field limits shared with the storage schema.
//!
//! Text columns are `VARCHAR(n)`, which counts characters, and amounts are
//! `NUMERIC(19, 4)`.

use rust_decimal::Decimal;

/// Longest category or budget category name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Longest category icon, in characters.
pub const MAX_ICON_CHARS: usize = 32;

/// Decimal places a stored amount can carry.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Exclusive upper bound of a stored amount's magnitude: 10^15.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Returns true if `value` has at most `max` characters.
#[must_use]
pub fn within_chars(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// Returns true if `amount` can be stored without rounding or overflow.
///
/// Trailing zeros do not count against the scale, so `1.50000` fits.
#[must_use]
pub fn amount_fits(amount: Decimal) -> bool {
    amount.normalize().scale() <= MAX_AMOUNT_SCALE && amount.abs() < AMOUNT_LIMIT
}
