use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for Ringgit amounts
pub const CENT_SCALE: u32 = 2;

/// Tolerance (in cents) before a schedule/total mismatch is surfaced as a warning
pub const DRIFT_TOLERANCE_CENTS: i64 = 5;

/// Convert a decimal amount to integer minor units (cents)
///
/// Values with sub-cent precision are rounded half-up to the nearest cent
/// before conversion, so `10.005` becomes `1001` cents.
pub fn to_cents(amount: Decimal) -> i64 {
    let rounded = amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    (rounded * Decimal::ONE_HUNDRED).to_i64().unwrap_or(0)
}

/// Convert integer minor units (cents) back to a decimal amount
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, CENT_SCALE)
}

/// Round an amount to cent precision (half-up)
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display as Ringgit
pub fn format_rm(amount: Decimal) -> String {
    format!("RM {:.2}", round_to_cents(amount))
}

/// Difference between a schedule's actual sum and its stated total, when
/// the drift is large enough to warrant a warning
///
/// Returns `None` while the drift stays below the cent-level tolerance.
/// The caller surfaces this as a non-blocking warning, never a hard
/// validation failure.
pub fn drift_warning(actual_sum: Decimal, stated_total: Decimal) -> Option<Decimal> {
    let drift_cents = to_cents(actual_sum) - to_cents(stated_total);
    if drift_cents.abs() >= DRIFT_TOLERANCE_CENTS {
        Some(from_cents(drift_cents))
    } else {
        None
    }
}
