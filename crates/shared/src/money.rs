//! Conversions between dollar amounts and the provider's minor units.

/// Converts a dollar amount into cents, rounding half away from zero.
pub fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
