use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for clinic financial amounts (BRL)
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary amount to 2 decimal places, half-up.
///
/// Matches the `round(x * 100) / 100` arithmetic the billing routines rely
/// on: 550.005 rounds to 550.01, not 550.00.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that an amount is a usable monetary value
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount < Decimal::ZERO {
        return Err(format!("Amount cannot be negative, got {}", amount));
    }

    if amount.scale() > MONEY_SCALE {
        return Err(format!(
            "Amounts must have at most {} decimal places, got {}",
            MONEY_SCALE,
            amount.scale()
        ));
    }

    Ok(())
}
