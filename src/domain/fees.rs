use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Fees are kept with two decimal places
pub const FEE_SCALE: u32 = 2;

/// Late fee per late day, as a fraction of the book price
pub const LATE_FEE_RATE: Decimal = dec!(0.15);

/// Round half-up to exactly `FEE_SCALE` places.
///
/// Fees are never negative, so rounding midpoints away from zero is half-up.
/// Rounding only lowers the scale; `rescale` pads `70` to `70.00`.
fn round_fee(amount: Decimal) -> Decimal {
    let mut fee =
        amount.round_dp_with_strategy(FEE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    fee.rescale(FEE_SCALE);
    fee
}

/// Zero with the fee scale, so it renders as `0.00`
pub fn zero_fee() -> Decimal {
    Decimal::new(0, FEE_SCALE)
}

/// Rental fee for the whole period: `daily_rate * rental_days`
pub fn total_fee(daily_rate: Decimal, rental_days: u32) -> Decimal {
    round_fee(daily_rate * Decimal::from(rental_days))
}

/// Late fee: 15% of the book price for every late day, linear in days
pub fn late_fee(book_price: Decimal, days_late: i64) -> Decimal {
    if days_late <= 0 {
        return zero_fee();
    }

    round_fee(book_price * LATE_FEE_RATE * Decimal::from(days_late))
}
