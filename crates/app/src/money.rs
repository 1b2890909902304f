//! Monetary amounts.
//!
//! Every amount is a [`Decimal`] with two fractional digits, matching the
//! `NUMERIC(10, 2)` columns it is stored in. Arithmetic is exact; only the
//! final value is quantized, always with the same rounding strategy.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for every stored amount.
pub const MONEY_SCALE: u32 = 2;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Quantize an amount to [`MONEY_SCALE`] fractional digits.
#[must_use]
pub fn quantize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, ROUNDING);

    rounded.rescale(MONEY_SCALE);

    rounded
}

/// Line subtotal: unit price times quantity, quantized.
#[must_use]
pub fn line_subtotal(price: Decimal, quantity: u32) -> Decimal {
    quantize(price * Decimal::from(quantity))
}

/// Sum a set of amounts exactly and quantize the result once.
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    quantize(amounts.into_iter().sum())
}
