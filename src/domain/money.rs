use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by a minor currency unit (cents).
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Largest minor-unit count that survives a trip through an `f64` JSON number.
///
/// Canonical amounts are exchanged as JSON numbers, which most JSON stacks
/// (including `serde_json` without `arbitrary_precision`) parse as `f64`.
pub const MAX_EXACT_MINOR_UNITS: i64 = (1 << 53) - 1;

/// Largest major-unit amount accepted from callers (`90071992547409.91`).
pub fn max_exact_amount() -> Decimal {
    from_minor_units(MAX_EXACT_MINOR_UNITS)
}

/// Converts a major-unit amount into minor units.
///
/// Exact for every amount with at most two decimal places; anything finer is
/// rounded half away from zero. Returns `None` when the result does not fit in
/// an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Converts minor units back into a major-unit amount. Always exact.
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_UNIT_SCALE)
}
