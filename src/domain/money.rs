use std::str::FromStr;

use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// Round an amount to the currency's minor unit (cents), half-up.
///
/// Every derived amount in the core is rounded independently with this
/// function before it is ever summed into another amount, so itemized lines
/// always reconcile with the totals built from them.
pub fn round_cents(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Parse a decimal amount received on the wire, e.g. "199.99".
///
/// Amounts travel as strings to keep floating point out of currency math.
pub fn parse_amount(raw: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(raw)
        .map_err(|e| DomainError::InvalidInput(format!("invalid amount '{raw}': {e}")))
}

/// Percentage of `base` at a fractional `rate` (e.g. 0.0400 for 4%),
/// rounded to cents.
pub fn fraction_of(base: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    round_cents(&(base * rate))
}
