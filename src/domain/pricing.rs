use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;

use super::dates::{is_weekend_night, DateRange};
use super::money::round_cents;

/// Friday and Saturday nights cost 20% more.
fn weekend_multiplier() -> &'static BigDecimal {
    static MULTIPLIER: OnceLock<BigDecimal> = OnceLock::new();
    MULTIPLIER.get_or_init(|| BigDecimal::from_str("1.20").expect("literal decimal"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NightlyRate {
    pub night: NaiveDate,
    pub amount: BigDecimal,
    pub weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub nights: Vec<NightlyRate>,
    pub subtotal: BigDecimal,
}

/// Price a stay night by night.
///
/// Each night is rounded to cents on its own before summation, so long stays
/// accumulate no rounding drift; the subtotal is exactly the sum of the
/// itemized nights. Deterministic: the same rate and range always produce
/// the same quote. A zero-night range cannot reach here, `DateRange`
/// construction already rejects it.
pub fn quote(base_rate: &BigDecimal, range: &DateRange) -> Quote {
    let mut nights = Vec::with_capacity(range.num_nights() as usize);
    let mut subtotal = BigDecimal::from(0);
    for night in range.nights() {
        let weekend = is_weekend_night(night);
        let amount = if weekend {
            round_cents(&(base_rate * weekend_multiplier()))
        } else {
            round_cents(base_rate)
        };
        subtotal += &amount;
        nights.push(NightlyRate {
            night,
            amount,
            weekend,
        });
    }
    Quote { nights, subtotal }
}
