use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::money::{fraction_of, round_cents};
use super::tax::TaxRates;

/// One itemized tax or fee line: the rate as a percentage of the taxable
/// base, and the independently rounded amount it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLine {
    pub rate: BigDecimal,
    pub amount: BigDecimal,
}

/// The auditable charge breakdown presented at checkout.
///
/// Invariant: `total` is built by summing exactly the rounded line values
/// carried here, never re-derived by another formula, so displayed lines
/// always add up to the displayed total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeBreakdown {
    pub subtotal: BigDecimal,
    pub discount_amount: BigDecimal,
    pub taxable_base: BigDecimal,
    pub state_tax: TaxLine,
    pub county_tax: TaxLine,
    pub city_tax: TaxLine,
    pub resort_fee: TaxLine,
    pub total: BigDecimal,
}

fn percent(rate: &BigDecimal) -> BigDecimal {
    round_cents(&(rate * BigDecimal::from(100)))
}

/// Compose discount and taxes into one breakdown.
///
/// The order is fixed and not reorderable: taxes apply to the post-discount
/// base, as U.S. jurisdictions require. Every line is rounded to cents on
/// its own before the total sums them.
pub fn compute(
    subtotal: &BigDecimal,
    discount_amount: &BigDecimal,
    rates: &TaxRates,
) -> ChargeBreakdown {
    let subtotal = round_cents(subtotal);
    let discount_amount = round_cents(discount_amount);
    let taxable_base = &subtotal - &discount_amount;

    let line = |rate: &BigDecimal| TaxLine {
        rate: percent(rate),
        amount: fraction_of(&taxable_base, rate),
    };
    let state_tax = line(&rates.state_sales_tax);
    let county_tax = line(&rates.county_occupancy_tax);
    let city_tax = line(&rates.city_occupancy_tax);
    let resort_fee = line(&rates.resort_fee);

    let total = &taxable_base
        + &state_tax.amount
        + &county_tax.amount
        + &city_tax.amount
        + &resort_fee.amount;

    ChargeBreakdown {
        subtotal,
        discount_amount,
        taxable_base,
        state_tax,
        county_tax,
        city_tax,
        resort_fee,
        total,
    }
}

/// Invoice number in the `INV-YYYYMMDD-XXXX` format the front desk prints.
pub fn invoice_number(today: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string()[..4].to_uppercase();
    format!("INV-{}-{}", today.format("%Y%m%d"), suffix)
}
