//! Demo seed data: a handful of rooms, the sample U.S. jurisdictions, and
//! the promo codes the front desk hands out. Real deployments source these
//! from the rate administration and promotions collaborators.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::booking::{Room, RoomStatus};
use crate::domain::promo::{DiscountKind, PromoCode};
use crate::domain::tax::{TaxConfig, TaxRates};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("literal decimal")
}

pub fn rooms() -> Vec<Room> {
    let room = |number: &str, rate: &str, status: RoomStatus| Room {
        id: Uuid::new_v4(),
        number: number.to_string(),
        base_rate: dec(rate),
        status,
    };
    vec![
        room("101", "100.00", RoomStatus::Available),
        room("102", "100.00", RoomStatus::Available),
        room("201", "150.00", RoomStatus::Available),
        room("202", "150.00", RoomStatus::Cleaning),
        room("301", "250.00", RoomStatus::Available),
        room("302", "250.00", RoomStatus::Maintenance),
    ]
}

pub fn tax_configs() -> Vec<TaxConfig> {
    let config = |state: &str, county: &str, city: &str, rates: [&str; 4]| TaxConfig {
        state_code: state.to_string(),
        county: county.to_string(),
        city: city.to_string(),
        rates: TaxRates {
            state_sales_tax: dec(rates[0]),
            county_occupancy_tax: dec(rates[1]),
            city_occupancy_tax: dec(rates[2]),
            resort_fee: dec(rates[3]),
        },
    };
    vec![
        // 4% state sales, 5.75% county hotel, 3.75% city hotel, 2% resort fee
        config(
            "NY",
            "New York",
            "New York",
            ["0.0400", "0.0575", "0.0375", "0.0200"],
        ),
        config(
            "CA",
            "Los Angeles",
            "Los Angeles",
            ["0.0725", "0.0200", "0.1400", "0.0150"],
        ),
        config(
            "FL",
            "Miami-Dade",
            "Miami",
            ["0.0600", "0.0600", "0.0200", "0.0300"],
        ),
        config(
            "TX",
            "Harris",
            "Houston",
            ["0.0625", "0.0200", "0.0700", "0.0100"],
        ),
    ]
}

pub fn promo_codes() -> Vec<PromoCode> {
    vec![
        PromoCode {
            code: "SAVE10".into(),
            description: "10% off your stay".into(),
            kind: DiscountKind::Percent,
            value: dec("10"),
            minimum_order: None,
            expires_on: None,
        },
        PromoCode {
            code: "AARP15".into(),
            description: "AARP senior discount, 15% off".into(),
            kind: DiscountKind::Percent,
            value: dec("15"),
            minimum_order: None,
            expires_on: None,
        },
        PromoCode {
            code: "MILITARY20".into(),
            description: "Military and veterans discount, 20% off".into(),
            kind: DiscountKind::Percent,
            value: dec("20"),
            minimum_order: None,
            expires_on: None,
        },
        PromoCode {
            code: "CORP50".into(),
            description: "Corporate rate, $50 off stays over $200".into(),
            kind: DiscountKind::Flat,
            value: dec("50"),
            minimum_order: Some(dec("200")),
            expires_on: None,
        },
        PromoCode {
            code: "WINTER24".into(),
            description: "Winter special, 15% off".into(),
            kind: DiscountKind::Percent,
            value: dec("15"),
            minimum_order: None,
            expires_on: NaiveDate::from_ymd_opt(2024, 12, 31),
        },
    ]
}
