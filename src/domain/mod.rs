pub mod availability;
pub mod booking;
pub mod checkout;
pub mod dates;
pub mod errors;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod promo;
pub mod tax;
