use std::collections::HashMap;

use bigdecimal::BigDecimal;

use super::errors::DomainError;

/// The (state, county, city) tuple used to look up applicable tax rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jurisdiction {
    pub state_code: String,
    pub county: String,
    pub city: String,
}

impl Jurisdiction {
    pub fn new(state_code: &str, county: &str, city: &str) -> Self {
        Self {
            state_code: state_code.trim().to_uppercase(),
            county: county.trim().to_lowercase(),
            city: city.trim().to_lowercase(),
        }
    }

    fn key(&self) -> (String, String, String) {
        (
            self.state_code.clone(),
            self.county.clone(),
            self.city.clone(),
        )
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.state_code, self.county, self.city)
    }
}

/// Applicable rates for one jurisdiction, stored as fractions of the
/// taxable base (0.0400 means 4%).
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRates {
    pub state_sales_tax: BigDecimal,
    pub county_occupancy_tax: BigDecimal,
    pub city_occupancy_tax: BigDecimal,
    pub resort_fee: BigDecimal,
}

/// One configured jurisdiction row, as supplied by the rate administration
/// collaborator.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    pub state_code: String,
    pub county: String,
    pub city: String,
    pub rates: TaxRates,
}

/// Read-only snapshot of configured tax rates, keyed by jurisdiction.
///
/// Lookups for jurisdictions with no configured row fail hard: silently
/// zero-rating a stay is a compliance bug, not a convenience default. There
/// is deliberately no mutation path; a new snapshot replaces the old one.
pub struct TaxRuleRegistry {
    rates: HashMap<(String, String, String), TaxRates>,
}

impl TaxRuleRegistry {
    pub fn new(configs: Vec<TaxConfig>) -> Self {
        let rates = configs
            .into_iter()
            .map(|c| {
                let key = Jurisdiction::new(&c.state_code, &c.county, &c.city).key();
                (key, c.rates)
            })
            .collect();
        Self { rates }
    }

    pub fn rates_for(&self, jurisdiction: &Jurisdiction) -> Result<&TaxRates, DomainError> {
        self.rates
            .get(&jurisdiction.key())
            .ok_or_else(|| DomainError::UnknownJurisdiction(jurisdiction.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn registry() -> TaxRuleRegistry {
        TaxRuleRegistry::new(vec![TaxConfig {
            state_code: "NY".into(),
            county: "New York".into(),
            city: "New York".into(),
            rates: TaxRates {
                state_sales_tax: dec("0.0400"),
                county_occupancy_tax: dec("0.0575"),
                city_occupancy_tax: dec("0.0375"),
                resort_fee: dec("0.0200"),
            },
        }])
    }

    #[test]
    fn looks_up_configured_jurisdiction() {
        let registry = registry();
        let rates = registry
            .rates_for(&Jurisdiction::new("NY", "New York", "New York"))
            .unwrap();
        assert_eq!(rates.state_sales_tax, dec("0.0400"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = registry();
        assert!(registry
            .rates_for(&Jurisdiction::new("ny", "new york", "NEW YORK"))
            .is_ok());
    }

    #[test]
    fn unknown_jurisdiction_is_a_hard_error_not_zero_rates() {
        let registry = registry();
        let err = registry
            .rates_for(&Jurisdiction::new("ZZ", "Nowhere", "Nowhere"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownJurisdiction("ZZ/nowhere/nowhere".into())
        );
    }
}
