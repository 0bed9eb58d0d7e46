use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use super::money::round_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Percent,
    Flat,
}

/// A promo code as issued by the promotions collaborator. Immutable once
/// issued; validity is evaluated per request against the order at hand.
#[derive(Debug, Clone)]
pub struct PromoCode {
    pub code: String,
    pub description: String,
    pub kind: DiscountKind,
    pub value: BigDecimal,
    pub minimum_order: Option<BigDecimal>,
    pub expires_on: Option<NaiveDate>,
}

/// Outcome of validating a code against a subtotal. An invalid code is a
/// value to surface, not an error: checkout proceeds with zero discount.
#[derive(Debug, Clone, PartialEq)]
pub enum PromoOutcome {
    Valid {
        discount_amount: BigDecimal,
        description: String,
    },
    Invalid {
        reason: String,
    },
}

impl PromoOutcome {
    pub fn discount_amount(&self) -> BigDecimal {
        match self {
            PromoOutcome::Valid {
                discount_amount, ..
            } => discount_amount.clone(),
            PromoOutcome::Invalid { .. } => BigDecimal::from(0),
        }
    }
}

/// Pure, side-effect-free promo validation over a configured snapshot of
/// codes. Repeated validation never consumes anything; usage-limit
/// enforcement belongs to an external ledger.
pub struct PromotionEvaluator {
    codes: HashMap<String, PromoCode>,
}

impl PromotionEvaluator {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        let codes = codes
            .into_iter()
            .map(|c| (c.code.trim().to_uppercase(), c))
            .collect();
        Self { codes }
    }

    pub fn validate(&self, code: &str, subtotal: &BigDecimal, today: NaiveDate) -> PromoOutcome {
        let Some(promo) = self.codes.get(&code.trim().to_uppercase()) else {
            return PromoOutcome::Invalid {
                reason: "not found".into(),
            };
        };
        if let Some(expires_on) = promo.expires_on {
            if expires_on < today {
                return PromoOutcome::Invalid {
                    reason: "expired".into(),
                };
            }
        }
        if let Some(minimum) = &promo.minimum_order {
            if subtotal < minimum {
                return PromoOutcome::Invalid {
                    reason: "minimum order not met".into(),
                };
            }
        }

        let raw = match promo.kind {
            DiscountKind::Percent => round_cents(&(subtotal * &promo.value / BigDecimal::from(100))),
            DiscountKind::Flat => round_cents(&promo.value),
        };
        // A discount never exceeds the subtotal; the post-discount base
        // stays non-negative.
        let discount_amount = if raw > *subtotal {
            round_cents(subtotal)
        } else {
            raw
        };
        PromoOutcome::Valid {
            discount_amount,
            description: promo.description.clone(),
        }
    }
}
