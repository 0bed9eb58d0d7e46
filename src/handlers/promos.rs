use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::money::parse_amount;
use crate::domain::promo::PromoOutcome;
use crate::errors::AppError;
use crate::Workflow;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidatePromoRequest {
    pub code: String,
    /// Decimal subtotal as a string, e.g. "240.00"
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidatePromoResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /promos/validate
///
/// Dry-run validation of a promo code against a subtotal. Side-effect-free:
/// nothing is consumed, so the form can call this on every change.
#[utoipa::path(
    post,
    path = "/promos/validate",
    request_body = ValidatePromoRequest,
    responses(
        (status = 200, description = "Validation outcome", body = ValidatePromoResponse),
        (status = 400, description = "Malformed subtotal"),
    ),
    tag = "promos"
)]
pub async fn validate_promo(
    workflow: web::Data<Workflow>,
    body: web::Json<ValidatePromoRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let subtotal = parse_amount(&body.subtotal)?;
    let response = match workflow.validate_promo(&body.code, &subtotal) {
        PromoOutcome::Valid {
            discount_amount,
            description,
        } => ValidatePromoResponse {
            valid: true,
            discount_amount: Some(discount_amount.to_string()),
            description: Some(description),
            message: None,
        },
        PromoOutcome::Invalid { reason } => ValidatePromoResponse {
            valid: false,
            discount_amount: None,
            description: None,
            message: Some(reason),
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
