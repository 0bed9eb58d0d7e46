use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::dates::DateRange;
use crate::errors::AppError;
use crate::Workflow;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityParams {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableRoomResponse {
    pub id: Uuid,
    pub number: String,
    /// Decimal nightly rate as a string, e.g. "150.00"
    pub base_rate: String,
}

/// GET /rooms/available?check_in=YYYY-MM-DD&check_out=YYYY-MM-DD
///
/// Rooms with no reservation overlapping the half-open range and not under
/// maintenance.
#[utoipa::path(
    get,
    path = "/rooms/available",
    params(
        ("check_in" = NaiveDate, Query, description = "Check-in date"),
        ("check_out" = NaiveDate, Query, description = "Check-out date (exclusive)"),
    ),
    responses(
        (status = 200, description = "Rooms free for the range", body = [AvailableRoomResponse]),
        (status = 400, description = "Malformed date range"),
    ),
    tag = "rooms"
)]
pub async fn list_available_rooms(
    workflow: web::Data<Workflow>,
    query: web::Query<AvailabilityParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let range = DateRange::new(params.check_in, params.check_out)?;
    let rooms: Vec<AvailableRoomResponse> = workflow
        .list_available(range)?
        .into_iter()
        .map(|r| AvailableRoomResponse {
            id: r.id,
            number: r.number,
            base_rate: r.base_rate.to_string(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(rooms))
}
