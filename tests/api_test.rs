//! HTTP-level tests: the booking lifecycle and checkout flow end to end
//! through the actix routes, against the seeded demo inventory.

use std::str::FromStr;
use std::time::Duration;

use actix_web::{test, web, App};
use bigdecimal::BigDecimal;
use booking_service::{build_workflow, handlers};
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(build_workflow(Duration::from_millis(250))))
                .configure(handlers::routes),
        )
        .await
    };
}

/// The id of a seeded $100/night room, discovered through the API.
macro_rules! hundred_dollar_room {
    ($app:expr) => {{
        let req = test::TestRequest::get()
            .uri("/rooms/available?check_in=2025-06-01&check_out=2025-06-09")
            .to_request();
        let rooms: Value = test::call_and_read_body_json($app, req).await;
        let room = rooms
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["number"] == "101")
            .expect("seeded room 101");
        Uuid::from_str(room["id"].as_str().unwrap()).unwrap()
    }};
}

fn create_request(room_id: Uuid, check_in: &str, check_out: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/bookings").set_json(json!({
        "guest_id": Uuid::new_v4(),
        "room_id": room_id,
        "check_in": check_in,
        "check_out": check_out,
    }))
}

#[actix_web::test]
async fn booking_lifecycle_overlap_and_adjacency() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    // Jun 1-5 books fine.
    let resp = test::call_service(&app, create_request(room_id, "2025-06-01", "2025-06-05").to_request()).await;
    assert_eq!(resp.status(), 201);
    let booking: Value = test::read_body_json(resp).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    // Jun 4-6 overlaps and is rejected.
    let resp = test::call_service(&app, create_request(room_id, "2025-06-04", "2025-06-06").to_request()).await;
    assert_eq!(resp.status(), 409);

    // Jun 5-8 only touches (half-open) and is accepted.
    let resp = test::call_service(&app, create_request(room_id, "2025-06-05", "2025-06-08").to_request()).await;
    assert_eq!(resp.status(), 201);

    // Cancel frees Jun 1-5 for a fresh booking.
    let req = test::TestRequest::post()
        .uri(&format!("/bookings/{booking_id}/cancel"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(&app, create_request(room_id, "2025-06-01", "2025-06-05").to_request()).await;
    assert_eq!(resp.status(), 201);
}

#[actix_web::test]
async fn malformed_range_is_rejected_before_reserving() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    let resp = test::call_service(&app, create_request(room_id, "2025-06-05", "2025-06-05").to_request()).await;
    assert_eq!(resp.status(), 400);
    let resp = test::call_service(&app, create_request(room_id, "2025-06-07", "2025-06-03").to_request()).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn concurrent_overlapping_creates_admit_one_winner() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    let calls = (0..8).map(|_| {
        test::call_service(&app, create_request(room_id, "2025-06-01", "2025-06-05").to_request())
    });
    let responses = futures::future::join_all(calls).await;

    let created = responses.iter().filter(|r| r.status() == 201).count();
    let rejected = responses.iter().filter(|r| r.status() == 409).count();
    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
}

#[actix_web::test]
async fn checkout_itemizes_and_reconciles() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    // Fri Jun 6 -> Sun Jun 8 2025: two weekend nights at $120.
    let resp = test::call_service(&app, create_request(room_id, "2025-06-06", "2025-06-08").to_request()).await;
    assert_eq!(resp.status(), 201);
    let booking: Value = test::read_body_json(resp).await;
    assert_eq!(booking["total_amount"], "240.00");
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/bookings/{booking_id}/checkout"))
        .set_json(json!({
            "state_code": "NY",
            "county": "New York",
            "city": "New York",
            "promo_code": "SAVE10",
        }))
        .to_request();
    let charge: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(charge["subtotal"], "240.00");
    assert_eq!(charge["discount_amount"], "24.00");
    assert_eq!(charge["taxable_base"], "216.00");
    // Seeded NY rates: 4% state, 5.75% county, 3.75% city, 2% resort fee.
    assert_eq!(charge["state_tax"]["amount"], "8.64");
    assert_eq!(charge["county_tax"]["amount"], "12.42");
    assert_eq!(charge["city_tax"]["amount"], "8.10");
    assert_eq!(charge["resort_fee"]["amount"], "4.32");
    assert_eq!(charge["promo"]["applied"], true);
    assert!(charge["invoice_number"].as_str().unwrap().starts_with("INV-"));

    // The displayed total is exactly the sum of the displayed lines.
    let dec = |v: &Value| BigDecimal::from_str(v.as_str().unwrap()).unwrap();
    let lines = dec(&charge["taxable_base"])
        + dec(&charge["state_tax"]["amount"])
        + dec(&charge["county_tax"]["amount"])
        + dec(&charge["city_tax"]["amount"])
        + dec(&charge["resort_fee"]["amount"]);
    assert_eq!(dec(&charge["total"]), lines);
}

#[actix_web::test]
async fn invalid_promo_still_checks_out() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    let resp = test::call_service(&app, create_request(room_id, "2025-06-02", "2025-06-04").to_request()).await;
    let booking: Value = test::read_body_json(resp).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/bookings/{booking_id}/checkout"))
        .set_json(json!({
            "state_code": "NY",
            "county": "New York",
            "city": "New York",
            "promo_code": "FAKE123",
        }))
        .to_request();
    let charge: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(charge["discount_amount"], "0.00");
    assert_eq!(charge["promo"]["applied"], false);
    assert_eq!(charge["promo"]["detail"], "not found");
}

#[actix_web::test]
async fn unknown_jurisdiction_is_a_bad_request() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    let resp = test::call_service(&app, create_request(room_id, "2025-06-02", "2025-06-04").to_request()).await;
    let booking: Value = test::read_body_json(resp).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/bookings/{booking_id}/checkout"))
        .set_json(json!({
            "state_code": "ZZ",
            "county": "Nowhere",
            "city": "Nowhere",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn promo_validation_is_a_dry_run() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/promos/validate")
        .set_json(json!({ "code": "SAVE10", "subtotal": "240.00" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["discount_amount"], "24.00");

    // Validating again returns the same answer; nothing was consumed.
    let req = test::TestRequest::post()
        .uri("/promos/validate")
        .set_json(json!({ "code": "SAVE10", "subtotal": "240.00" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["discount_amount"], "24.00");

    let req = test::TestRequest::post()
        .uri("/promos/validate")
        .set_json(json!({ "code": "FAKE123", "subtotal": "200.00" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "not found");
}

#[actix_web::test]
async fn edit_moves_the_stay_and_reprices() {
    let app = app!();
    let room_id = hundred_dollar_room!(&app);

    let resp = test::call_service(&app, create_request(room_id, "2025-06-02", "2025-06-04").to_request()).await;
    let booking: Value = test::read_body_json(resp).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/bookings/{booking_id}"))
        .set_json(json!({ "check_in": "2025-06-06", "check_out": "2025-06-08" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["total_amount"], "240.00");

    // The vacated weekday dates are bookable again.
    let resp = test::call_service(&app, create_request(room_id, "2025-06-02", "2025-06-04").to_request()).await;
    assert_eq!(resp.status(), 201);
}
