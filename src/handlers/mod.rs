pub mod bookings;
pub mod promos;
pub mod rooms;

use actix_web::web;

/// Route table shared by the server and the HTTP-level tests.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(bookings::create_booking))
            .route("", web::get().to(bookings::list_bookings))
            .route("/{id}", web::get().to(bookings::get_booking))
            .route("/{id}", web::put().to(bookings::update_booking))
            .route("/{id}/cancel", web::post().to(bookings::cancel_booking))
            .route("/{id}/checkout", web::post().to(bookings::checkout_booking)),
    )
    .service(web::scope("/rooms").route("/available", web::get().to(rooms::list_available_rooms)))
    .service(web::scope("/promos").route("/validate", web::post().to(promos::validate_promo)));
}
