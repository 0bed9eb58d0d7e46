pub mod application;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::workflow::BookingWorkflow;
use domain::availability::AvailabilityIndex;
use domain::promo::PromotionEvaluator;
use domain::tax::TaxRuleRegistry;
use infrastructure::memory::{InMemoryBookingStore, InMemoryRoomCatalog};

/// The workflow as wired in this binary: in-memory adapters behind the
/// persistence ports.
pub type Workflow = BookingWorkflow<InMemoryBookingStore, InMemoryRoomCatalog>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::bookings::create_booking,
        handlers::bookings::list_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::update_booking,
        handlers::bookings::cancel_booking,
        handlers::bookings::checkout_booking,
        handlers::rooms::list_available_rooms,
        handlers::promos::validate_promo,
    ),
    components(schemas(
        handlers::bookings::CreateBookingRequest,
        handlers::bookings::UpdateBookingRequest,
        handlers::bookings::BookingResponse,
        handlers::bookings::CheckoutRequest,
        handlers::bookings::TaxLineResponse,
        handlers::bookings::PromoApplicationResponse,
        handlers::bookings::ChargeBreakdownResponse,
        handlers::rooms::AvailableRoomResponse,
        handlers::promos::ValidatePromoRequest,
        handlers::promos::ValidatePromoResponse,
    )),
    tags(
        (name = "bookings", description = "Reservation lifecycle and checkout"),
        (name = "rooms", description = "Availability queries"),
        (name = "promos", description = "Promo code validation"),
    )
)]
struct ApiDoc;

/// Build a workflow over the seeded demo inventory, tax tables, and promo
/// codes.
pub fn build_workflow(lock_wait: Duration) -> Workflow {
    BookingWorkflow::new(
        AvailabilityIndex::with_lock_wait(lock_wait),
        InMemoryBookingStore::new(),
        InMemoryRoomCatalog::new(infrastructure::seed::rooms()),
        TaxRuleRegistry::new(infrastructure::seed::tax_configs()),
        PromotionEvaluator::new(infrastructure::seed::promo_codes()),
    )
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    workflow: Workflow,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let workflow = web::Data::new(workflow);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(workflow.clone())
            .wrap(Logger::default())
            .configure(handlers::routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
