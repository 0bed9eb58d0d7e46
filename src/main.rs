use std::env;
use std::time::Duration;

use booking_service::{build_server, build_workflow};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let lock_wait_ms: u64 = env::var("ROOM_LOCK_WAIT_MS")
        .unwrap_or_else(|_| "250".to_string())
        .parse()
        .expect("ROOM_LOCK_WAIT_MS must be a valid number");

    let workflow = build_workflow(Duration::from_millis(lock_wait_ms));

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(workflow, &host, port)?.await
}
