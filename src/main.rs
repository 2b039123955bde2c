//! Department Portal Server
//!
//! REST API server for the university department portal.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deptportal_server::{
    api,
    config::AppConfig,
    repository::Repository,
    scheduling::Clock,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("deptportal_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Department Portal Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone(), &config.booking)
        .expect("Failed to create services");

    // Background sweep: flip scheduled bookings whose end has passed to
    // completed, in the portal-local calendar
    let sweep_clock = Clock::from_offset_minutes(config.booking.utc_offset_minutes)
        .expect("Invalid UTC offset");
    let sweep_repository = repository.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            let now = sweep_clock.now();
            match sweep_repository
                .bookings
                .complete_elapsed(now.date_naive(), now.time())
                .await
            {
                Ok(0) => {}
                Ok(n) => tracing::info!("Marked {} bookings completed", n),
                Err(e) => tracing::error!("Completion sweep failed: {}", e),
            }
        }
    });

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Rooms
        .route("/rooms", get(api::rooms::list_rooms))
        .route("/rooms", post(api::rooms::create_room))
        .route("/rooms/search", get(api::schedules::search_rooms))
        .route("/rooms/:id", get(api::rooms::get_room))
        .route("/rooms/:id", put(api::rooms::update_room))
        .route("/rooms/:id", delete(api::rooms::delete_room))
        // Schedules
        .route("/rooms/:id/schedule", get(api::schedules::get_day_schedule))
        .route("/rooms/:id/schedule/week", get(api::schedules::get_weekly_schedule))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/slots", post(api::bookings::create_slot_bookings))
        .route("/bookings/:id/cancel", post(api::bookings::cancel_booking))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id/bookings", get(api::bookings::get_user_bookings))
        .route("/users/:id/equipment-loans", get(api::equipment::get_user_equipment_loans))
        // Notices
        .route("/notices", get(api::notices::list_notices))
        .route("/notices", post(api::notices::create_notice))
        .route("/notices/:id", get(api::notices::get_notice))
        .route("/notices/:id", put(api::notices::update_notice))
        .route("/notices/:id", delete(api::notices::delete_notice))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route("/equipment/:id/borrow", post(api::equipment::borrow_equipment))
        .route("/equipment/loans/:id/return", post(api::equipment::return_equipment_loan))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
