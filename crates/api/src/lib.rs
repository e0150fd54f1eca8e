//! # Coachbook API
//!
//! The API crate provides the web server for the Coachbook scheduling service.
//! It exposes the coach and student surfaces over HTTP and translates the
//! selection cookie into the explicit user ids the core operations take.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests and call the scheduling service
//! - **Middleware**: Error mapping and selected-user extraction
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; storage is reached only through
//! the store traits in `coachbook-core`.

/// Configuration module for API settings
pub mod config;
/// Request handlers for users, availability and bookings
pub mod handlers;
/// Error mapping and selected-user extraction
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use chrono_tz::Tz;
use coachbook_core::service::SchedulingService;
use coachbook_db::{DbPool, PgAppointmentStore, PgUserDirectory};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::CookieSettings;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use coachbook_api::{ApiState, build_router, config::CookieSettings};
/// use coachbook_core::service::SchedulingService;
/// use coachbook_core::store::memory::{InMemoryDirectory, InMemoryStore};
///
/// let scheduling = SchedulingService::with_system_clock(
///     Arc::new(InMemoryStore::new()),
///     Arc::new(InMemoryDirectory::default()),
/// );
/// let state = Arc::new(ApiState {
///     scheduling,
///     default_timezone: chrono_tz::UTC,
///     cookie: CookieSettings::default(),
/// });
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Scheduling operations over the configured stores
    pub scheduling: SchedulingService,
    /// Zone used when a request does not name one
    pub default_timezone: Tz,
    /// Selected-user cookie attributes
    pub cookie: CookieSettings,
}

impl ApiState {
    /// State backed by PostgreSQL.
    pub fn from_pool(pool: DbPool, default_timezone: Tz, cookie: CookieSettings) -> Self {
        let scheduling = SchedulingService::with_system_clock(
            Arc::new(PgAppointmentStore::new(pool.clone())),
            Arc::new(PgUserDirectory::new(pool)),
        );
        Self {
            scheduling,
            default_timezone,
            cookie,
        }
    }
}

/// Builds the application router with all routes and the shared state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // User listing and selection
        .merge(routes::users::routes())
        // Coach availability endpoints
        .merge(routes::availability::routes())
        // Student booking endpoints
        .merge(routes::booking::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, wires the PostgreSQL-backed stores into
/// the scheduling service, configures routes and layers, and serves HTTP until
/// the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use coachbook_api::{config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let pool = coachbook_db::create_pool(&config.database_url).await?;
/// start_server(config, pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_pool(
        db_pool,
        config.default_timezone,
        config.cookie,
    ));
    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin {:?}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {}", err),
        )
    }
}
