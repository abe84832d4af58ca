#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the conflict dashboard.
//!
//! The event and indicator tables are loaded once before the server starts
//! and shared read-only across workers. Every request runs one query
//! function against them and returns JSON, except the forecast endpoint,
//! which passes a pre-rendered document through unchanged.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use conflict_dash_config::DashboardConfig;
use conflict_dash_dataset::Dataset;
use conflict_dash_forecast::ForecastStore;
use conflict_dash_server_models::ApiError;

/// Shared application state.
pub struct AppState {
    /// Event and indicator tables, immutable after load.
    pub dataset: Arc<Dataset>,
    /// Dashboard configuration.
    pub config: Arc<DashboardConfig>,
    /// Forecast document lookup.
    pub forecasts: ForecastStore,
}

impl AppState {
    /// Wraps the loaded data and builds the forecast store from `config`.
    #[must_use]
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let forecasts = ForecastStore::from_config(&config);
        Self {
            dataset: Arc::new(dataset),
            config: Arc::new(config),
            forecasts,
        }
    }
}

/// Malformed query strings get a JSON 400 instead of actix's plain text.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        log::warn!("Rejected query string for {}: {err}", req.path());
        let response = HttpResponse::BadRequest().json(ApiError::new(&err));
        error::InternalError::from_response(err, response).into()
    })
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/clusters", web::get().to(handlers::clusters))
            .route("/series", web::get().to(handlers::series))
            .route("/summary", web::get().to(handlers::summary))
            .route("/forecasts/{model}", web::get().to(handlers::forecast)),
    );
}

/// Starts the dashboard API server.
///
/// The caller provides the async runtime (e.g. via `#[actix_web::main]`)
/// and the already-loaded state.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(state: AppState, bind_addr: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(state);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
