use actix_web::{web, App, HttpServer, HttpResponse, Result as ActixResult, middleware::Logger};
use chrono::Utc;
use log::{info, error, warn, debug};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::services::climate_service::ClimateService;
use crate::storage::models::{TemperatureObservation, TemperatureStats};
use crate::utils::error::ClimateError;

pub const API_PREFIX: &str = "/api/v1.0";

const INDEX_BODY: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;";

// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// API Service state
#[derive(Clone)]
pub struct ApiServiceState {
    pub climate_service: ClimateService,
    pub config: Config,
}

impl ApiServiceState {
    pub fn new(config: Config, climate_service: ClimateService) -> Self {
        Self {
            climate_service,
            config,
        }
    }
}

/// Registers every route. Literal `/api/v1.0/...` paths go before the
/// `{start}` pattern so they are matched first.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(API_PREFIX)
                .route("/precipitation", web::get().to(precipitation))
                .route("/stations", web::get().to(stations))
                .route("/tobs", web::get().to(tobs))
                .route("/{start}", web::get().to(start_date_stats))
                .route("/{start}/{end}", web::get().to(start_end_date_stats)),
        );
}

// API Service
pub struct ApiService {
    state: ApiServiceState,
    server_handle: Option<actix_web::dev::ServerHandle>,
}

impl ApiService {
    pub fn new(config: Config, climate_service: ClimateService) -> Self {
        let state = ApiServiceState::new(config, climate_service);
        Self {
            state,
            server_handle: None,
        }
    }

    pub async fn start(&mut self) -> Result<(), ClimateError> {
        let bind_address = self.state.config.bind_address();
        info!("🌐 Starting HTTP API server on {}", bind_address);

        let state_data = web::Data::new(self.state.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state_data.clone())
                .wrap(Logger::default())
                .configure(configure_routes)
        })
        .workers(self.state.config.server.workers)
        .bind(&bind_address)?
        .run();

        // Store server handle for graceful shutdown
        self.server_handle = Some(server.handle());

        // Start the server in background
        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("❌ HTTP API server error: {}", e);
            }
        });

        info!("✅ HTTP API server listening on http://{}", bind_address);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), ClimateError> {
        info!("🛑 Stopping HTTP API server...");

        if let Some(handle) = self.server_handle.take() {
            // Use graceful shutdown with timeout
            tokio::select! {
                _ = handle.stop(true) => {
                    info!("✅ HTTP API server stopped gracefully");
                }
                _ = tokio::time::sleep(tokio::time::Duration::from_secs(10)) => {
                    warn!("⚠️  HTTP API server shutdown timeout, forcing stop");
                    handle.stop(false).await;
                }
            }
        }

        self.state.climate_service.close().await;
        Ok(())
    }
}

// API Endpoints

// GET / - Route listing
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_BODY)
}

// GET /health - Health check
async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Climate API",
        "timestamp": Utc::now(),
        "version": crate::VERSION
    })))
}

// GET /api/v1.0/precipitation - Last year of precipitation keyed by date
async fn precipitation(state: web::Data<ApiServiceState>) -> HttpResponse {
    match state.climate_service.precipitation_last_year().await {
        Ok(precipitation) => HttpResponse::Ok().json(precipitation),
        Err(e) => {
            error!("❌ Failed to fetch precipitation: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

// GET /api/v1.0/stations - All station identifiers
async fn stations(state: web::Data<ApiServiceState>) -> Result<web::Json<Vec<String>>, ClimateError> {
    let stations = state.climate_service.station_ids().await?;
    Ok(web::Json(stations))
}

// GET /api/v1.0/tobs - Last year of observations at the most active station
async fn tobs(state: web::Data<ApiServiceState>) -> Result<web::Json<Vec<TemperatureObservation>>, ClimateError> {
    let observations = state.climate_service.most_active_station_observations().await?;
    Ok(web::Json(observations))
}

// GET /api/v1.0/{start}
async fn start_date_stats(
    path: web::Path<String>,
    state: web::Data<ApiServiceState>,
) -> Result<web::Json<TemperatureStats>, ClimateError> {
    let start = path.into_inner();
    debug!("Temperature stats from {}", start);

    let stats = state.climate_service.temperature_stats(&start, None).await?;
    Ok(web::Json(stats))
}

// GET /api/v1.0/{start}/{end}
async fn start_end_date_stats(
    path: web::Path<(String, String)>,
    state: web::Data<ApiServiceState>,
) -> Result<web::Json<TemperatureStats>, ClimateError> {
    let (start, end) = path.into_inner();
    debug!("Temperature stats from {} to {}", start, end);

    let stats = state.climate_service.temperature_stats(&start, Some(&end)).await?;
    Ok(web::Json(stats))
}
