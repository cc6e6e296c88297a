pub mod climate_service;
pub mod api_service;

pub use climate_service::ClimateService;
pub use api_service::{ApiService, ApiServiceState};
