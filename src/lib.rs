//! Climate Measurement Query Library
//!
//! Read-only HTTP API over a SQLite dataset of daily station measurements
//! (date, precipitation, temperature observation). Each route answers with a
//! single query: a one-year precipitation window, the station list, the most
//! active station's observations, and min/avg/max temperature over a date range.

pub mod config;
pub mod services;
pub mod utils;
pub mod cli;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use services::{ApiService, ClimateService};
pub use utils::error::ClimateError;
pub use storage::{SqliteManager, DatasetStats, Measurement, Station, TemperatureStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
