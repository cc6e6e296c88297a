use chrono::{Duration, NaiveDate};
use log::{debug, info};
use std::collections::BTreeMap;

use crate::config::Config;
use crate::storage::{
    models::{DatasetStats, TemperatureObservation, TemperatureStats},
    Measurement, SqliteManager, TableSchema,
};
use crate::utils::error::ClimateError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const LOOKBACK_DAYS: i64 = 365;

/// The queries behind each API route. Nothing is cached: the latest date and
/// the most active station are looked up again on every call.
#[derive(Clone)]
pub struct ClimateService {
    sqlite_manager: SqliteManager,
}

impl ClimateService {
    pub async fn new(config: &Config) -> Result<Self, ClimateError> {
        let sqlite_manager = SqliteManager::new(&config.database).await?;
        Ok(Self::with_manager(sqlite_manager))
    }

    pub fn with_manager(sqlite_manager: SqliteManager) -> Self {
        Self { sqlite_manager }
    }

    /// Date → precipitation for the year ending at the latest measurement.
    /// Rows sharing a date overwrite one another in query order.
    pub async fn precipitation_last_year(&self) -> Result<BTreeMap<String, Option<f64>>, ClimateError> {
        let cutoff = self.one_year_cutoff().await?;
        let rows = self.sqlite_manager.precipitation_since(&cutoff).await?;

        let mut precipitation = BTreeMap::new();
        for row in rows {
            precipitation.insert(row.date, row.prcp);
        }

        Ok(precipitation)
    }

    pub async fn station_ids(&self) -> Result<Vec<String>, ClimateError> {
        self.sqlite_manager.station_ids().await
    }

    pub async fn most_active_station_observations(&self) -> Result<Vec<TemperatureObservation>, ClimateError> {
        let activity = self
            .sqlite_manager
            .most_active_station()
            .await?
            .ok_or_else(|| ClimateError::EmptyDataset(Measurement::TABLE.to_string()))?;

        debug!(
            "Most active station: {} ({} observations)",
            activity.station, activity.observation_count
        );

        let cutoff = self.one_year_cutoff().await?;
        self.sqlite_manager
            .temperature_observations_since(&activity.station, &cutoff)
            .await
    }

    // start/end are compared as text, unvalidated
    pub async fn temperature_stats(&self, start: &str, end: Option<&str>) -> Result<TemperatureStats, ClimateError> {
        self.sqlite_manager.temperature_stats(start, end).await
    }

    pub async fn dataset_stats(&self) -> Result<DatasetStats, ClimateError> {
        self.sqlite_manager.dataset_stats().await
    }

    async fn one_year_cutoff(&self) -> Result<String, ClimateError> {
        let latest = self
            .sqlite_manager
            .latest_measurement_date()
            .await?
            .ok_or_else(|| ClimateError::EmptyDataset(Measurement::TABLE.to_string()))?;

        one_year_before(&latest)
    }

    pub async fn close(&self) {
        info!("🛑 Climate service stopping");
        self.sqlite_manager.close().await;
    }
}

/// `latest` minus 365 days, as `YYYY-MM-DD`.
pub fn one_year_before(latest: &str) -> Result<String, ClimateError> {
    let latest = NaiveDate::parse_from_str(latest, DATE_FORMAT)?;
    let cutoff = latest - Duration::days(LOOKBACK_DAYS);
    Ok(cutoff.format(DATE_FORMAT).to_string())
}
