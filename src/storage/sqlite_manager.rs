use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

use crate::config::settings::SqliteConfig;
use crate::storage::models::{
    DatasetStats, PrecipitationRow, StationActivity, TemperatureObservation, TemperatureStats,
};
use crate::storage::schema::SchemaCheck;
use crate::utils::error::ClimateError;

/// Read-only access to the climate dataset. Every query borrows a pooled
/// connection for its duration; clones share the same pool.
#[derive(Clone)]
pub struct SqliteManager {
    pool: SqlitePool,
}

impl SqliteManager {
    pub async fn new(config: &SqliteConfig) -> Result<Self, ClimateError> {
        if !Path::new(&config.database_path).is_file() {
            return Err(ClimateError::ConfigError(format!(
                "database file not found: {}",
                config.database_path
            )));
        }

        info!("🗄️  Opening SQLite database: {}", config.database_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(&config.database_path)
                    .create_if_missing(false)
                    .read_only(true)
                    .busy_timeout(Duration::from_millis(config.busy_timeout_ms)),
            )
            .await
            .map_err(|e| {
                ClimateError::DatabaseError(format!("Failed to open {}: {}", config.database_path, e))
            })?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool after checking it carries the tables we read.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, ClimateError> {
        SchemaCheck::verify(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn latest_measurement_date(&self) -> Result<Option<String>, ClimateError> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        Ok(latest)
    }

    pub async fn precipitation_since(&self, cutoff: &str) -> Result<Vec<PrecipitationRow>, ClimateError> {
        let rows = sqlx::query_as::<_, PrecipitationRow>(
            "SELECT date, prcp FROM measurement WHERE date >= ?",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        debug!("{} precipitation rows on or after {}", rows.len(), cutoff);
        Ok(rows)
    }

    pub async fn station_ids(&self) -> Result<Vec<String>, ClimateError> {
        let stations: Vec<String> = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&self.pool)
            .await?;

        Ok(stations)
    }

    // Ties on the count come back in whatever order SQLite groups them
    pub async fn most_active_station(&self) -> Result<Option<StationActivity>, ClimateError> {
        let activity = sqlx::query_as::<_, StationActivity>(r#"
            SELECT station, COUNT(station) AS observation_count
            FROM measurement
            GROUP BY station
            ORDER BY observation_count DESC
            LIMIT 1
        "#)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    pub async fn temperature_observations_since(
        &self,
        station: &str,
        cutoff: &str,
    ) -> Result<Vec<TemperatureObservation>, ClimateError> {
        let observations = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, tobs FROM measurement WHERE station = ? AND date >= ?",
        )
        .bind(station)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(observations)
    }

    /// Min/avg/max of `tobs` for `date >= start` and, when given, `date <= end`.
    /// Bounds are compared as text.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, ClimateError> {
        let mut query = r#"
            SELECT
                CAST(MIN(tobs) AS REAL) AS tmin,
                CAST(AVG(tobs) AS REAL) AS tavg,
                CAST(MAX(tobs) AS REAL) AS tmax
            FROM measurement
            WHERE date >= ?"#
            .to_string();

        if end.is_some() {
            query.push_str(" AND date <= ?");
        }

        let mut query_builder = sqlx::query_as::<_, TemperatureStats>(&query).bind(start);
        if let Some(end) = end {
            query_builder = query_builder.bind(end);
        }

        let stats = query_builder.fetch_one(&self.pool).await?;
        Ok(stats)
    }

    pub async fn dataset_stats(&self) -> Result<DatasetStats, ClimateError> {
        let stats = sqlx::query_as::<_, DatasetStats>(r#"
            SELECT
                (SELECT COUNT(*) FROM measurement) AS measurement_count,
                (SELECT COUNT(*) FROM station) AS station_count,
                (SELECT MIN(date) FROM measurement) AS earliest_date,
                (SELECT MAX(date) FROM measurement) AS latest_date
        "#)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    pub async fn close(&self) {
        info!("🔒 Closing SQLite database connections");
        self.pool.close().await;
    }
}
