use log::{debug, info};
use sqlx::SqlitePool;

use crate::storage::models::{Measurement, Station, TableSchema};
use crate::utils::error::ClimateError;

pub struct SchemaCheck;

impl SchemaCheck {
    /// Fails on the first table or column the service depends on that the
    /// store does not provide. Nothing is created or altered.
    pub async fn verify(pool: &SqlitePool) -> Result<(), ClimateError> {
        info!("🔍 Verifying database schema");

        Self::verify_table::<Measurement>(pool).await?;
        Self::verify_table::<Station>(pool).await?;

        info!("✅ Database schema verified");
        Ok(())
    }

    async fn verify_table<T: TableSchema>(pool: &SqlitePool) -> Result<(), ClimateError> {
        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(T::TABLE)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                ClimateError::DatabaseError(format!("Failed to inspect table '{}': {}", T::TABLE, e))
            })?;

        if columns.is_empty() {
            return Err(ClimateError::SchemaError(format!(
                "required table '{}' does not exist",
                T::TABLE
            )));
        }

        let missing = missing_columns(T::REQUIRED_COLUMNS, &columns);
        if !missing.is_empty() {
            return Err(ClimateError::SchemaError(format!(
                "table '{}' is missing required column(s): {}",
                T::TABLE,
                missing.join(", ")
            )));
        }

        debug!("Table '{}' has columns: {}", T::TABLE, columns.join(", "));
        Ok(())
    }
}

fn missing_columns<'a>(required: &[&'a str], present: &[String]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        .copied()
        .collect()
}
