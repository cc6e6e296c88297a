pub mod sqlite_manager;
pub mod models;
pub mod schema;
#[cfg(test)]
pub(crate) mod fixtures;

pub use models::{
    Measurement, Station, TableSchema, PrecipitationRow, TemperatureObservation,
    StationActivity, TemperatureStats, DatasetStats,
};
pub use schema::SchemaCheck;
pub use sqlite_manager::SqliteManager;
