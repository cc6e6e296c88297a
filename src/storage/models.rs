use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A table the service reads, with the columns it cannot work without.
pub trait TableSchema {
    const TABLE: &'static str;
    const REQUIRED_COLUMNS: &'static [&'static str];
}

// One observation per station per date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Measurement {
    pub id: Option<i64>,
    pub station: String,
    pub date: String,               // YYYY-MM-DD text
    pub prcp: Option<f64>,
    pub tobs: f64,
}

impl TableSchema for Measurement {
    const TABLE: &'static str = "measurement";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["station", "date", "prcp", "tobs"];
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Station {
    pub id: Option<i64>,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl TableSchema for Station {
    const TABLE: &'static str = "station";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["station"];
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TemperatureObservation {
    pub date: String,
    #[sqlx(rename = "tobs")]
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StationActivity {
    pub station: String,
    pub observation_count: i64,
}

// Keys are the wire names; all three are null when nothing matched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DatasetStats {
    pub measurement_count: i64,
    pub station_count: i64,
    pub earliest_date: Option<String>,
    pub latest_date: Option<String>,
}
