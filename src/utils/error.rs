use actix_web::ResponseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("No rows found in table '{0}'")]
    EmptyDataset(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for ClimateError {
    fn from(err: sqlx::Error) -> Self {
        ClimateError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for ClimateError {
    fn from(err: serde_json::Error) -> Self {
        ClimateError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ClimateError {
    fn from(err: std::io::Error) -> Self {
        ClimateError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ClimateError {
    fn from(err: toml::de::Error) -> Self {
        ClimateError::ConfigError(format!("Invalid TOML: {}", err))
    }
}

impl From<toml::ser::Error> for ClimateError {
    fn from(err: toml::ser::Error) -> Self {
        ClimateError::SerializationError(format!("TOML error: {}", err))
    }
}

impl From<chrono::ParseError> for ClimateError {
    fn from(err: chrono::ParseError) -> Self {
        ClimateError::InvalidData(format!("Unparseable date: {}", err))
    }
}

// Unhandled route failures fall back to actix's default: 500 with the message as plain text.
impl ResponseError for ClimateError {}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_default_response_is_internal_server_error() {
        let err = ClimateError::EmptyDataset("measurement".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "No rows found in table 'measurement'");
    }

    #[test]
    fn test_chrono_parse_error_maps_to_invalid_data() {
        let parse_err = chrono::NaiveDate::parse_from_str("not-a-date", "%Y-%m-%d").unwrap_err();
        let err: ClimateError = parse_err.into();
        assert!(matches!(err, ClimateError::InvalidData(_)));
    }
}
