pub mod settings;

pub use settings::{
    Config,
    ServerConfig,
    SqliteConfig,
    LoggingConfig,
};
