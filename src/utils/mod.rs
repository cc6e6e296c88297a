pub mod error;

pub use error::ClimateError;
