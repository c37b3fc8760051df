//! Error handling for the snapshot registrar.

use thiserror::Error;

/// Main error type for the snapshot registrar
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing or invalid environment fields)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Signing key errors
    #[error("Wallet error: {0}")]
    WalletError(String),

    /// Malformed bech32 addresses
    #[error("Address error: {0}")]
    AddressError(String),

    /// Data-related errors (e.g. a balance that is not an integer)
    #[error("Data error: {0}")]
    DataError(String),

    /// Non-success responses from the API or the gateway
    #[error("API error: {0}")]
    ApiError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Request errors
    #[error("Request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// Endpoint URL errors
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

/// Result type for the snapshot registrar
pub type Result<T> = std::result::Result<T, Error>;

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}
