use thiserror::Error;

use crate::models::PropertyId;

/// Failure talking to the listings feed
#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("listing {id} returned status {status}")]
    Status { id: PropertyId, status: u16 },
    #[error("could not decode listing payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid listings base URL: {0}")]
    BaseUrl(String),
    #[error("listing id {0:?} cannot be used as a path segment")]
    InvalidId(PropertyId),
}

/// Failure reading or writing a ledger document
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger document is malformed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("ledger backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("reconciliation cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}
