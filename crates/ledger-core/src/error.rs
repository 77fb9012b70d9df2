//! Error types for loading ledgers and requesting reports

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a CSV source into a ledger
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// `row` is the 1-based data row (the header is not counted)
    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: {column} '{value}' is not a number")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {column} must not be negative (got {value})")]
    NegativeAmount {
        row: usize,
        column: &'static str,
        value: f64,
    },

    #[error("file is {size} bytes, the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
}

/// Failure to obtain a report from the chat-completion service
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("API key not configured (set {env_var})")]
    MissingApiKey { env_var: String },

    #[error("request to report service failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("report service returned HTTP {status}")]
    Status {
        status: u16,
        /// Response body, kept for logs only
        body: String,
    },

    #[error("unexpected response from report service: {0}")]
    Decode(String),

    #[error("report service returned no choices")]
    EmptyChoices,
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ReportError::Decode(err.to_string())
        } else {
            ReportError::Network(err)
        }
    }
}
