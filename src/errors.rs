#![allow(dead_code)]

use thiserror::Error;

/// Every failure the crate can surface
#[derive(Error, Debug)]
pub enum AppError {
    /// SQLite failures
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem access
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decode failures
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Bad or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed values found while parsing or validating
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Import row rejected with its source line number
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Shorthand result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

// Manual conversions that fold into existing variants
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidData(format!("Timestamp parse error: {}", err))
    }
}
