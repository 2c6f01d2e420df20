//! Unified application error type.
//! Core, db, cli and export all return AppError so callers deal with a
//! single taxonomy.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Workflow guards
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state: cannot {action} {entity} {id} while it is {state}")]
    InvalidState {
        entity: &'static str,
        id: String,
        state: String,
        action: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl From<crate::core::time_parser::TimeParseError> for AppError {
    fn from(e: crate::core::time_parser::TimeParseError) -> Self {
        AppError::Parse(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
