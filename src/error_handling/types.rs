//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error loading the GeoIP database.
    #[error("GeoIP initialization error: {0}")]
    GeoIpError(String),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error types for the ingest pipeline.
///
/// Validation failures are *not* errors -- they are returned as structured
/// data (`ValidationResult::Invalid`) and never propagate past the ingest
/// handler. This enum covers only external-dependency failures, which are
/// logged with full detail and surfaced to the caller generically.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The persistence layer rejected or failed the insert.
    #[error("Failed to record visitor data: {0}")]
    StorageError(#[from] DatabaseError),
}
