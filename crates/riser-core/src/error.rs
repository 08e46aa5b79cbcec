//! Error types for riser-core

use thiserror::Error;

/// Core error type for Riser
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Connection string could not be parsed
    #[error("[C001] Malformed connection string: {message}")]
    MalformedConnectionString { message: String },

    /// C002: Configuration file not found
    #[error("[C002] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C003: Failed to parse configuration file
    #[error("[C003] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C004: Identifier rejected before SQL interpolation
    #[error("[C004] Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// C005: Script bundle could not be read from disk
    #[error("[C005] Failed to read script bundle at {path}: {message}")]
    BundleReadError { path: String, message: String },
}

/// Result type alias for [`CoreError`]
pub type CoreResult<T> = Result<T, CoreError>;
