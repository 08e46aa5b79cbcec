//! Error types for riser-engine

use riser_core::CoreError;
use riser_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Role/login provisioning failed (G001)
    #[error("[G001] Provisioning failed: {0}")]
    Provisioning(String),

    /// Journal persistence rejected a write (G002)
    #[error("[G002] Journal write failed for '{script}': {detail}")]
    JournalWrite { script: String, detail: String },

    /// Journal could not be read (G003)
    #[error("[G003] Journal read failed: {0}")]
    JournalRead(String),

    /// Final metadata stamp failed (G004)
    #[error("[G004] Version stamp failed: {0}")]
    VersionStamp(String),

    /// Database creation failed (G005)
    #[error("[G005] Database creation failed: {0}")]
    Creation(String),

    /// Underlying database error (G006)
    #[error("[G006] {0}")]
    Db(#[from] DbError),

    /// Core-level error, e.g. identifier validation (G007)
    #[error("[G007] {0}")]
    Core(#[from] CoreError),
}

/// Result type alias for [`EngineError`]
pub type EngineResult<T> = Result<T, EngineError>;
