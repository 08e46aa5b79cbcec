//! Server and database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Server-scope operations, performed outside any one target database.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Server: Send + Sync {
    /// Check whether the named database exists on this server
    async fn database_exists(&self, name: &str) -> DbResult<bool>;

    /// Create the named database and assign ownership where the backend
    /// has a notion of it
    async fn create_database(&self, name: &str) -> DbResult<()>;

    /// Back up the named database to `destination`.
    ///
    /// Must refuse to overwrite an existing destination rather than
    /// silently destroying a prior backup.
    async fn backup_database(&self, name: &str, destination: &Path) -> DbResult<()>;

    /// Ensure a server-level login/principal exists, idempotently
    async fn ensure_login(&self, principal: &str, default_database: &str) -> DbResult<()>;

    /// Open a connection to the named database
    async fn connect(&self, name: &str) -> DbResult<Arc<dyn Database>>;

    /// Acquire the advisory per-database migration lock.
    ///
    /// Fails with [`crate::DbError::LockHeld`] when another run holds it;
    /// two orchestrator runs against the same database never interleave.
    async fn acquire_run_lock(&self, name: &str) -> DbResult<()>;

    /// Release the advisory migration lock. Releasing a lock that is not
    /// held is not an error.
    async fn release_run_lock(&self, name: &str) -> DbResult<()>;

    /// Server type identifier for logging
    fn server_type(&self) -> &'static str;
}

/// Operations inside one target database.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute SQL with positional text parameters
    async fn execute_params(&self, sql: &str, params: &[&str]) -> DbResult<usize>;

    /// Execute multiple SQL statements (the script execution boundary)
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row as a vector of text columns.
    ///
    /// Non-text columns must be CAST to VARCHAR in the query itself.
    async fn query_rows(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>>;

    /// Check whether a table exists (optionally schema-qualified)
    async fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Ensure a role exists, idempotently
    async fn ensure_role(&self, role: &str) -> DbResult<()>;

    /// Ensure a database-level user exists for `principal`, idempotently
    async fn ensure_user(&self, principal: &str) -> DbResult<()>;

    /// Ensure `principal` is a member of `role`, idempotently
    async fn ensure_role_member(&self, role: &str, principal: &str) -> DbResult<()>;

    /// Set a database-level metadata property, replacing any prior value
    async fn set_property(&self, key: &str, value: &str) -> DbResult<()>;

    /// Read a database-level metadata property
    async fn get_property(&self, key: &str) -> DbResult<Option<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
