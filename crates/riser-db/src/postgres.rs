//! Postgres server backend stub
//!
//! Placeholder for a server with a real principal system, where
//! provisioning issues guarded `CREATE ROLE` / `CREATE USER` DDL instead
//! of the DuckDB metadata-table emulation.

#![allow(dead_code)]

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Server};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Postgres server backend (stub implementation)
pub struct PostgresServer {
    // Connection details would go here
}

impl PostgresServer {
    /// Create a new Postgres server backend (not yet implemented)
    pub fn new(_connection_string: &str) -> DbResult<Self> {
        Err(not_implemented("new"))
    }
}

fn not_implemented(feature: &str) -> DbError {
    DbError::NotImplemented {
        backend: "postgres".to_string(),
        feature: feature.to_string(),
    }
}

#[async_trait]
impl Server for PostgresServer {
    async fn database_exists(&self, _name: &str) -> DbResult<bool> {
        Err(not_implemented("database_exists"))
    }

    async fn create_database(&self, _name: &str) -> DbResult<()> {
        Err(not_implemented("create_database"))
    }

    async fn backup_database(&self, _name: &str, _destination: &Path) -> DbResult<()> {
        Err(not_implemented("backup_database"))
    }

    async fn ensure_login(&self, _principal: &str, _default_database: &str) -> DbResult<()> {
        Err(not_implemented("ensure_login"))
    }

    async fn connect(&self, _name: &str) -> DbResult<Arc<dyn Database>> {
        Err(not_implemented("connect"))
    }

    async fn acquire_run_lock(&self, _name: &str) -> DbResult<()> {
        Err(not_implemented("acquire_run_lock"))
    }

    async fn release_run_lock(&self, _name: &str) -> DbResult<()> {
        Err(not_implemented("release_run_lock"))
    }

    fn server_type(&self) -> &'static str {
        "postgres"
    }
}
