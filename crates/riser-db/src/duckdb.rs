//! DuckDB server and database backend implementation
//!
//! A DuckDB "server" is a directory: each database lives in its own
//! `<name>.duckdb` file under the server root. Existence checks, creation,
//! backup, and run locking all operate on that directory; in-database
//! operations go through a [`DuckDbBackend`] connection.
//!
//! DuckDB has no principal system, so roles, users, and memberships keep
//! their idempotency contract in `riser_meta` tables inside the target
//! database. A backend with real principals would issue guarded DDL
//! instead (see the postgres stub).

use crate::error::{DbError, DbResult};
use crate::traits::{Database, Server};
use async_trait::async_trait;
use duckdb::{params, params_from_iter, Connection};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Statements that create the in-database provisioning and metadata tables.
/// All idempotent; run before any operation that touches them.
const META_DDL: &str = "
    CREATE SCHEMA IF NOT EXISTS riser_meta;
    CREATE TABLE IF NOT EXISTS riser_meta._roles (name TEXT PRIMARY KEY);
    CREATE TABLE IF NOT EXISTS riser_meta._users (name TEXT PRIMARY KEY);
    CREATE TABLE IF NOT EXISTS riser_meta._role_members (
        role_name TEXT NOT NULL,
        user_name TEXT NOT NULL,
        PRIMARY KEY (role_name, user_name)
    );
    CREATE TABLE IF NOT EXISTS riser_meta._properties (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

/// DuckDB server backend: a directory of `.duckdb` database files
pub struct DuckDbServer {
    root: PathBuf,
}

impl DuckDbServer {
    /// Create a server rooted at `root`, creating the directory if needed
    pub fn new(root: &Path) -> DbResult<Self> {
        std::fs::create_dir_all(root).map_err(|e| {
            DbError::ConnectionError(format!("cannot create server root {}: {e}", root.display()))
        })?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Path of the database file for `name`
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.duckdb"))
    }

    fn lock_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.lock"))
    }

    /// Open the server-level metadata database holding login records
    fn server_meta(&self) -> DbResult<Connection> {
        let conn = Connection::open(self.root.join("_server_meta.duckdb"))
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS _logins (
                 name TEXT PRIMARY KEY,
                 default_database TEXT NOT NULL
             );",
        )?;
        Ok(conn)
    }
}

#[async_trait]
impl Server for DuckDbServer {
    async fn database_exists(&self, name: &str) -> DbResult<bool> {
        Ok(self.database_path(name).exists())
    }

    async fn create_database(&self, name: &str) -> DbResult<()> {
        // Opening the file creates it; DuckDB has no ownership to assign.
        let conn = Connection::open(self.database_path(name))
            .map_err(|e| DbError::ConnectionError(format!("cannot create database {name}: {e}")))?;
        drop(conn);
        Ok(())
    }

    async fn backup_database(&self, name: &str, destination: &Path) -> DbResult<()> {
        let source = self.database_path(name);
        if !source.exists() {
            return Err(DbError::BackupError(format!(
                "database file {} does not exist",
                source.display()
            )));
        }
        if destination.exists() {
            return Err(DbError::BackupError(format!(
                "destination {} already exists",
                destination.display()
            )));
        }
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DbError::BackupError(format!("cannot create backup dir: {e}")))?;
        }
        std::fs::copy(&source, destination)
            .map_err(|e| DbError::BackupError(format!("copy to {}: {e}", destination.display())))?;
        Ok(())
    }

    async fn ensure_login(&self, principal: &str, default_database: &str) -> DbResult<()> {
        let conn = self.server_meta()?;
        conn.execute(
            "INSERT INTO _logins (name, default_database) VALUES (?, ?) ON CONFLICT DO NOTHING",
            params![principal, default_database],
        )?;
        Ok(())
    }

    async fn connect(&self, name: &str) -> DbResult<Arc<dyn Database>> {
        let backend = DuckDbBackend::from_path(&self.database_path(name))?;
        Ok(Arc::new(backend))
    }

    async fn acquire_run_lock(&self, name: &str) -> DbResult<()> {
        let path = self.lock_path(name);
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    DbError::LockHeld {
                        database: name.to_string(),
                        detail: format!("lock file {} exists", path.display()),
                    }
                } else {
                    DbError::Internal(format!("cannot create lock file: {e}"))
                }
            })?;
        // Record the holder for operators diagnosing a stale lock
        let _ = writeln!(file, "{}", std::process::id());
        Ok(())
    }

    async fn release_run_lock(&self, name: &str) -> DbResult<()> {
        match std::fs::remove_file(self.lock_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DbError::Internal(format!("cannot release lock: {e}"))),
        }
    }

    fn server_type(&self) -> &'static str {
        "duckdb"
    }
}

/// DuckDB database backend for one target database
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Create the provisioning/metadata tables if absent
    fn ensure_meta_sync(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(META_DDL)?;
        Ok(())
    }

    fn execute_sync(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, params_from_iter(params.iter().copied()))
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_rows_sync(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(params.iter().copied()), |row| {
                let n = row.as_ref().column_count();
                let mut cols = Vec::with_capacity(n);
                for i in 0..n {
                    cols.push(row.get::<_, String>(i)?);
                }
                Ok(cols)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql, &[])
    }

    async fn execute_params(&self, sql: &str, params: &[&str]) -> DbResult<usize> {
        self.execute_sync(sql, params)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    async fn query_rows(&self, sql: &str, params: &[&str]) -> DbResult<Vec<Vec<String>>> {
        self.query_rows_sync(sql, params)
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables
                 WHERE table_schema = ? AND table_name = ?",
                params![schema, table],
                |row| row.get(0),
            )
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn ensure_role(&self, role: &str) -> DbResult<()> {
        self.ensure_meta_sync()?;
        self.execute_sync(
            "INSERT INTO riser_meta._roles (name) VALUES (?) ON CONFLICT DO NOTHING",
            &[role],
        )?;
        Ok(())
    }

    async fn ensure_user(&self, principal: &str) -> DbResult<()> {
        self.ensure_meta_sync()?;
        self.execute_sync(
            "INSERT INTO riser_meta._users (name) VALUES (?) ON CONFLICT DO NOTHING",
            &[principal],
        )?;
        Ok(())
    }

    async fn ensure_role_member(&self, role: &str, principal: &str) -> DbResult<()> {
        self.ensure_meta_sync()?;
        self.execute_sync(
            "INSERT INTO riser_meta._role_members (role_name, user_name)
             VALUES (?, ?) ON CONFLICT DO NOTHING",
            &[role, principal],
        )?;
        Ok(())
    }

    async fn set_property(&self, key: &str, value: &str) -> DbResult<()> {
        self.ensure_meta_sync()?;
        self.execute_sync(
            "INSERT INTO riser_meta._properties (key, value) VALUES (?, ?)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
            &[key, value],
        )?;
        Ok(())
    }

    async fn get_property(&self, key: &str) -> DbResult<Option<String>> {
        self.ensure_meta_sync()?;
        let rows = self.query_rows_sync(
            "SELECT value FROM riser_meta._properties WHERE key = ?",
            &[key],
        )?;
        Ok(rows.into_iter().next().and_then(|r| r.into_iter().next()))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
