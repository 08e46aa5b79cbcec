//! riser-db - Database abstraction layer for Riser
//!
//! This crate provides the `Server` and `Database` traits and their
//! DuckDB implementation (plus a Postgres stub for future use). The
//! `Server` trait covers operations performed outside the target database
//! (existence check, creation, backup, run locking); the `Database` trait
//! covers operations inside it (script execution, provisioning tables,
//! metadata properties).

pub mod duckdb;
pub mod error;
pub(crate) mod postgres;
pub mod traits;

pub use duckdb::{DuckDbBackend, DuckDbServer};
pub use error::{DbError, DbResult};
pub use traits::{Database, Server};
