//! Journal store for applied schema scripts
//!
//! The journal lives in a `_schema_versions` table inside the target
//! database itself, so applied-script state travels with the database.
//! One row per successfully applied Schema script; rows are never mutated
//! or deleted. The PRIMARY KEY on `script_name` is the double-recording
//! guard: a duplicate insert fails at the persistence layer and aborts
//! the phase.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use riser_db::Database;

/// Journal table inside the target database
const JOURNAL_TABLE: &str = "_schema_versions";

/// One applied-script record, as read back for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRecord {
    /// Logical script name
    pub script_name: String,
    /// Applied-at timestamp, rendered as text
    pub applied_at: String,
}

/// Ledger of applied Schema scripts for one target database
pub struct Journal<'a> {
    db: &'a dyn Database,
}

impl<'a> Journal<'a> {
    /// Wrap a database connection
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the journal table if absent. Idempotent.
    pub async fn ensure_table(&self) -> EngineResult<()> {
        self.db
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS _schema_versions (
                     script_name TEXT PRIMARY KEY,
                     applied_at  TIMESTAMP NOT NULL
                 );",
            )
            .await
            .map_err(|e| EngineError::JournalWrite {
                script: JOURNAL_TABLE.to_string(),
                detail: format!("cannot create journal table: {e}"),
            })
    }

    /// Whether `script_name` has already been applied
    pub async fn has_applied(&self, script_name: &str) -> EngineResult<bool> {
        let rows = self
            .db
            .query_rows(
                "SELECT script_name FROM _schema_versions WHERE script_name = ?",
                &[script_name],
            )
            .await
            .map_err(|e| EngineError::JournalRead(e.to_string()))?;
        Ok(!rows.is_empty())
    }

    /// Record a successful application. Fails on a duplicate name —
    /// that failure must abort the phase, never be swallowed.
    pub async fn record_applied(
        &self,
        script_name: &str,
        applied_at: DateTime<Utc>,
    ) -> EngineResult<()> {
        let ts = applied_at.format("%Y-%m-%d %H:%M:%S%.6f").to_string();
        self.db
            .execute_params(
                "INSERT INTO _schema_versions (script_name, applied_at) VALUES (?, ?)",
                &[script_name, &ts],
            )
            .await
            .map_err(|e| EngineError::JournalWrite {
                script: script_name.to_string(),
                detail: e.to_string(),
            })?;
        Ok(())
    }

    /// Name of the most recently applied script, if any
    pub async fn last_applied(&self) -> EngineResult<Option<String>> {
        let rows = self
            .db
            .query_rows(
                "SELECT script_name FROM _schema_versions
                 ORDER BY applied_at DESC, script_name DESC LIMIT 1",
                &[],
            )
            .await
            .map_err(|e| EngineError::JournalRead(e.to_string()))?;
        Ok(rows.into_iter().next().and_then(|r| r.into_iter().next()))
    }

    /// Every applied script with its timestamp, in name order
    pub async fn applied(&self) -> EngineResult<Vec<JournalRecord>> {
        let rows = self
            .db
            .query_rows(
                "SELECT script_name, CAST(applied_at AS VARCHAR) FROM _schema_versions
                 ORDER BY script_name",
                &[],
            )
            .await
            .map_err(|e| EngineError::JournalRead(e.to_string()))?;
        Ok(rows
            .into_iter()
            .filter_map(|mut r| {
                if r.len() < 2 {
                    return None;
                }
                let applied_at = r.pop()?;
                let script_name = r.pop()?;
                Some(JournalRecord {
                    script_name,
                    applied_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "journal_test.rs"]
mod tests;
