//! Pre-upgrade backup step
//!
//! Runs only when the target database already exists. The destination
//! name embeds the last successfully applied schema script (or a
//! `pre-migration` sentinel when the journal is empty or unreadable) plus
//! a timestamp, so every backup is traceable to a known schema state and
//! two runs never collide on the same destination.
//!
//! Backup failure is non-fatal by contract: it is logged and the
//! migration proceeds.

use crate::journal::Journal;
use chrono::{DateTime, Utc};
use riser_db::{Database, Server};
use std::path::{Path, PathBuf};

/// Sentinel used when no applied script can be determined
const PRE_MIGRATION: &str = "pre-migration";

/// Compute the backup destination for one run.
///
/// `last_applied` is the full logical name of the newest journal record;
/// only its final segment goes into the file name.
pub fn backup_destination(
    backup_dir: &Path,
    last_applied: Option<&str>,
    now: DateTime<Utc>,
) -> PathBuf {
    let ident = last_applied
        .map(|name| name.rsplit('.').next().unwrap_or(name))
        .map(sanitize)
        .unwrap_or_else(|| PRE_MIGRATION.to_string());
    let stamp = now.format("%Y%m%d%H%M%S");
    backup_dir.join(format!("{ident}_{stamp}_backup.duckdb"))
}

/// Replace path-hostile characters in a script identifier
fn sanitize(ident: &str) -> String {
    ident
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Back up `database` before schema changes, swallowing failures.
///
/// Returns the destination on success, `None` when the backup failed
/// (already logged) — the caller proceeds either way.
pub async fn run_backup(
    server: &dyn Server,
    db: &dyn Database,
    database: &str,
    backup_dir: &Path,
    now: DateTime<Utc>,
) -> Option<PathBuf> {
    // An unreadable journal (e.g. a database predating the journal table)
    // falls back to the sentinel rather than failing the backup.
    let last_applied = match Journal::new(db).last_applied().await {
        Ok(last) => last,
        Err(e) => {
            log::debug!("Journal unreadable before backup, using sentinel: {e}");
            None
        }
    };

    let destination = backup_destination(backup_dir, last_applied.as_deref(), now);
    match server.backup_database(database, &destination).await {
        Ok(()) => {
            log::info!("Backed up '{database}' to {}", destination.display());
            Some(destination)
        }
        Err(e) => {
            log::error!("Failed to back up '{database}', proceeding without a fresh backup: {e}");
            None
        }
    }
}

#[cfg(test)]
#[path = "backup_test.rs"]
mod tests;
