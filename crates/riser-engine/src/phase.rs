//! Phase runner
//!
//! Executes one homogeneous batch of scripts against the database, either
//! under journal control (skip already-applied, record each success) or
//! unconditionally (idempotent re-run semantics). A failure stops the
//! remainder of the phase immediately; whether the overall run continues
//! is the orchestrator's decision, not the phase's.

use crate::journal::Journal;
use chrono::Utc;
use riser_core::{Category, ScriptEntry};
use riser_db::Database;
use serde::Serialize;

/// Result of executing one phase
#[derive(Debug, Clone, Serialize)]
pub struct PhaseResult {
    /// Script category this phase ran
    pub category: Category,
    /// Scripts newly applied in this run
    pub applied: usize,
    /// Scripts skipped because the journal already records them
    pub skipped: usize,
    /// Error that stopped the phase, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhaseResult {
    /// True when the phase ran to completion
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one phase over `scripts` (already sorted by logical name).
///
/// When `journaled`, each successfully executed script is recorded before
/// the next one starts; a journal-write failure aborts the phase exactly
/// like a script failure, to avoid double-recording on retry.
pub async fn run_phase(
    db: &dyn Database,
    journal: &Journal<'_>,
    category: Category,
    scripts: &[&ScriptEntry],
    journaled: bool,
) -> PhaseResult {
    let mut result = PhaseResult {
        category,
        applied: 0,
        skipped: 0,
        error: None,
    };

    for script in scripts {
        if journaled {
            match journal.has_applied(&script.name).await {
                Ok(true) => {
                    log::debug!("Skipping '{}', already applied", script.name);
                    result.skipped += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    result.error = Some(e.to_string());
                    break;
                }
            }
        }

        log::info!("Applying {} script '{}'", category, script.name);
        if let Err(e) = db.execute_batch(&script.body).await {
            log::error!("Script '{}' failed: {e}", script.name);
            result.error = Some(format!("script '{}': {e}", script.name));
            break;
        }

        if journaled {
            if let Err(e) = journal.record_applied(&script.name, Utc::now()).await {
                log::error!("Journal write for '{}' failed: {e}", script.name);
                result.error = Some(e.to_string());
                break;
            }
        }
        result.applied += 1;
    }

    result
}

#[cfg(test)]
#[path = "phase_test.rs"]
mod tests;
