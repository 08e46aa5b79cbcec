//! Terminal artifact of one orchestrator run

use crate::phase::PhaseResult;
use riser_core::Category;
use serde::Serialize;
use uuid::Uuid;

/// Aggregate result of one migration run
#[derive(Debug, Clone, Serialize)]
pub struct MigrationOutcome {
    /// Short identifier for this run, for log correlation
    pub run_id: String,
    /// True only when every phase and the version stamp succeeded
    pub success: bool,
    /// Whether the target database was created by this run
    pub created_database: bool,
    /// Per-phase results in execution order
    pub phases: Vec<PhaseResult>,
    /// Error from the final version stamp, when it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp_error: Option<String>,
}

impl MigrationOutcome {
    /// Start an outcome for a new run
    pub(crate) fn new(created_database: bool) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            success: false,
            created_database,
            phases: Vec::new(),
            stamp_error: None,
        }
    }

    /// The first phase error in execution order, if any
    pub fn first_error(&self) -> Option<(Category, &str)> {
        self.phases
            .iter()
            .find_map(|p| p.error.as_deref().map(|e| (p.category, e)))
    }

    /// Every error this run produced, phase errors first
    pub fn all_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .phases
            .iter()
            .filter_map(|p| p.error.as_ref().map(|e| format!("{} phase: {e}", p.category)))
            .collect();
        if let Some(stamp) = &self.stamp_error {
            errors.push(format!("version stamp: {stamp}"));
        }
        errors
    }
}
