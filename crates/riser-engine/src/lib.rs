//! riser-engine - Migration engine for Riser
//!
//! Composes the journal store, backup step, provisioning step, and phase
//! runner into the migration orchestrator: existence check →
//! create-or-backup → provisioning → journaled schema phase → unjournaled
//! always/seed phases → version stamp.

pub mod backup;
pub mod error;
pub mod journal;
pub mod migrator;
pub mod outcome;
pub mod phase;
pub mod provision;

pub use error::{EngineError, EngineResult};
pub use journal::{Journal, JournalRecord};
pub use migrator::Migrator;
pub use outcome::MigrationOutcome;
pub use phase::PhaseResult;
