//! Migration orchestrator
//!
//! The top-level state machine: existence check → create-or-backup →
//! provisioning → journaled Schema phase → unjournaled Always phase →
//! unjournaled Seed phase → version stamp. Phases are independent failure
//! domains: a failed phase marks the run as failed but later phases still
//! execute, and the version stamp only happens after a fully clean run so
//! the stamped metadata never lies about what was applied.

use crate::backup::run_backup;
use crate::error::{EngineError, EngineResult};
use crate::journal::Journal;
use crate::outcome::MigrationOutcome;
use crate::phase::run_phase;
use crate::provision::provision;
use chrono::Utc;
use riser_core::{validate_identifier, Category, Config, ConnectionDescriptor, ScriptBundle};
use riser_db::Server;
use std::path::PathBuf;
use std::sync::Arc;

/// Metadata property refreshed on every successful run
pub const PROP_LAST_UPDATED: &str = "last_updated_at";
/// Metadata property refreshed on success when a build version is supplied
pub const PROP_BUILD_VERSION: &str = "build_version";

/// The migration orchestrator for one target database
pub struct Migrator {
    server: Arc<dyn Server>,
    descriptor: ConnectionDescriptor,
    config: Config,
    backup_dir: PathBuf,
    build_version: Option<String>,
}

impl Migrator {
    /// Create an orchestrator bound to one server and target
    pub fn new(
        server: Arc<dyn Server>,
        descriptor: ConnectionDescriptor,
        config: Config,
        backup_dir: PathBuf,
    ) -> Self {
        Self {
            server,
            descriptor,
            config,
            backup_dir,
            build_version: None,
        }
    }

    /// Supply the optional build-version identifier recorded on success
    pub fn with_build_version(mut self, version: Option<String>) -> Self {
        self.build_version = version;
        self
    }

    /// Run the full upgrade sequence for `bundle`.
    ///
    /// Returns `Err` only for failures before the script phases start
    /// (lock contention, creation, connection, provisioning). Once phases
    /// run, failures are carried in the [`MigrationOutcome`] instead.
    pub async fn migrate(&self, bundle: &ScriptBundle) -> EngineResult<MigrationOutcome> {
        let database = validate_identifier(&self.descriptor.database)?;

        // Hold the advisory lock for the whole run so two orchestrators
        // cannot race on creation or the journal.
        self.server.acquire_run_lock(database).await?;
        let result = self.migrate_locked(database, bundle).await;
        if let Err(e) = self.server.release_run_lock(database).await {
            log::error!("Failed to release run lock for '{database}': {e}");
        }
        result
    }

    async fn migrate_locked(
        &self,
        database: &str,
        bundle: &ScriptBundle,
    ) -> EngineResult<MigrationOutcome> {
        log::info!(
            "Beginning upgrade of '{database}' on {} server '{}'",
            self.server.server_type(),
            self.descriptor.server
        );

        let exists = self.server.database_exists(database).await?;
        let mut outcome = MigrationOutcome::new(!exists);

        if exists {
            log::info!("Database '{database}' already exists, backing up before upgrade");
            let db = self.server.connect(database).await?;
            let _ = run_backup(
                self.server.as_ref(),
                db.as_ref(),
                database,
                &self.backup_dir,
                Utc::now(),
            )
            .await;
        } else {
            log::info!("Database '{database}' not found, creating it");
            self.server
                .create_database(database)
                .await
                .map_err(|e| EngineError::Creation(e.to_string()))?;
        }

        let db = self.server.connect(database).await?;

        log::info!("Provisioning role and logins");
        provision(self.server.as_ref(), db.as_ref(), &self.config, database).await?;

        let journal = Journal::new(db.as_ref());
        journal.ensure_table().await?;

        log::info!("Starting schema changes");
        outcome.phases.push(
            run_phase(
                db.as_ref(),
                &journal,
                Category::Schema,
                &bundle.schema_scripts(),
                true,
            )
            .await,
        );

        log::info!("Starting maintenance scripts");
        outcome.phases.push(
            run_phase(
                db.as_ref(),
                &journal,
                Category::Always,
                &bundle.always_scripts(),
                false,
            )
            .await,
        );

        log::info!("Starting seed data");
        outcome.phases.push(
            run_phase(
                db.as_ref(),
                &journal,
                Category::Seed,
                &bundle.seed_scripts(),
                false,
            )
            .await,
        );

        let phases_ok = outcome.phases.iter().all(|p| p.succeeded());
        if phases_ok {
            match self.stamp_version(db.as_ref()).await {
                Ok(()) => outcome.success = true,
                Err(e) => {
                    log::error!("{e}");
                    outcome.stamp_error = Some(e.to_string());
                }
            }
        } else {
            log::error!("One or more phases failed, skipping version stamp");
        }

        if outcome.success {
            log::info!("Upgrade of '{database}' successful (run {})", outcome.run_id);
        } else {
            log::error!("Upgrade of '{database}' failed (run {})", outcome.run_id);
        }
        Ok(outcome)
    }

    /// Record the success metadata: always the timestamp, and the build
    /// version when one was supplied.
    async fn stamp_version(&self, db: &dyn riser_db::Database) -> EngineResult<()> {
        db.set_property(PROP_LAST_UPDATED, &Utc::now().to_rfc3339())
            .await
            .map_err(|e| EngineError::VersionStamp(e.to_string()))?;
        if let Some(version) = &self.build_version {
            db.set_property(PROP_BUILD_VERSION, version)
                .await
                .map_err(|e| EngineError::VersionStamp(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
