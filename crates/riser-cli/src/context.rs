//! Runtime context for CLI commands

use anyhow::{Context, Result};
use riser_core::{Config, ConnectionDescriptor};
use riser_db::{DuckDbServer, Server};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing loaded config, target identity, and server
///
/// For the DuckDB backend the descriptor's server address is a directory
/// path; each database is a file under it.
pub struct RuntimeContext {
    /// Project root directory
    pub root: PathBuf,

    /// The loaded project configuration
    pub config: Config,

    /// Parsed target identity (after any `db:` override)
    pub descriptor: ConnectionDescriptor,

    /// Server handle
    pub server: Arc<dyn Server>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a runtime context from global arguments and an optional
    /// `db:` connection-string override.
    pub fn new(global: &GlobalArgs, connection_override: Option<&str>) -> Result<Self> {
        let root = Path::new(&global.project_dir).to_path_buf();

        let config = if let Some(config_path) = &global.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let mut descriptor = ConnectionDescriptor::parse(&config.connection)
            .context("Failed to parse configured connection string")?;
        if let Some(connection) = connection_override {
            descriptor
                .override_with(connection)
                .context("Failed to parse db: override")?;
        }

        let server: Arc<dyn Server> = Arc::new(
            DuckDbServer::new(Path::new(&descriptor.server))
                .context("Failed to open server directory")?,
        );

        Ok(Self {
            root,
            config,
            descriptor,
            server,
            verbose: global.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {msg}");
        }
    }
}
