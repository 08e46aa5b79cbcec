//! riser-core - Core library for Riser
//!
//! Shared domain types for the migration orchestrator: connection
//! descriptors, the script bundle and its classifier, project
//! configuration, and identifier validation.

pub mod config;
pub mod connection;
pub mod error;
pub mod ident;
pub mod script;

pub use config::Config;
pub use connection::{AuthMode, ConnectionDescriptor};
pub use error::{CoreError, CoreResult};
pub use ident::validate_identifier;
pub use script::{Category, ScriptBundle, ScriptEntry};
