//! Role and login provisioning step
//!
//! Ensures the application role exists and, when permission deployment is
//! enabled, that the configured login group is a member of it. The login,
//! user, and membership sub-steps are each independently idempotent, so a
//! partially complete prior run converges on retry. All identifiers are
//! validated before they reach any SQL.

use crate::error::{EngineError, EngineResult};
use riser_core::{validate_identifier, Config};
use riser_db::{Database, Server};

/// Run the provisioning step for one target database.
pub async fn provision(
    server: &dyn Server,
    db: &dyn Database,
    config: &Config,
    database: &str,
) -> EngineResult<()> {
    let role = validate_identifier(&config.role)?;

    log::debug!("Ensuring role '{role}'");
    db.ensure_role(role)
        .await
        .map_err(|e| EngineError::Provisioning(format!("role '{role}': {e}")))?;

    if !config.deploy_permissions {
        log::debug!("Permission deployment disabled, skipping login provisioning");
        return Ok(());
    }

    let Some(group) = config.login_group.as_deref() else {
        log::warn!("deploy_permissions is set but no login_group is configured");
        return Ok(());
    };
    let group = validate_identifier(group)?;

    log::debug!("Ensuring login '{group}' with access to '{database}'");
    server
        .ensure_login(group, database)
        .await
        .map_err(|e| EngineError::Provisioning(format!("login '{group}': {e}")))?;
    db.ensure_user(group)
        .await
        .map_err(|e| EngineError::Provisioning(format!("user '{group}': {e}")))?;
    db.ensure_role_member(role, group)
        .await
        .map_err(|e| EngineError::Provisioning(format!("membership '{group}' in '{role}': {e}")))?;

    Ok(())
}

#[cfg(test)]
#[path = "provision_test.rs"]
mod tests;
