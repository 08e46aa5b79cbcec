//! Status command implementation

use anyhow::{bail, Result};
use riser_engine::migrator::{PROP_BUILD_VERSION, PROP_LAST_UPDATED};
use riser_engine::Journal;

use crate::cli::{parse_overrides, GlobalArgs, StatusArgs};
use crate::context::RuntimeContext;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let overrides = parse_overrides(&args.overrides)?;
    if overrides.build_version.is_some() {
        bail!("v: override is only meaningful for migrate");
    }
    let ctx = RuntimeContext::new(global, overrides.connection.as_deref())?;

    let database = &ctx.descriptor.database;
    if !ctx.server.database_exists(database).await? {
        println!("Database '{database}' does not exist.");
        return Ok(());
    }

    let db = ctx.server.connect(database).await?;
    println!("Database: {database}");
    match db.get_property(PROP_LAST_UPDATED).await? {
        Some(ts) => println!("Last updated: {ts}"),
        None => println!("Last updated: never stamped"),
    }
    if let Some(version) = db.get_property(PROP_BUILD_VERSION).await? {
        println!("Build version: {version}");
    }

    let journal = Journal::new(db.as_ref());
    let records = match journal.applied().await {
        Ok(records) => records,
        Err(_) => {
            // No journal table yet: nothing has ever been applied
            println!("No schema scripts applied.");
            return Ok(());
        }
    };

    if records.is_empty() {
        println!("No schema scripts applied.");
    } else {
        println!("Applied schema scripts:");
        for record in records {
            println!("  {}  {}", record.applied_at, record.script_name);
        }
    }
    Ok(())
}
