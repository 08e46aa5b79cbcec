//! Migrate command implementation

use anyhow::{bail, Context, Result};
use riser_core::ScriptBundle;
use riser_engine::{MigrationOutcome, Migrator};

use crate::cli::{parse_overrides, GlobalArgs, MigrateArgs, OutputFormat};
use crate::context::RuntimeContext;

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let overrides = parse_overrides(&args.overrides)?;
    let ctx = RuntimeContext::new(global, overrides.connection.as_deref())?;

    let script_dirs = ctx.config.script_paths_absolute(&ctx.root);
    let bundle = ScriptBundle::load_dirs(&script_dirs).context("Failed to load script bundle")?;
    ctx.verbose(&format!(
        "Loaded {} scripts from {:?}",
        bundle.len(),
        ctx.config.script_paths
    ));

    let unclassified = bundle.unclassified_names();
    if !unclassified.is_empty() {
        println!(
            "Warning: {} script(s) match no category and will be skipped: {}",
            unclassified.len(),
            unclassified.join(", ")
        );
    }

    let migrator = Migrator::new(
        ctx.server.clone(),
        ctx.descriptor.clone(),
        ctx.config.clone(),
        ctx.config.backup_dir_absolute(&ctx.root),
    )
    .with_build_version(overrides.build_version);

    let outcome = migrator.migrate(&bundle).await?;

    match args.output {
        OutputFormat::Text => print_text(&outcome),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to render outcome")?
        ),
    }

    if !outcome.success {
        let detail = outcome
            .first_error()
            .map(|(category, error)| format!("{category} phase: {error}"))
            .or(outcome.stamp_error.clone())
            .unwrap_or_else(|| "unknown failure".to_string());
        bail!("migration failed: {detail}");
    }
    Ok(())
}

fn print_text(outcome: &MigrationOutcome) {
    println!("Run {}:", outcome.run_id);
    if outcome.created_database {
        println!("  database created");
    }
    for phase in &outcome.phases {
        match &phase.error {
            None => println!(
                "  {:<8} ok      applied {}, skipped {}",
                phase.category.to_string(),
                phase.applied,
                phase.skipped
            ),
            Some(error) => println!(
                "  {:<8} FAILED  applied {} ({error})",
                phase.category.to_string(),
                phase.applied
            ),
        }
    }
    if let Some(stamp) = &outcome.stamp_error {
        println!("  stamp    FAILED  ({stamp})");
    }
    println!(
        "{}",
        if outcome.success {
            "Upgrade successful"
        } else {
            "*** UPGRADE FAILED ***"
        }
    );
}
