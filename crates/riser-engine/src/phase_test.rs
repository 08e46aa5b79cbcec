use super::*;
use riser_db::DuckDbBackend;

fn script(name: &str, body: &str) -> ScriptEntry {
    ScriptEntry {
        name: name.to_string(),
        category: Category::classify(name),
        body: body.to_string(),
    }
}

async fn db_with_journal() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    Journal::new(&db).ensure_table().await.unwrap();
    db
}

#[tokio::test]
async fn test_journaled_phase_applies_and_records() {
    let db = db_with_journal().await;
    let journal = Journal::new(&db);
    let scripts = [
        script("Schema.0001_init", "CREATE TABLE t (id INT);"),
        script("Schema.0002_addcol", "ALTER TABLE t ADD COLUMN name TEXT;"),
    ];
    let refs: Vec<&ScriptEntry> = scripts.iter().collect();

    let result = run_phase(&db, &journal, Category::Schema, &refs, true).await;
    assert!(result.succeeded());
    assert_eq!(result.applied, 2);
    assert_eq!(result.skipped, 0);
    assert!(journal.has_applied("Schema.0001_init").await.unwrap());
    assert!(journal.has_applied("Schema.0002_addcol").await.unwrap());
}

#[tokio::test]
async fn test_journaled_phase_skips_applied() {
    let db = db_with_journal().await;
    let journal = Journal::new(&db);
    let scripts = [script("Schema.0001_init", "CREATE TABLE t (id INT);")];
    let refs: Vec<&ScriptEntry> = scripts.iter().collect();

    let first = run_phase(&db, &journal, Category::Schema, &refs, true).await;
    assert_eq!(first.applied, 1);

    // Second run is a no-op for every already-applied entry
    let second = run_phase(&db, &journal, Category::Schema, &refs, true).await;
    assert!(second.succeeded());
    assert_eq!(second.applied, 0);
    assert_eq!(second.skipped, 1);
}

#[tokio::test]
async fn test_fail_fast_stops_remaining_scripts() {
    let db = db_with_journal().await;
    let journal = Journal::new(&db);
    let scripts = [
        script("Schema.0001_init", "CREATE TABLE t (id INT);"),
        script("Schema.0002_broken", "SELECT * FROM no_such_table;"),
        script("Schema.0003_never", "CREATE TABLE never (id INT);"),
    ];
    let refs: Vec<&ScriptEntry> = scripts.iter().collect();

    let result = run_phase(&db, &journal, Category::Schema, &refs, true).await;
    assert!(!result.succeeded());
    assert_eq!(result.applied, 1);
    assert!(result.error.as_deref().unwrap().contains("Schema.0002_broken"));
    // The third script never ran and was never journaled
    assert!(!db.table_exists("never").await.unwrap());
    assert!(!journal.has_applied("Schema.0003_never").await.unwrap());
    // The first script's work stays committed — no rollback
    assert!(db.table_exists("t").await.unwrap());
    assert!(journal.has_applied("Schema.0001_init").await.unwrap());
}

#[tokio::test]
async fn test_unjournaled_phase_reruns_every_time() {
    let db = db_with_journal().await;
    let journal = Journal::new(&db);
    let scripts = [script(
        "Always.refresh_view",
        "CREATE OR REPLACE VIEW v AS SELECT 1 AS one;",
    )];
    let refs: Vec<&ScriptEntry> = scripts.iter().collect();

    let first = run_phase(&db, &journal, Category::Always, &refs, false).await;
    let second = run_phase(&db, &journal, Category::Always, &refs, false).await;
    assert_eq!(first.applied, 1);
    assert_eq!(second.applied, 1);
    assert_eq!(second.skipped, 0);
    // Nothing journaled for unjournaled phases
    assert!(!journal.has_applied("Always.refresh_view").await.unwrap());
}

#[tokio::test]
async fn test_empty_phase_succeeds() {
    let db = db_with_journal().await;
    let journal = Journal::new(&db);
    let result = run_phase(&db, &journal, Category::Seed, &[], false).await;
    assert!(result.succeeded());
    assert_eq!(result.applied, 0);
}
