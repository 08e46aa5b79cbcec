use super::*;
use std::fs;

#[test]
fn test_classify_schema_prefix() {
    assert_eq!(Category::classify("Schema.0001_init"), Category::Schema);
    assert_eq!(Category::classify("schema.0002_addcol"), Category::Schema);
}

#[test]
fn test_classify_always_segment() {
    assert_eq!(Category::classify("Always.refresh_view"), Category::Always);
    assert_eq!(
        Category::classify("Scripts.Always.refresh_view"),
        Category::Always
    );
}

#[test]
fn test_classify_seed_segment() {
    assert_eq!(Category::classify("Seed.insert_lookup"), Category::Seed);
    assert_eq!(Category::classify("Scripts.Seed.countries"), Category::Seed);
}

#[test]
fn test_classify_schema_wins_over_markers() {
    // A schema prefix routes to Schema even when a later segment says seed
    assert_eq!(Category::classify("Schema.seed_tables"), Category::Schema);
}

#[test]
fn test_classify_schema_only_as_first_segment() {
    // "schema" in the middle of a name is not the schema prefix
    assert_eq!(
        Category::classify("Scripts.schema.0001_init"),
        Category::Unclassified
    );
}

#[test]
fn test_classify_unrecognized() {
    assert_eq!(Category::classify("README"), Category::Unclassified);
    assert_eq!(Category::classify("Misc.cleanup"), Category::Unclassified);
}

#[test]
fn test_bundle_routes_each_script_once() {
    let bundle = ScriptBundle::from_pairs(vec![
        ("Schema.0001_init".to_string(), "CREATE TABLE a (id INT);".to_string()),
        ("Always.refresh".to_string(), "SELECT 1;".to_string()),
        ("Seed.lookup".to_string(), "SELECT 2;".to_string()),
        ("stray_file".to_string(), "SELECT 3;".to_string()),
    ]);

    assert_eq!(bundle.len(), 4);
    assert_eq!(bundle.schema_scripts().len(), 1);
    assert_eq!(bundle.always_scripts().len(), 1);
    assert_eq!(bundle.seed_scripts().len(), 1);
    assert_eq!(bundle.unclassified_names(), vec!["stray_file"]);
}

#[test]
fn test_schema_ordering_is_lexicographic() {
    // Deliberately shuffled input order
    let bundle = ScriptBundle::from_pairs(vec![
        ("Schema.0003_index".to_string(), String::new()),
        ("Schema.0001_init".to_string(), String::new()),
        ("Schema.0002_addcol".to_string(), String::new()),
    ]);

    let names: Vec<&str> = bundle
        .schema_scripts()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Schema.0001_init", "Schema.0002_addcol", "Schema.0003_index"]
    );
}

#[test]
fn test_unclassified_excluded_from_all_phases() {
    let bundle = ScriptBundle::from_pairs(vec![("notes".to_string(), String::new())]);
    assert!(bundle.schema_scripts().is_empty());
    assert!(bundle.always_scripts().is_empty());
    assert!(bundle.seed_scripts().is_empty());
    assert_eq!(bundle.unclassified_names().len(), 1);
}

#[test]
fn test_load_dir_derives_logical_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Schema")).unwrap();
    fs::create_dir_all(dir.path().join("Seed")).unwrap();
    fs::write(
        dir.path().join("Schema/0001_init.sql"),
        "CREATE TABLE t (id INT);",
    )
    .unwrap();
    fs::write(dir.path().join("Seed/lookup.sql"), "SELECT 1;").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a script").unwrap();

    let bundle = ScriptBundle::load_dir(dir.path()).unwrap();
    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.schema_scripts()[0].name, "Schema.0001_init");
    assert_eq!(bundle.schema_scripts()[0].body, "CREATE TABLE t (id INT);");
    assert_eq!(bundle.seed_scripts()[0].name, "Seed.lookup");
}

#[test]
fn test_load_dirs_skips_missing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Always.refresh.sql"), "SELECT 1;").unwrap();

    let bundle = ScriptBundle::load_dirs(&[
        dir.path().to_path_buf(),
        dir.path().join("does_not_exist"),
    ])
    .unwrap();
    assert_eq!(bundle.len(), 1);
    assert_eq!(bundle.always_scripts()[0].name, "Always.refresh");
}

#[test]
fn test_load_dir_missing_root_is_error() {
    let err = ScriptBundle::load_dir(Path::new("/nonexistent/scripts")).unwrap_err();
    assert!(matches!(err, CoreError::BundleReadError { .. }));
}
