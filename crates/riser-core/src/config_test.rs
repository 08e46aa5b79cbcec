use super::*;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
name: app_db
connection: "Server=./warehouse;Database=app"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "app_db");
    assert_eq!(config.role, "riser_admin");
    assert!(!config.deploy_permissions);
    assert!(config.login_group.is_none());

    let root = std::path::PathBuf::from("/tmp/project");
    assert_eq!(
        config.script_paths_absolute(&root),
        vec![root.join("scripts")]
    );
    assert_eq!(config.backup_dir_absolute(&root), root.join("backups"));
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: app_db
connection: "Server=./warehouse;Database=app;Integrated Security=true"
role: app_admin
login_group: "CORP\\deployers"
deploy_permissions: true
script_paths:
  - sql/migrations
  - sql/maintenance
backup_dir: var/backups
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.role, "app_admin");
    assert_eq!(config.login_group.as_deref(), Some("CORP\\deployers"));
    assert!(config.deploy_permissions);
    assert_eq!(config.script_paths.len(), 2);
    assert_eq!(config.backup_dir, "var/backups");
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = "name: x\nconnection: \"Server=a;Database=b\"\nbogus: 1\n";
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn test_load_missing_file() {
    let err = Config::load(Path::new("/nonexistent/riser.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE),
        "name: app\nconnection: \"Server=w;Database=app\"\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "app");
}

#[test]
fn test_load_invalid_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    std::fs::write(&path, "name: [unclosed").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
