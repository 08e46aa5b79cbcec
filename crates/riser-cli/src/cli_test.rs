use super::*;
use clap::Parser;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_db_override() {
    let overrides = parse_overrides(&strings(&["db:Server=host;Database=app"])).unwrap();
    assert_eq!(
        overrides.connection.as_deref(),
        Some("Server=host;Database=app")
    );
    assert!(overrides.build_version.is_none());
}

#[test]
fn test_parse_version_override() {
    let overrides = parse_overrides(&strings(&["v:2.4.1"])).unwrap();
    assert_eq!(overrides.build_version.as_deref(), Some("2.4.1"));
}

#[test]
fn test_parse_both_overrides() {
    let overrides =
        parse_overrides(&strings(&["db:Server=h;Database=d", "v:1.0"])).unwrap();
    assert!(overrides.connection.is_some());
    assert!(overrides.build_version.is_some());
}

#[test]
fn test_value_keeps_embedded_colons() {
    // Only the first ':' separates key from value
    let overrides = parse_overrides(&strings(&["db:Server=tcp:host;Database=d"])).unwrap();
    assert_eq!(
        overrides.connection.as_deref(),
        Some("Server=tcp:host;Database=d")
    );
}

#[test]
fn test_missing_colon_is_error() {
    assert!(parse_overrides(&strings(&["dbServer=h"])).is_err());
}

#[test]
fn test_empty_value_is_error() {
    assert!(parse_overrides(&strings(&["db:"])).is_err());
}

#[test]
fn test_unknown_key_is_error() {
    assert!(parse_overrides(&strings(&["x:1"])).is_err());
}

#[test]
fn test_no_overrides() {
    assert_eq!(parse_overrides(&[]).unwrap(), Overrides::default());
}

#[test]
fn test_cli_parses_migrate_with_overrides() {
    let cli = Cli::parse_from([
        "riser",
        "migrate",
        "db:Server=h;Database=d",
        "v:1.2.3",
        "--output",
        "json",
    ]);
    match cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.overrides.len(), 2);
            assert_eq!(args.output, OutputFormat::Json);
        }
        _ => panic!("expected migrate subcommand"),
    }
}

#[test]
fn test_cli_parses_status() {
    let cli = Cli::parse_from(["riser", "-p", "/tmp/project", "status"]);
    assert_eq!(cli.global.project_dir, "/tmp/project");
    assert!(matches!(cli.command, Commands::Status(_)));
}
