use super::*;

#[test]
fn test_parse_basic() {
    let desc =
        ConnectionDescriptor::parse("Server=./warehouse;Database=app;Integrated Security=true")
            .unwrap();
    assert_eq!(desc.server, "./warehouse");
    assert_eq!(desc.database, "app");
    assert_eq!(desc.auth, AuthMode::Integrated);
}

#[test]
fn test_parse_keys_case_insensitive() {
    let desc = ConnectionDescriptor::parse("DATA SOURCE=host;INITIAL CATALOG=db").unwrap();
    assert_eq!(desc.server, "host");
    assert_eq!(desc.database, "db");
    assert_eq!(desc.auth, AuthMode::Anonymous);
}

#[test]
fn test_parse_credentials() {
    let desc =
        ConnectionDescriptor::parse("Server=host;Database=db;User Id=deploy;Password=s3cret")
            .unwrap();
    assert_eq!(
        desc.auth,
        AuthMode::Credentials {
            user: "deploy".to_string(),
            password: "s3cret".to_string(),
        }
    );
}

#[test]
fn test_parse_integrated_sspi() {
    let desc =
        ConnectionDescriptor::parse("Server=host;Database=db;Integrated Security=SSPI").unwrap();
    assert_eq!(desc.auth, AuthMode::Integrated);
}

#[test]
fn test_parse_trailing_semicolon_and_whitespace() {
    let desc = ConnectionDescriptor::parse(" Server = host ; Database = db ; ").unwrap();
    assert_eq!(desc.server, "host");
    assert_eq!(desc.database, "db");
}

#[test]
fn test_parse_missing_database() {
    let err = ConnectionDescriptor::parse("Server=host").unwrap_err();
    assert!(matches!(err, CoreError::MalformedConnectionString { .. }));
    assert!(err.to_string().contains("database"));
}

#[test]
fn test_parse_missing_server() {
    let err = ConnectionDescriptor::parse("Database=db").unwrap_err();
    assert!(matches!(err, CoreError::MalformedConnectionString { .. }));
}

#[test]
fn test_parse_garbage_pair() {
    let err = ConnectionDescriptor::parse("Server=host;Database=db;bogus").unwrap_err();
    assert!(matches!(err, CoreError::MalformedConnectionString { .. }));
}

#[test]
fn test_parse_empty_string() {
    assert!(ConnectionDescriptor::parse("").is_err());
}

#[test]
fn test_override_replaces_whole_descriptor() {
    let mut desc = ConnectionDescriptor::parse("Server=a;Database=one;User Id=u").unwrap();
    desc.override_with("Server=b;Database=two").unwrap();
    assert_eq!(desc.server, "b");
    assert_eq!(desc.database, "two");
    assert_eq!(desc.auth, AuthMode::Anonymous);
}

#[test]
fn test_override_failure_keeps_original() {
    let mut desc = ConnectionDescriptor::parse("Server=a;Database=one").unwrap();
    assert!(desc.override_with("Server=only").is_err());
    assert_eq!(desc.server, "a");
    assert_eq!(desc.database, "one");
}
