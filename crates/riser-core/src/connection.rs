//! Connection descriptor parsing
//!
//! A connection string is a sequence of `key=value` pairs separated by
//! semicolons (`Server=db-host;Database=app;Integrated Security=true`).
//! [`ConnectionDescriptor::parse`] extracts the server address, database
//! name, and authentication mode; everything else is ignored.

use crate::error::{CoreError, CoreResult};

/// How the orchestrator authenticates against the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// OS-integrated / trusted authentication
    Integrated,
    /// Explicit user and password
    Credentials { user: String, password: String },
    /// No authentication material supplied (embedded backends)
    Anonymous,
}

/// Parsed identity of the migration target
///
/// Immutable after derivation; [`ConnectionDescriptor::override_with`]
/// re-derives the whole descriptor from a new connection string, never
/// updating fields piecemeal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// Server address (for the embedded DuckDB backend, a directory path)
    pub server: String,
    /// Target database name
    pub database: String,
    /// Authentication mode
    pub auth: AuthMode,
}

impl ConnectionDescriptor {
    /// Parse a connection string into a descriptor.
    ///
    /// Recognized keys (case-insensitive): `server` / `data source` /
    /// `address`, `database` / `initial catalog`, `integrated security` /
    /// `trusted_connection`, `user id` / `uid` / `user`, `password` / `pwd`.
    pub fn parse(connection_string: &str) -> CoreResult<Self> {
        let mut server = None;
        let mut database = None;
        let mut integrated = false;
        let mut user = None;
        let mut password = None;

        for pair in connection_string.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((key, value)) = pair.split_once('=') else {
                return Err(CoreError::MalformedConnectionString {
                    message: format!("expected key=value, found '{pair}'"),
                });
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "server" | "data source" | "address" => server = Some(value.to_string()),
                "database" | "initial catalog" => database = Some(value.to_string()),
                "integrated security" | "trusted_connection" => {
                    integrated = matches!(
                        value.to_ascii_lowercase().as_str(),
                        "true" | "sspi" | "yes"
                    );
                }
                "user id" | "uid" | "user" => user = Some(value.to_string()),
                "password" | "pwd" => password = Some(value.to_string()),
                _ => {}
            }
        }

        let server = server.filter(|s| !s.is_empty()).ok_or_else(|| {
            CoreError::MalformedConnectionString {
                message: "no server address found".to_string(),
            }
        })?;
        let database = database.filter(|s| !s.is_empty()).ok_or_else(|| {
            CoreError::MalformedConnectionString {
                message: "no database name found".to_string(),
            }
        })?;

        let auth = if integrated {
            AuthMode::Integrated
        } else if let Some(user) = user {
            AuthMode::Credentials {
                user,
                password: password.unwrap_or_default(),
            }
        } else {
            AuthMode::Anonymous
        };

        Ok(Self {
            server,
            database,
            auth,
        })
    }

    /// Replace this descriptor with one derived from `connection_string`.
    ///
    /// On parse failure the existing descriptor is left untouched.
    pub fn override_with(&mut self, connection_string: &str) -> CoreResult<()> {
        *self = Self::parse(connection_string)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
