//! Identifier validation for SQL interpolation
//!
//! Role, principal, and database names originate from configuration and
//! eventually reach SQL text or filesystem paths. Anything that could
//! terminate a quoted identifier or smuggle in a second statement is
//! rejected up front.

use crate::error::{CoreError, CoreResult};

/// Longest identifier accepted (matches common server-side limits)
const MAX_IDENTIFIER_LEN: usize = 128;

/// Validate an identifier before it is interpolated into SQL.
///
/// Accepts ASCII alphanumerics plus `_`, `-`, `.`, `\` (domain-qualified
/// principals like `CORP\deployers`), and interior spaces. Returns the
/// input unchanged on success so call sites can validate inline.
pub fn validate_identifier(name: &str) -> CoreResult<&str> {
    if name.is_empty() {
        return Err(invalid(name, "identifier is empty"));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(invalid(name, "identifier exceeds 128 characters"));
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(invalid(name, "leading or trailing whitespace"));
    }
    for ch in name.chars() {
        let ok = ch.is_ascii_alphanumeric()
            || matches!(ch, '_' | '-' | '.' | '\\' | ' ');
        if !ok {
            return Err(invalid(name, &format!("character '{ch}' is not allowed")));
        }
    }
    Ok(name)
}

fn invalid(name: &str, reason: &str) -> CoreError {
    CoreError::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
