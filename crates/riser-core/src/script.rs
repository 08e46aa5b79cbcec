//! Script bundle loading and classification
//!
//! Every script has a dot-separated logical name (`Schema.0001_init`,
//! `Always.refresh_views`, `Seed.insert_lookup`). The logical name is both
//! the classification input and the sort/identity key: within a category,
//! scripts apply in lexicographic name order, and the journal records
//! applied Schema scripts under this name.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Which migration phase a script belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Journaled schema change, applied at most once
    Schema,
    /// Idempotent maintenance script, re-run on every migration
    Always,
    /// Idempotent seed/reference-data script, re-run on every migration
    Seed,
    /// Unrecognized name; excluded from every phase
    Unclassified,
}

impl Category {
    /// Classify a logical script name.
    ///
    /// Pure and deterministic: a leading `schema` segment wins, otherwise
    /// an `always` or `seed` segment anywhere in the name decides.
    pub fn classify(logical_name: &str) -> Category {
        let mut segments = logical_name.split('.');
        if segments
            .next()
            .is_some_and(|s| s.eq_ignore_ascii_case("schema"))
        {
            return Category::Schema;
        }
        for segment in logical_name.split('.') {
            if segment.eq_ignore_ascii_case("always") {
                return Category::Always;
            }
            if segment.eq_ignore_ascii_case("seed") {
                return Category::Seed;
            }
        }
        Category::Unclassified
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Schema => "schema",
            Category::Always => "always",
            Category::Seed => "seed",
            Category::Unclassified => "unclassified",
        };
        write!(f, "{name}")
    }
}

/// A single named SQL payload, classified once at load time
#[derive(Debug, Clone)]
pub struct ScriptEntry {
    /// Logical name; unique within a bundle
    pub name: String,
    /// Category assigned by [`Category::classify`]
    pub category: Category,
    /// Opaque SQL body
    pub body: String,
}

/// The full set of scripts for one migration run
///
/// Classification happens up front when the bundle is built, never lazily
/// per phase. Unclassified entries are kept (so callers can report them)
/// but excluded from every category accessor.
#[derive(Debug, Clone, Default)]
pub struct ScriptBundle {
    scripts: Vec<ScriptEntry>,
}

impl ScriptBundle {
    /// Build a bundle from `(logical_name, body)` pairs.
    ///
    /// Logs a warning for every entry that classifies as unclassified —
    /// a stray name usually means a packaging mistake, but it should not
    /// block the run.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let scripts = pairs
            .into_iter()
            .map(|(name, body)| {
                let category = Category::classify(&name);
                if category == Category::Unclassified {
                    log::warn!("Script '{name}' matches no category and will be skipped");
                }
                ScriptEntry {
                    name,
                    category,
                    body,
                }
            })
            .collect();
        Self { scripts }
    }

    /// Load every `*.sql` file under `dir`, recursively.
    ///
    /// The logical name is the path relative to `dir` with separators
    /// replaced by `.` and the extension stripped, so
    /// `Schema/0001_init.sql` becomes `Schema.0001_init`.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        let mut pairs = Vec::new();
        collect_sql_files(dir, dir, &mut pairs)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Load and merge bundles from several script directories.
    ///
    /// Directories that do not exist are skipped, matching how seed-path
    /// discovery tolerates unused configured paths.
    pub fn load_dirs(dirs: &[std::path::PathBuf]) -> CoreResult<Self> {
        let mut pairs = Vec::new();
        for dir in dirs {
            if !dir.exists() {
                continue;
            }
            collect_sql_files(dir, dir, &mut pairs)?;
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Scripts in `category`, sorted lexicographically by logical name
    pub fn scripts_in(&self, category: Category) -> Vec<&ScriptEntry> {
        let mut scripts: Vec<&ScriptEntry> = self
            .scripts
            .iter()
            .filter(|s| s.category == category)
            .collect();
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        scripts
    }

    /// Journaled schema-change scripts, in applied order
    pub fn schema_scripts(&self) -> Vec<&ScriptEntry> {
        self.scripts_in(Category::Schema)
    }

    /// Re-run-every-time maintenance scripts
    pub fn always_scripts(&self) -> Vec<&ScriptEntry> {
        self.scripts_in(Category::Always)
    }

    /// Re-run-every-time seed-data scripts
    pub fn seed_scripts(&self) -> Vec<&ScriptEntry> {
        self.scripts_in(Category::Seed)
    }

    /// Names of entries excluded from every phase
    pub fn unclassified_names(&self) -> Vec<&str> {
        self.scripts_in(Category::Unclassified)
            .into_iter()
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Total number of entries, including unclassified ones
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// True when the bundle holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Recursively gather `(logical_name, body)` pairs for `*.sql` files
fn collect_sql_files(
    root: &Path,
    dir: &Path,
    pairs: &mut Vec<(String, String)>,
) -> CoreResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::BundleReadError {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| CoreError::BundleReadError {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_sql_files(root, &path, pairs)?;
        } else if path.extension().is_some_and(|e| e == "sql") {
            let body = std::fs::read_to_string(&path).map_err(|e| CoreError::BundleReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            pairs.push((logical_name(root, &path), body));
        }
    }
    Ok(())
}

/// Derive the dot-separated logical name from a path relative to `root`
fn logical_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path).with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
