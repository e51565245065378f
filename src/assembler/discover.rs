//! Schema file discovery and loading.
//!
//! Expands `<dir>/*.<extension>` into a sorted file list so table order in
//! the output is stable across runs and platforms.

use crate::error::SchemaError;
use crate::schema::{parse_schema_file, Schema};
use std::path::{Path, PathBuf};

/// Default extension of schema files
pub const DEFAULT_SCHEMA_EXTENSION: &str = "sql";

/// List schema files in `dir` with the given extension, sorted by path.
///
/// # Errors
///
/// Returns an error if:
/// - The glob pattern built from `dir` is invalid
/// - A matching path cannot be read
/// - No files match
pub fn discover_schema_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SchemaError> {
    let extension = extension.trim_start_matches('.');
    let pattern = schema_glob_pattern(dir, extension);

    let entries = glob::glob(&pattern).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                let path = e.path().to_path_buf();
                return Err(SchemaError::io(path, e.into_error()));
            }
        }
    }

    if files.is_empty() {
        return Err(SchemaError::NoSchemaFiles {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    files.sort();
    Ok(files)
}

/// `<dir>/*.<extension>` with `dir` escaped; an empty `dir` means the
/// current directory
fn schema_glob_pattern(dir: &Path, extension: &str) -> String {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    )
}

/// Discover and parse every schema file in `dir`.
///
/// All files are parsed before returning, so a bad file fails the run
/// before any values are generated.
pub fn load_schemas(dir: &Path, extension: &str) -> Result<Vec<Schema>, SchemaError> {
    let files = discover_schema_files(dir, extension)?;
    tracing::debug!(count = files.len(), dir = %dir.display(), "discovered schema files");

    files
        .iter()
        .map(|path| parse_schema_file(path))
        .collect()
}
