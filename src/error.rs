//! Error types for schema parsing and INSERT generation.
//!
//! Two layers of failure exist:
//! - [`FormatError`] is raised when a column type string cannot be parsed.
//!   Value synthesis swallows it and emits the `'Unknown'` sentinel.
//! - [`SchemaError`] aborts a generation run. Every variant carries enough
//!   file/table/field context to be shown to the user as-is.

use std::path::PathBuf;

/// A column type string did not start with a base-type identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid data type format: '{input}'")]
pub struct FormatError {
    pub input: String,
}

impl FormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Fatal error that aborts a generation run
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("no valid CREATE TABLE statement found in {source_name}")]
    MissingCreateTable { source_name: String },

    #[error("unterminated column list for table '{table}' in {source_name}")]
    UnterminatedColumns { source_name: String, table: String },

    #[error("no columns found for table '{table}' in {source_name}")]
    EmptyColumnBlock { source_name: String, table: String },

    #[error("no valid columns parsed for table '{table}' in {source_name}")]
    NoValidColumns { source_name: String, table: String },

    #[error("no schema files matching '*.{extension}' found in {}", .dir.display())]
    NoSchemaFiles { dir: PathBuf, extension: String },

    #[error("invalid schema file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("shared field '{field}' not found in table '{table}'")]
    SharedFieldMissing { field: String, table: String },

    #[error(
        "shared field '{field}' has type '{found}' in table '{table}' but '{expected}' in table '{first_table}'"
    )]
    SharedFieldMismatch {
        field: String,
        table: String,
        found: String,
        first_table: String,
        expected: String,
    },

    #[error("invalid type for shared field '{field}' in table '{table}'")]
    Format {
        field: String,
        table: String,
        #[source]
        source: FormatError,
    },

    #[error("error reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SchemaError::Io {
            path: path.into(),
            source,
        }
    }
}
