//! Schema model and parsing for simplified `CREATE TABLE` definitions.
//!
//! This module provides:
//! - Data models for a parsed table and its columns
//! - A depth-tracking DDL scanner that extracts the column list
//! - A type-string parser producing structured [`TypeSpec`]s

mod ddl;
mod scan;
mod types;

pub use ddl::*;
pub use types::{parse_type_spec, BaseType, TypeSpec};

use crate::error::FormatError;

/// Single column definition within a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name with identifier quoting removed
    pub name: String,
    /// Type text as written after the name, upper-cased and trimmed
    pub raw_type: String,
    /// Parsed form of `raw_type`
    pub resolved: Result<TypeSpec, FormatError>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        let raw_type = raw_type.into();
        let resolved = parse_type_spec(&raw_type);
        Self {
            name: name.into(),
            raw_type,
            resolved,
        }
    }

    /// True when the type parsed to a base type values can be generated for
    pub fn is_supported(&self) -> bool {
        self.resolved
            .as_ref()
            .is_ok_and(|spec| spec.base_type.is_known())
    }
}

/// A parsed table: name plus columns in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub table_name: String,
    /// Where the schema came from (file path or a caller-chosen label)
    pub source_name: String,
    columns: Vec<ColumnDef>,
}

impl Schema {
    pub fn new(table_name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            source_name: source_name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a column. Redefining an existing name replaces its type but
    /// keeps the original position.
    pub fn insert_column(&mut self, column: ColumnDef) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by exact name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
