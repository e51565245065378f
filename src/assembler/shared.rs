//! Shared fields: columns that carry the same value in every table for a
//! given record index.

use crate::error::SchemaError;
use crate::generator::ValueSynthesizer;
use crate::schema::{Schema, TypeSpec};
use ahash::AHashMap;
use rand::Rng;
use std::fs;
use std::path::Path;

/// Default shared-fields file name inside the schema directory
pub const SHARED_FIELDS_FILE: &str = "shared_fields.txt";

/// A shared field after validation, with the type every table agrees on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedField {
    pub name: String,
    pub spec: TypeSpec,
}

/// Values of every shared field for one record index
pub type SharedValueRecord = AHashMap<String, String>;

/// Parse a shared-fields declaration: comma-separated names, any number
/// per line. Blank entries are ignored and duplicates keep the first
/// occurrence.
pub fn parse_shared_fields(content: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for name in content.lines().flat_map(|line| line.split(',')) {
        let name = name.trim();
        if !name.is_empty() && !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }
    fields
}

/// Read and parse a shared-fields file
pub fn read_shared_fields(path: &Path) -> Result<Vec<String>, SchemaError> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
    Ok(parse_shared_fields(&content))
}

/// Check that every shared field exists in every schema with the same
/// parsed type.
///
/// Raw type text may differ (`int` vs `INT`) as long as the parsed
/// [`TypeSpec`]s are equal.
pub fn validate_shared_fields(
    fields: &[String],
    schemas: &[Schema],
) -> Result<Vec<SharedField>, SchemaError> {
    let mut validated = Vec::with_capacity(fields.len());

    for field in fields {
        let mut first: Option<(&Schema, TypeSpec)> = None;

        for schema in schemas {
            let column =
                schema
                    .get_column(field)
                    .ok_or_else(|| SchemaError::SharedFieldMissing {
                        field: field.clone(),
                        table: schema.table_name.clone(),
                    })?;

            let spec = column
                .resolved
                .clone()
                .map_err(|source| SchemaError::Format {
                    field: field.clone(),
                    table: schema.table_name.clone(),
                    source,
                })?;

            if let Some((first_schema, expected)) = &first {
                if *expected != spec {
                    return Err(SchemaError::SharedFieldMismatch {
                        field: field.clone(),
                        table: schema.table_name.clone(),
                        found: spec.to_string(),
                        first_table: first_schema.table_name.clone(),
                        expected: expected.to_string(),
                    });
                }
            } else {
                first = Some((schema, spec));
            }
        }

        if let Some((_, spec)) = first {
            validated.push(SharedField {
                name: field.clone(),
                spec,
            });
        }
    }

    Ok(validated)
}

/// Generate one [`SharedValueRecord`] per record index.
///
/// Records are produced in index order; within a record, fields are
/// generated in declaration order.
pub fn generate_shared_values<R: Rng>(
    fields: &[SharedField],
    num_records: usize,
    synth: &mut ValueSynthesizer<R>,
) -> Vec<SharedValueRecord> {
    (0..num_records)
        .map(|index| {
            let record: SharedValueRecord = fields
                .iter()
                .map(|field| (field.name.clone(), synth.generate_for(&field.spec)))
                .collect();
            tracing::debug!(index, values = ?record, "generated shared values");
            record
        })
        .collect()
}
