//! INSERT statement assembly across multiple schemas.
//!
//! A run has two phases:
//! 1. Load: discover and parse every schema file, read and validate the
//!    shared fields. Any failure aborts before generation starts.
//! 2. Generate: build one [`SharedValueRecord`] per record index, then emit
//!    `num_records` INSERT statements per table in discovery order.

mod discover;
mod shared;

pub use discover::{discover_schema_files, load_schemas, DEFAULT_SCHEMA_EXTENSION};
pub use shared::{
    generate_shared_values, parse_shared_fields, read_shared_fields, validate_shared_fields,
    SharedField, SharedValueRecord, SHARED_FIELDS_FILE,
};

use crate::error::SchemaError;
use crate::generator::{ValueSynthesizer, UNKNOWN_LITERAL};
use crate::schema::Schema;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Default number of records generated per table
pub const DEFAULT_NUM_RECORDS: usize = 5;

/// Line written after each table's block of statements
pub const TABLE_SEPARATOR: &str = "****";

/// Generated statements for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertBatch {
    pub table_name: String,
    pub statements: Vec<String>,
}

/// Everything loaded and validated before generation starts
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub schemas: Vec<Schema>,
    pub shared_fields: Vec<SharedField>,
}

/// Configured generation run over a directory of schema files
#[derive(Debug, Clone)]
pub struct Assembler {
    schema_dir: PathBuf,
    extension: String,
    num_records: usize,
    shared_fields_file: Option<PathBuf>,
    extra_shared_fields: Vec<String>,
}

impl Assembler {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            extension: DEFAULT_SCHEMA_EXTENSION.to_string(),
            num_records: DEFAULT_NUM_RECORDS,
            shared_fields_file: None,
            extra_shared_fields: Vec::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_num_records(mut self, num_records: usize) -> Self {
        self.num_records = num_records;
        self
    }

    /// Read shared fields from this file instead of
    /// `<schema_dir>/shared_fields.txt`. The file must exist.
    pub fn with_shared_fields_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.shared_fields_file = Some(path.into());
        self
    }

    /// Additional shared fields, merged after those from the file
    pub fn with_shared_fields(mut self, fields: Vec<String>) -> Self {
        self.extra_shared_fields = fields;
        self
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// Load and validate everything needed for generation
    pub fn load(&self) -> Result<GenerationPlan, SchemaError> {
        let schemas = load_schemas(&self.schema_dir, &self.extension)?;
        for schema in &schemas {
            tracing::debug!(
                table = %schema.table_name,
                source = %schema.source_name,
                columns = ?schema.column_names().collect::<Vec<_>>(),
                "parsed schema"
            );
        }

        let mut field_names = match &self.shared_fields_file {
            Some(path) => read_shared_fields(path)?,
            None => {
                let default_path = self.schema_dir.join(SHARED_FIELDS_FILE);
                if default_path.is_file() {
                    read_shared_fields(&default_path)?
                } else {
                    Vec::new()
                }
            }
        };
        for field in &self.extra_shared_fields {
            if !field_names.contains(field) {
                field_names.push(field.clone());
            }
        }

        let shared_fields = validate_shared_fields(&field_names, &schemas)?;
        if !shared_fields.is_empty() {
            tracing::debug!(fields = ?field_names, "validated shared fields");
        }

        Ok(GenerationPlan {
            schemas,
            shared_fields,
        })
    }

    /// Load, validate and generate in one step
    pub fn run<R: Rng>(
        &self,
        synth: &mut ValueSynthesizer<R>,
    ) -> Result<Vec<InsertBatch>, SchemaError> {
        let plan = self.load()?;
        Ok(generate_batches(
            &plan.schemas,
            &plan.shared_fields,
            self.num_records,
            synth,
        ))
    }
}

/// Validate `shared_fields` against `schemas`, then generate statements.
///
/// Nothing is generated when validation fails.
pub fn generate_insert_statements<R: Rng>(
    schemas: &[Schema],
    shared_fields: &[String],
    num_records: usize,
    synth: &mut ValueSynthesizer<R>,
) -> Result<Vec<InsertBatch>, SchemaError> {
    let validated = validate_shared_fields(shared_fields, schemas)?;
    Ok(generate_batches(schemas, &validated, num_records, synth))
}

/// Generate statements for already validated shared fields
pub fn generate_batches<R: Rng>(
    schemas: &[Schema],
    shared_fields: &[SharedField],
    num_records: usize,
    synth: &mut ValueSynthesizer<R>,
) -> Vec<InsertBatch> {
    let shared_values = generate_shared_values(shared_fields, num_records, synth);

    schemas
        .iter()
        .map(|schema| {
            warn_unsupported_columns(schema);
            let columns: Vec<&str> = schema.column_names().collect();

            let statements = shared_values
                .iter()
                .map(|record| {
                    let values: Vec<String> = schema
                        .columns()
                        .iter()
                        .map(|column| match record.get(&column.name) {
                            Some(value) => value.clone(),
                            None => match &column.resolved {
                                Ok(spec) => synth.generate_for(spec),
                                Err(_) => UNKNOWN_LITERAL.to_string(),
                            },
                        })
                        .collect();
                    render_insert(&schema.table_name, &columns, &values)
                })
                .collect();

            InsertBatch {
                table_name: schema.table_name.clone(),
                statements,
            }
        })
        .collect()
}

/// `INSERT INTO <table> (<cols>) VALUES (<vals>);`
pub fn render_insert(table_name: &str, columns: &[&str], values: &[String]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table_name,
        columns.join(", "),
        values.join(", ")
    )
}

fn warn_unsupported_columns(schema: &Schema) {
    for column in schema.columns() {
        if !column.is_supported() {
            tracing::warn!(
                table = %schema.table_name,
                column = %column.name,
                raw_type = %column.raw_type,
                "unsupported column type, values will be {}",
                UNKNOWN_LITERAL
            );
        }
    }
}
