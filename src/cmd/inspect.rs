use serde::Serialize;
use sql_seeder::assembler::load_schemas;
use sql_seeder::schema::{Schema, TypeSpec};
use std::path::PathBuf;

/// JSON output for inspect
#[derive(Serialize)]
struct InspectJsonOutput {
    schema_dir: String,
    tables: Vec<TableJson>,
}

#[derive(Serialize)]
struct TableJson {
    table: String,
    source: String,
    columns: Vec<ColumnJson>,
}

#[derive(Serialize)]
struct ColumnJson {
    name: String,
    raw_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    type_spec: Option<TypeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    supported: bool,
}

impl From<&Schema> for TableJson {
    fn from(schema: &Schema) -> Self {
        Self {
            table: schema.table_name.clone(),
            source: schema.source_name.clone(),
            columns: schema
                .columns()
                .iter()
                .map(|c| ColumnJson {
                    name: c.name.clone(),
                    raw_type: c.raw_type.clone(),
                    type_spec: c.resolved.as_ref().ok().cloned(),
                    error: c.resolved.as_ref().err().map(|e| e.to_string()),
                    supported: c.is_supported(),
                })
                .collect(),
        }
    }
}

pub fn run(schema_dir: PathBuf, extension: String, json: bool) -> anyhow::Result<()> {
    let schemas = load_schemas(&schema_dir, &extension)?;

    if json {
        let output = InspectJsonOutput {
            schema_dir: schema_dir.display().to_string(),
            tables: schemas.iter().map(TableJson::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for schema in &schemas {
        println!("{} ({})", schema.table_name, schema.source_name);
        let name_width = schema.column_names().map(str::len).max().unwrap_or(0);
        for column in schema.columns() {
            let resolved = match &column.resolved {
                Ok(spec) if spec.base_type.is_known() => spec.to_string(),
                Ok(spec) => format!("{} (unsupported)", spec),
                Err(e) => format!("error: {}", e),
            };
            println!(
                "  {:<width$}  {}  ->  {}",
                column.name,
                column.raw_type,
                resolved,
                width = name_width
            );
        }
        println!();
    }

    println!("Tables: {}", schemas.len());
    Ok(())
}
