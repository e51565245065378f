//! Tests for statement assembly and shared-field consistency.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sql_seeder::assembler::{generate_insert_statements, Assembler, InsertBatch};
use sql_seeder::generator::ValueSynthesizer;
use sql_seeder::schema::parse_schema;
use sql_seeder::SchemaError;
use std::fs;
use tempfile::TempDir;
use test_data_gen::{Generator, Scale, SqlType};

fn synth(seed: u64) -> ValueSynthesizer<StdRng> {
    ValueSynthesizer::new(StdRng::seed_from_u64(seed))
}

/// Split `INSERT INTO t (a, b) VALUES (x, y);` into column/value pairs.
/// Generated literals never contain ", ".
fn column_values(stmt: &str) -> Vec<(String, String)> {
    let (cols, vals) = stmt.split_once(") VALUES (").unwrap();
    let cols = &cols[cols.find('(').unwrap() + 1..];
    let vals = vals.strip_suffix(");").unwrap();
    cols.split(", ")
        .map(str::to_string)
        .zip(vals.split(", ").map(str::to_string))
        .collect()
}

fn value_of(stmt: &str, column: &str) -> String {
    column_values(stmt)
        .into_iter()
        .find(|(c, _)| c == column)
        .map(|(_, v)| v)
        .unwrap()
}

fn write_schema(dir: &TempDir, name: &str, sql: &str) {
    fs::write(dir.path().join(name), sql).unwrap();
}

#[test]
fn test_users_example_two_records() {
    let schemas = vec![parse_schema("CREATE TABLE users (id INT, age INT)", "users.sql").unwrap()];
    let batches = generate_insert_statements(&schemas, &[], 2, &mut synth(1)).unwrap();

    assert_eq!(batches.len(), 1);
    let users = &batches[0];
    assert_eq!(users.table_name, "users");
    assert_eq!(users.statements.len(), 2);
    for stmt in &users.statements {
        let cols: Vec<_> = column_values(stmt).into_iter().map(|(c, _)| c).collect();
        assert_eq!(cols, vec!["id", "age"]);
    }
}

#[test]
fn test_shared_id_matches_across_tables() {
    let schemas = vec![
        parse_schema("CREATE TABLE users (id INT, name VARCHAR(8))", "users.sql").unwrap(),
        parse_schema("CREATE TABLE orders (total DECIMAL(6,2), id INT)", "orders.sql").unwrap(),
    ];
    let batches =
        generate_insert_statements(&schemas, &["id".to_string()], 10, &mut synth(2)).unwrap();

    for i in 0..10 {
        assert_eq!(
            value_of(&batches[0].statements[i], "id"),
            value_of(&batches[1].statements[i], "id"),
            "record {}",
            i
        );
    }
}

#[test]
fn test_mismatched_shared_type_fails_before_output() {
    let schemas = vec![
        parse_schema("CREATE TABLE users (id INT)", "users.sql").unwrap(),
        parse_schema("CREATE TABLE orders (id VARCHAR(10))", "orders.sql").unwrap(),
    ];
    let err = generate_insert_statements(&schemas, &["id".to_string()], 3, &mut synth(3))
        .unwrap_err();
    assert!(matches!(err, SchemaError::SharedFieldMismatch { .. }));
}

#[test]
fn test_same_seed_same_output() {
    let schemas = vec![parse_schema(
        "CREATE TABLE t (a INT, b VARCHAR(6), c DECIMAL(7,3), d DATE, e BOOLEAN)",
        "t.sql",
    )
    .unwrap()];
    let a = generate_insert_statements(&schemas, &[], 5, &mut synth(9)).unwrap();
    let b = generate_insert_statements(&schemas, &[], 5, &mut synth(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_assembler_reads_default_shared_fields_file() {
    let dir = TempDir::new().unwrap();
    write_schema(&dir, "a_users.sql", "CREATE TABLE users (id INT, code CHAR(4))");
    write_schema(&dir, "b_orders.sql", "CREATE TABLE orders (code CHAR(4), id INT, qty INT)");
    fs::write(dir.path().join("shared_fields.txt"), "id,\ncode\n").unwrap();

    let assembler = Assembler::new(dir.path()).with_num_records(4);
    let plan = assembler.load().unwrap();
    let names: Vec<_> = plan.shared_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "code"]);

    let batches = assembler.run(&mut synth(4)).unwrap();
    let tables: Vec<_> = batches.iter().map(|b| b.table_name.as_str()).collect();
    assert_eq!(tables, vec!["users", "orders"]);
    for i in 0..4 {
        for field in ["id", "code"] {
            assert_eq!(
                value_of(&batches[0].statements[i], field),
                value_of(&batches[1].statements[i], field)
            );
        }
    }
}

#[test]
fn test_assembler_missing_shared_field() {
    let dir = TempDir::new().unwrap();
    write_schema(&dir, "users.sql", "CREATE TABLE users (id INT)");
    write_schema(&dir, "tags.sql", "CREATE TABLE tags (label VARCHAR(5))");

    let err = Assembler::new(dir.path())
        .with_shared_fields(vec!["id".to_string()])
        .load()
        .unwrap_err();
    match err {
        SchemaError::SharedFieldMissing { field, table } => {
            assert_eq!(field, "id");
            assert_eq!(table, "tags");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_assembler_explicit_shared_fields_file_must_exist() {
    let dir = TempDir::new().unwrap();
    write_schema(&dir, "users.sql", "CREATE TABLE users (id INT)");
    let err = Assembler::new(dir.path())
        .with_shared_fields_file(dir.path().join("nope.txt"))
        .load()
        .unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}

#[test]
fn test_assembler_no_schema_files() {
    let dir = TempDir::new().unwrap();
    let err = Assembler::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, SchemaError::NoSchemaFiles { .. }));
}

#[test]
fn test_generated_fixture_shared_fields() {
    let dir = TempDir::new().unwrap();
    let fixture = Generator::new(2024, Scale::Medium).generate();
    fixture.write_to(dir.path()).unwrap();

    let batches: Vec<InsertBatch> = Assembler::new(dir.path())
        .with_num_records(6)
        .run(&mut synth(5))
        .unwrap();
    assert_eq!(batches.len(), fixture.tables.len());

    let mut unsupported_checked = 0;
    for table in &fixture.tables {
        let batch = batches
            .iter()
            .find(|b| b.table_name == table.name)
            .unwrap();
        for column in table.columns.iter().filter(|c| c.sql_type == SqlType::Text) {
            for stmt in &batch.statements {
                assert_eq!(value_of(stmt, &column.name), "'Unknown'");
            }
            unsupported_checked += 1;
        }
    }
    assert!(unsupported_checked > 0);

    let first = &batches[0];
    for batch in &batches[1..] {
        assert_eq!(batch.statements.len(), 6);
        for i in 0..6 {
            for field in &fixture.shared_fields {
                assert_eq!(
                    value_of(&first.statements[i], field),
                    value_of(&batch.statements[i], field),
                    "table {} record {} field {}",
                    batch.table_name,
                    i,
                    field
                );
            }
        }
    }
}
