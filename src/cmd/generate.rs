use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sql_seeder::assembler::{Assembler, DEFAULT_NUM_RECORDS, DEFAULT_SCHEMA_EXTENSION};
use sql_seeder::config::GenerateYamlConfig;
use sql_seeder::generator::ValueSynthesizer;
use sql_seeder::writer::{write_output_file, StatementWriter, DEFAULT_OUTPUT_FILE};
use std::io;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    schema_dir: PathBuf,
    output: PathBuf,
    num_records: Option<usize>,
    shared_fields: Option<PathBuf>,
    extension: Option<String>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let yaml = match &config {
        Some(path) => GenerateYamlConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GenerateYamlConfig::default(),
    };

    let num_records = num_records
        .or(yaml.records)
        .unwrap_or(DEFAULT_NUM_RECORDS);
    let extension = extension
        .or(yaml.extension)
        .unwrap_or_else(|| DEFAULT_SCHEMA_EXTENSION.to_string());
    let output_file = yaml
        .output_file
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
    let seed = seed.or(yaml.seed).unwrap_or_else(rand::random);

    tracing::debug!(
        schema_dir = %schema_dir.display(),
        num_records,
        extension = %extension,
        seed,
        "starting generation"
    );

    let mut assembler = Assembler::new(schema_dir)
        .with_extension(extension)
        .with_num_records(num_records)
        .with_shared_fields(yaml.shared_fields);
    if let Some(path) = shared_fields {
        assembler = assembler.with_shared_fields_file(path);
    }

    let mut synth = ValueSynthesizer::new(StdRng::seed_from_u64(seed));
    let batches = assembler.run(&mut synth)?;

    let stdout = io::stdout();
    let mut console = StatementWriter::new(stdout.lock());
    console.write_batches(&batches)?;
    drop(console);

    let total: usize = batches.iter().map(|b| b.statements.len()).sum();

    if dry_run {
        println!(
            "\nDry run: {} statements across {} tables, no file written",
            total,
            batches.len()
        );
        return Ok(());
    }

    let path = write_output_file(&output, &output_file, &batches)
        .with_context(|| format!("failed to write output to {}", output.display()))?;
    println!("\nGenerated INSERT statements written to {}", path.display());
    tracing::info!(tables = batches.len(), statements = total, seed, "generation complete");

    Ok(())
}
