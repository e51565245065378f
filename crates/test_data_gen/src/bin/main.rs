//! CLI for generating schema fixtures.
//!
//! Usage:
//!   gen-fixtures --scale small --seed 42 --output fixtures/schema

use clap::Parser;
use std::path::PathBuf;
use test_data_gen::{Generator, Scale};

#[derive(Parser, Debug)]
#[command(name = "gen-fixtures")]
#[command(about = "Generate CREATE TABLE schema fixtures for sql-seeder", long_about = None)]
struct Args {
    /// Scale preset: small, medium, large
    #[arg(short, long, default_value = "small")]
    scale: String,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing shared_fields.txt
    #[arg(long)]
    no_shared_fields: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scale: Scale = args.scale.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let fixture = Generator::new(args.seed, scale).generate();

    match args.output {
        Some(dir) => {
            if args.no_shared_fields {
                fixture.write_schemas_to(&dir)?;
            } else {
                fixture.write_to(&dir)?;
            }
            eprintln!(
                "Generated {} schema files to {}",
                fixture.tables.len(),
                dir.display()
            );
        }
        None => {
            for table in &fixture.tables {
                println!("{}", table.render());
            }
        }
    }

    Ok(())
}
