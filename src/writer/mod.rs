use crate::assembler::{InsertBatch, TABLE_SEPARATOR};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;
pub const STMT_BUFFER_COUNT: usize = 100;

/// Default output file name inside the output directory
pub const DEFAULT_OUTPUT_FILE: &str = "output.sql";

/// Line-oriented statement sink with periodic flushing
pub struct StatementWriter<W: Write> {
    writer: W,
    write_count: usize,
    max_stmt_buffer: usize,
}

impl StatementWriter<BufWriter<File>> {
    /// Create (or truncate) `filename`, creating parent directories
    pub fn create(filename: &Path) -> std::io::Result<Self> {
        if let Some(parent) = filename.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(filename)?;
        Ok(Self::new(BufWriter::with_capacity(WRITER_BUFFER_SIZE, file)))
    }
}

impl<W: Write> StatementWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            write_count: 0,
            max_stmt_buffer: STMT_BUFFER_COUNT,
        }
    }

    pub fn write_statement(&mut self, stmt: &str) -> std::io::Result<()> {
        self.writer.write_all(stmt.as_bytes())?;
        self.writer.write_all(b"\n")?;

        self.write_count += 1;
        if self.write_count >= self.max_stmt_buffer {
            self.write_count = 0;
            self.writer.flush()?;
        }

        Ok(())
    }

    /// Write a table's statements followed by the separator line
    pub fn write_batch(&mut self, batch: &InsertBatch) -> std::io::Result<()> {
        for stmt in &batch.statements {
            self.write_statement(stmt)?;
        }
        self.write_statement(TABLE_SEPARATOR)
    }

    pub fn write_batches(&mut self, batches: &[InsertBatch]) -> std::io::Result<()> {
        for batch in batches {
            self.write_batch(batch)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.write_count = 0;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write all batches to `<output_dir>/<file_name>`, returning the path
pub fn write_output_file(
    output_dir: &Path,
    file_name: &str,
    batches: &[InsertBatch],
) -> std::io::Result<PathBuf> {
    let path = output_dir.join(file_name);
    let mut writer = StatementWriter::create(&path)?;
    writer.write_batches(batches)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn batches() -> Vec<InsertBatch> {
        vec![
            InsertBatch {
                table_name: "users".to_string(),
                statements: vec![
                    "INSERT INTO users (id) VALUES (1);".to_string(),
                    "INSERT INTO users (id) VALUES (2);".to_string(),
                ],
            },
            InsertBatch {
                table_name: "orders".to_string(),
                statements: vec!["INSERT INTO orders (id) VALUES (3);".to_string()],
            },
        ]
    }

    #[test]
    fn test_separator_after_each_table() {
        let mut writer = StatementWriter::new(Vec::new());
        writer.write_batches(&batches()).unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "INSERT INTO users (id) VALUES (1);\n\
             INSERT INTO users (id) VALUES (2);\n\
             ****\n\
             INSERT INTO orders (id) VALUES (3);\n\
             ****\n"
        );
    }

    #[test]
    fn test_write_output_file_creates_dir() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("nested").join("out");
        let path = write_output_file(&out_dir, DEFAULT_OUTPUT_FILE, &batches()).unwrap();
        assert_eq!(path, out_dir.join("output.sql"));
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().filter(|l| *l == "****").count(), 2);
    }
}
