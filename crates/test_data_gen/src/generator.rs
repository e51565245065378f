//! Fixture generator that produces a directory's worth of schema files.
//!
//! Every table carries the shared `id` and `tenant_id` columns so fixtures
//! can exercise cross-table value sharing. Every fourth table also gets a
//! `TEXT` column, which seeds as the `'Unknown'` sentinel.

use crate::fake::FakeData;
use crate::schema::{Column, Quoting, SqlType, Table};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io;
use std::path::Path;

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// 3 tables
    Small,
    /// 10 tables
    Medium,
    /// 50 tables
    Large,
}

impl Scale {
    pub fn tables(&self) -> usize {
        match self {
            Scale::Small => 3,
            Scale::Medium => 10,
            Scale::Large => 50,
        }
    }

    pub fn max_extra_columns(&self) -> usize {
        match self {
            Scale::Small => 4,
            Scale::Medium => 8,
            Scale::Large => 16,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            _ => Err(format!(
                "Unknown scale: {}. Use small, medium, or large",
                s
            )),
        }
    }
}

/// Columns present in every generated table
pub const SHARED_FIELDS: &[&str] = &["id", "tenant_id"];

/// Column of an unsupported type, added to every fourth table
pub const UNSUPPORTED_COLUMN: &str = "legacy_notes";

/// Generated schema set
#[derive(Debug, Clone)]
pub struct Fixture {
    pub tables: Vec<Table>,
    pub shared_fields: Vec<String>,
}

impl Fixture {
    /// Write `<table>.sql` per table plus `shared_fields.txt`
    pub fn write_to(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for table in &self.tables {
            fs::write(dir.join(format!("{}.sql", table.name)), table.render())?;
        }
        fs::write(
            dir.join("shared_fields.txt"),
            format!("{}\n", self.shared_fields.join(", ")),
        )
    }

    /// Write only the schema files
    pub fn write_schemas_to(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for table in &self.tables {
            fs::write(dir.join(format!("{}.sql", table.name)), table.render())?;
        }
        Ok(())
    }
}

/// Deterministic schema fixture generator
pub struct Generator {
    fake: FakeData<ChaCha8Rng>,
    scale: Scale,
}

impl Generator {
    pub fn new(seed: u64, scale: Scale) -> Self {
        Self {
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
            scale,
        }
    }

    pub fn generate(&mut self) -> Fixture {
        let mut tables: Vec<Table> = Vec::with_capacity(self.scale.tables());

        for index in 0..self.scale.tables() {
            let mut table = Table::new(&self.fake.table_name(index))
                .column(Column::new("id", SqlType::Int).not_null())
                .column(Column::new("tenant_id", SqlType::BigInt));

            let extra = self.fake.int_range(1, self.scale.max_extra_columns());
            for col_index in 0..extra {
                let name = self.fake.column_name(col_index);
                let column = self.random_column(&name);
                table = table.column(column);
            }

            if index % 4 == 3 {
                table = table.column(Column::new(UNSUPPORTED_COLUMN, SqlType::Text));
            }

            if self.fake.bool_with_probability(0.5) {
                table.primary_key = Some("id".to_string());
            }
            if let Some(parent) = tables.last() {
                if self.fake.bool_with_probability(0.5) {
                    table.foreign_keys.push(("tenant_id".to_string(), parent.name.clone()));
                    table.named_constraints = self.fake.bool_with_probability(0.5);
                }
            }
            table.quoting = *self
                .fake
                .pick(&[Quoting::None, Quoting::Backtick, Quoting::DoubleQuote]);

            tables.push(table);
        }

        Fixture {
            tables,
            shared_fields: SHARED_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn random_column(&mut self, name: &str) -> Column {
        let sql_type = match self.fake.int_range(0, 11) {
            0 => SqlType::Char(self.fake.int_range(1, 8) as u16),
            1 => SqlType::VarChar(self.fake.int_range(5, 64) as u16),
            2 => SqlType::Int,
            3 => SqlType::Integer,
            4 => SqlType::BigInt,
            5 => SqlType::Bit,
            6 => {
                let precision = self.fake.int_range(1, 18) as u8;
                let scale = self.fake.int_range(0, precision as usize) as u8;
                SqlType::Decimal(precision, scale)
            }
            7 => SqlType::Float,
            8 => SqlType::Double,
            9 => SqlType::Date,
            10 => SqlType::DateTime,
            _ => SqlType::Boolean,
        };

        let mut column = Column::new(name, sql_type);
        if self.fake.bool_with_probability(0.3) {
            column = column.not_null();
        }
        column
    }
}
