//! Schema fixture generator for sql-seeder integration tests.
//!
//! Produces deterministic directories of `CREATE TABLE` files with a mix
//! of column types, table constraints and identifier quoting styles, plus
//! an optional shared-fields file.
//!
//! # Example
//!
//! ```rust
//! use test_data_gen::{Generator, Scale};
//!
//! let mut gen = Generator::new(42, Scale::Small);
//! let fixture = gen.generate();
//!
//! for table in &fixture.tables {
//!     println!("{}", table.render());
//! }
//! ```

pub mod fake;
pub mod generator;
pub mod schema;

pub use generator::{Fixture, Generator, Scale, UNSUPPORTED_COLUMN};
pub use schema::{Column, Quoting, SqlType, Table};
