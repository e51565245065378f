pub mod assembler;
pub mod config;
pub mod error;
pub mod generator;
pub mod schema;
pub mod writer;

pub use error::{FormatError, SchemaError};
