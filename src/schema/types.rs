//! Column type string parsing.
//!
//! Turns free-form type text such as `DECIMAL(5, 2) NOT NULL` into a
//! [`TypeSpec`]. Grammar:
//!
//! ```text
//! type      := ident [ "(" uint [ "," uint ] ")" ] [ NOT NULL ] trailing*
//! ```
//!
//! Anything after the recognised head (`UNSIGNED`, `DEFAULT 0`, ...) is
//! ignored. Unknown base types are kept as [`BaseType::Unknown`].

use super::scan::Scanner;
use crate::error::FormatError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Base SQL type keyword, normalized to upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Char,
    Varchar,
    Int,
    Integer,
    BigInt,
    Bit,
    Decimal,
    Float,
    Double,
    Date,
    DateTime,
    Boolean,
    /// Any other keyword, kept verbatim (upper-cased)
    Unknown(String),
}

impl BaseType {
    /// Classify an identifier token. Matching is case-insensitive.
    pub fn from_keyword(keyword: &str) -> Self {
        let upper = keyword.to_uppercase();
        match upper.as_str() {
            "CHAR" => BaseType::Char,
            "VARCHAR" => BaseType::Varchar,
            "INT" => BaseType::Int,
            "INTEGER" => BaseType::Integer,
            "BIGINT" => BaseType::BigInt,
            "BIT" => BaseType::Bit,
            "DECIMAL" => BaseType::Decimal,
            "FLOAT" => BaseType::Float,
            "DOUBLE" => BaseType::Double,
            "DATE" => BaseType::Date,
            "DATETIME" => BaseType::DateTime,
            "BOOLEAN" => BaseType::Boolean,
            _ => BaseType::Unknown(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BaseType::Char => "CHAR",
            BaseType::Varchar => "VARCHAR",
            BaseType::Int => "INT",
            BaseType::Integer => "INTEGER",
            BaseType::BigInt => "BIGINT",
            BaseType::Bit => "BIT",
            BaseType::Decimal => "DECIMAL",
            BaseType::Float => "FLOAT",
            BaseType::Double => "DOUBLE",
            BaseType::Date => "DATE",
            BaseType::DateTime => "DATETIME",
            BaseType::Boolean => "BOOLEAN",
            BaseType::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BaseType::Unknown(_))
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Structured form of a column type string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSpec {
    pub base_type: BaseType,
    /// First type argument: VARCHAR(50) length, or DECIMAL(M,D) total digits
    pub length: Option<u32>,
    /// Second type argument: DECIMAL(M,D) fractional digits, FLOAT scale
    pub precision: Option<u32>,
    pub not_null: bool,
}

impl TypeSpec {
    pub fn new(base_type: BaseType) -> Self {
        Self {
            base_type,
            length: None,
            precision: None,
            not_null: false,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_type)?;
        match (self.length, self.precision) {
            (Some(len), Some(prec)) => write!(f, "({}, {})", len, prec)?,
            (Some(len), None) => write!(f, "({})", len)?,
            _ => {}
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for TypeSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_spec(s)
    }
}

/// Parse a raw column type string.
///
/// Fails only when the input does not begin with an identifier token.
pub fn parse_type_spec(raw: &str) -> Result<TypeSpec, FormatError> {
    let mut scanner = Scanner::new(raw);
    scanner.skip_whitespace();

    let keyword = scanner.identifier().ok_or_else(|| FormatError::new(raw))?;
    let mut spec = TypeSpec::new(BaseType::from_keyword(keyword));

    let after_keyword = scanner.pos();
    match type_arguments(&mut scanner) {
        Some((length, precision)) => {
            spec.length = Some(length);
            spec.precision = precision;
        }
        None => scanner.reset(after_keyword),
    }

    scanner.skip_whitespace();
    spec.not_null = not_null(&mut scanner);

    Ok(spec)
}

/// `( uint [, uint] )` with flexible whitespace
fn type_arguments(scanner: &mut Scanner<'_>) -> Option<(u32, Option<u32>)> {
    scanner.skip_whitespace();
    if !scanner.eat_char('(') {
        return None;
    }
    scanner.skip_whitespace();
    let length = scanner.unsigned()?;
    scanner.skip_whitespace();

    let precision = if scanner.eat_char(',') {
        scanner.skip_whitespace();
        let precision = scanner.unsigned()?;
        scanner.skip_whitespace();
        Some(precision)
    } else {
        None
    };

    scanner.eat_char(')').then_some((length, precision))
}

fn not_null(scanner: &mut Scanner<'_>) -> bool {
    let start = scanner.pos();
    if scanner.eat_keyword("NOT") && scanner.skip_whitespace() && scanner.eat_keyword("NULL") {
        return true;
    }
    scanner.reset(start);
    false
}
