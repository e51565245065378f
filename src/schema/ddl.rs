//! `CREATE TABLE` parsing for schema extraction.
//!
//! Locates the first `CREATE TABLE <name> (` statement, cuts out its column
//! list by tracking parenthesis depth, and splits that list on top-level
//! commas into column definitions:
//! - `DECIMAL(5,2)` style arguments never split a definition
//! - `PRIMARY`, `FOREIGN` and `CONSTRAINT` clauses are skipped
//! - Single-quoted literals (`DEFAULT 'a,b'`) are opaque to the scanner
//! - `--` and `/* */` comments are dropped

use super::scan::{is_ident_char, Scanner};
use super::{ColumnDef, Schema};
use crate::error::SchemaError;
use std::fs;
use std::path::Path;

/// Leading keywords of table-level clauses that are not columns
const CONSTRAINT_PREFIXES: &[&str] = &["PRIMARY", "FOREIGN", "CONSTRAINT"];

/// Location of a `CREATE TABLE` header within schema text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableHeader<'a> {
    pub table_name: &'a str,
    /// Byte offset of the `(` opening the column list
    pub open_paren: usize,
}

/// Parse a schema file from disk
pub fn parse_schema_file(path: &Path) -> Result<Schema, SchemaError> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read schema file");
    parse_schema(&content, &path.display().to_string())
}

/// Parse schema text into a table name and its ordered columns.
///
/// `source_name` is only used in error messages and logs.
pub fn parse_schema(content: &str, source_name: &str) -> Result<Schema, SchemaError> {
    let header = find_create_table(content).ok_or_else(|| SchemaError::MissingCreateTable {
        source_name: source_name.to_string(),
    })?;
    let table_name = header.table_name;
    tracing::debug!(table = table_name, source = source_name, "found CREATE TABLE");

    let block = extract_column_block(content, header.open_paren).ok_or_else(|| {
        SchemaError::UnterminatedColumns {
            source_name: source_name.to_string(),
            table: table_name.to_string(),
        }
    })?;
    if block.trim().is_empty() {
        return Err(SchemaError::EmptyColumnBlock {
            source_name: source_name.to_string(),
            table: table_name.to_string(),
        });
    }

    let mut schema = Schema::new(table_name, source_name);
    for def in split_column_defs(block) {
        let def = def.as_str();
        if is_constraint_def(def) {
            tracing::debug!(table = table_name, definition = def, "skipping constraint");
            continue;
        }
        match split_column_def(def) {
            Some((name, raw_type)) => {
                tracing::debug!(table = table_name, column = name, raw_type = %raw_type, "parsed column");
                schema.insert_column(ColumnDef::new(name, raw_type));
            }
            None => {
                tracing::debug!(table = table_name, definition = def, "unparsable column definition");
            }
        }
    }

    if schema.is_empty() {
        return Err(SchemaError::NoValidColumns {
            source_name: source_name.to_string(),
            table: table_name.to_string(),
        });
    }

    Ok(schema)
}

/// Find the first `CREATE TABLE [IF NOT EXISTS] <name> (` header.
///
/// Keywords are matched case-insensitively; the table name keeps its case
/// and loses any identifier quoting. Occurrences inside comments or string
/// literals are ignored.
pub fn find_create_table(content: &str) -> Option<CreateTableHeader<'_>> {
    let mut prev: Option<char> = None;

    for (i, ch, region) in SqlChars::new(content) {
        let candidate = region == Region::Code
            && ch.eq_ignore_ascii_case(&'c')
            && !prev.is_some_and(is_ident_char);
        prev = Some(ch);
        if !candidate {
            continue;
        }
        if let Some(header) = match_create_table_at(content, i) {
            return Some(header);
        }
    }

    None
}

fn match_create_table_at(content: &str, start: usize) -> Option<CreateTableHeader<'_>> {
    let mut scanner = Scanner::at(content, start);
    if !(scanner.eat_keyword("CREATE") && scanner.skip_whitespace() && scanner.eat_keyword("TABLE"))
    {
        return None;
    }
    if !scanner.skip_whitespace() {
        return None;
    }

    let before_if = scanner.pos();
    let if_not_exists = scanner.eat_keyword("IF")
        && scanner.skip_whitespace()
        && scanner.eat_keyword("NOT")
        && scanner.skip_whitespace()
        && scanner.eat_keyword("EXISTS")
        && scanner.skip_whitespace();
    if !if_not_exists {
        scanner.reset(before_if);
    }

    let table_name = scanner.quoted_identifier()?;
    scanner.skip_whitespace();
    let open_paren = scanner.pos();
    if !scanner.eat_char('(') {
        return None;
    }

    Some(CreateTableHeader {
        table_name,
        open_paren,
    })
}

/// Return the text between the `(` at `open_paren` and its matching `)`.
///
/// Parentheses inside comments and string literals do not count. Returns
/// `None` when the parenthesis is never closed.
pub fn extract_column_block(content: &str, open_paren: usize) -> Option<&str> {
    let body_start = open_paren + 1;
    let body = content.get(body_start..)?;
    let mut depth = 1usize;

    for (i, ch, region) in SqlChars::new(body) {
        if region != Region::Code {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&body[..i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split a column list on commas at nesting depth zero.
///
/// Comments are dropped (a comment between two tokens leaves a single
/// space). Parts are trimmed; empty parts are dropped.
pub fn split_column_defs(block: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut after_comment = false;

    for (_, ch, region) in SqlChars::new(block) {
        if region == Region::Comment {
            if !current.ends_with(char::is_whitespace) {
                current.push(' ');
            }
            after_comment = true;
            continue;
        }
        if after_comment {
            if ch.is_whitespace() {
                continue;
            }
            after_comment = false;
        }

        match region {
            Region::Comment => continue,
            Region::Quoted => {
                current.push(ch);
                continue;
            }
            Region::Code => {}
        }

        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// What a character in SQL text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    /// Inside a single-quoted literal, quotes included
    Quoted,
    /// Inside `-- ...` or `/* ... */`, delimiters included
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    Quoted,
    LineComment,
    BlockComment,
}

/// Walks SQL text tagging each character with its [`Region`].
///
/// Literals follow the ANSI rules: `''` is an embedded quote and a
/// backslash is an ordinary character.
struct SqlChars<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    state: LexState,
}

impl<'a> SqlChars<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            state: LexState::Code,
        }
    }

    fn next_is(&mut self, expected: char) -> bool {
        self.chars.peek().is_some_and(|&(_, c)| c == expected)
    }
}

impl Iterator for SqlChars<'_> {
    type Item = (usize, char, Region);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, ch) = self.chars.next()?;
        let state = self.state;
        let region = match state {
            LexState::Code => match ch {
                '\'' => {
                    self.state = LexState::Quoted;
                    Region::Quoted
                }
                '-' if self.next_is('-') => {
                    self.chars.next();
                    self.state = LexState::LineComment;
                    Region::Comment
                }
                '/' if self.next_is('*') => {
                    self.chars.next();
                    self.state = LexState::BlockComment;
                    Region::Comment
                }
                _ => Region::Code,
            },
            LexState::Quoted => {
                if ch == '\'' {
                    self.state = LexState::Code;
                }
                Region::Quoted
            }
            LexState::LineComment => {
                if ch == '\n' {
                    self.state = LexState::Code;
                    Region::Code
                } else {
                    Region::Comment
                }
            }
            LexState::BlockComment => {
                if ch == '*' && self.next_is('/') {
                    self.chars.next();
                    self.state = LexState::Code;
                }
                Region::Comment
            }
        };
        Some((i, ch, region))
    }
}

/// True for table-level clauses (`PRIMARY KEY (...)`, `FOREIGN KEY ...`,
/// `CONSTRAINT ...`) that do not define a column
pub fn is_constraint_def(def: &str) -> bool {
    let trimmed = def.trim_start();
    CONSTRAINT_PREFIXES.iter().any(|prefix| {
        trimmed
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Split a column definition into its name and upper-cased type text.
///
/// Returns `None` when there is no leading identifier or no type text.
pub fn split_column_def(def: &str) -> Option<(&str, String)> {
    let mut scanner = Scanner::new(def.trim());
    let quoted = matches!(scanner.peek(), Some('`' | '"' | '['));
    let name = scanner.quoted_identifier()?;

    if !scanner.skip_whitespace() && !quoted {
        return None;
    }

    let raw_type = scanner.rest().trim();
    if raw_type.is_empty() {
        return None;
    }

    Some((name, raw_type.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_create_table_skips_non_matching_occurrences() {
        let sql = "-- CREATE TABLE is below\nCREATE TABLE orders (id INT);";
        let header = find_create_table(sql).unwrap();
        assert_eq!(header.table_name, "orders");
        assert_eq!(&sql[header.open_paren..header.open_paren + 1], "(");
    }

    #[test]
    fn test_find_create_table_variants() {
        assert_eq!(
            find_create_table("create table Users(id int)").unwrap().table_name,
            "Users"
        );
        assert_eq!(
            find_create_table("CREATE TABLE IF NOT EXISTS `users` (id INT)")
                .unwrap()
                .table_name,
            "users"
        );
        assert!(find_create_table("CREATE TABLE users AS SELECT 1").is_none());
        assert!(find_create_table("RECREATE TABLE users (id INT)").is_none());
    }

    #[test]
    fn test_extract_column_block_handles_nesting_and_strings() {
        let sql = "CREATE TABLE t (a DECIMAL(5,2), b VARCHAR(3) DEFAULT ')') ENGINE=InnoDB";
        let open = find_create_table(sql).unwrap().open_paren;
        assert_eq!(
            extract_column_block(sql, open),
            Some("a DECIMAL(5,2), b VARCHAR(3) DEFAULT ')'")
        );
    }

    #[test]
    fn test_extract_column_block_unterminated() {
        let sql = "CREATE TABLE t (a INT, b DECIMAL(5,2)";
        let open = find_create_table(sql).unwrap().open_paren;
        assert_eq!(extract_column_block(sql, open), None);
    }

    #[test]
    fn test_split_column_defs_respects_parens_and_quotes() {
        let parts = split_column_defs(
            "id INT, price DECIMAL(10, 2), tag VARCHAR(5) DEFAULT 'a,b',\n PRIMARY KEY (id, tag),",
        );
        assert_eq!(
            parts,
            vec![
                "id INT",
                "price DECIMAL(10, 2)",
                "tag VARCHAR(5) DEFAULT 'a,b'",
                "PRIMARY KEY (id, tag)",
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let sql = "/* CREATE TABLE old (x INT) */\nCREATE TABLE t (\n  a INT, -- it's (open\n  b /* x, y */ DATE\n);";
        let header = find_create_table(sql).unwrap();
        assert_eq!(header.table_name, "t");
        let block = extract_column_block(sql, header.open_paren).unwrap();
        assert_eq!(split_column_defs(block), vec!["a INT", "b DATE"]);
    }

    #[test]
    fn test_quoted_literals_follow_ansi_rules() {
        let parts = split_column_defs("a CHAR(3) DEFAULT 'it''s', b VARCHAR(9) DEFAULT 'C:\\', c INT");
        assert_eq!(
            parts,
            vec![
                "a CHAR(3) DEFAULT 'it''s'",
                "b VARCHAR(9) DEFAULT 'C:\\'",
                "c INT"
            ]
        );
    }

    #[test]
    fn test_is_constraint_def() {
        assert!(is_constraint_def("PRIMARY KEY (id)"));
        assert!(is_constraint_def("foreign key (user_id) REFERENCES users(id)"));
        assert!(is_constraint_def("  Constraint fk_x FOREIGN KEY (a) REFERENCES b(a)"));
        assert!(!is_constraint_def("id INT PRIMARY KEY"));
    }

    #[test]
    fn test_split_column_def() {
        assert_eq!(
            split_column_def("`user_id` int not null"),
            Some(("user_id", "INT NOT NULL".to_string()))
        );
        assert_eq!(
            split_column_def("price  decimal(5, 2) "),
            Some(("price", "DECIMAL(5, 2)".to_string()))
        );
        assert_eq!(split_column_def("lonely"), None);
        assert_eq!(split_column_def("(a) INT"), None);
    }

    #[test]
    fn test_parse_schema_errors() {
        assert!(matches!(
            parse_schema("SELECT 1;", "q.sql"),
            Err(SchemaError::MissingCreateTable { .. })
        ));
        assert!(matches!(
            parse_schema("CREATE TABLE t (  );", "t.sql"),
            Err(SchemaError::EmptyColumnBlock { .. })
        ));
        assert!(matches!(
            parse_schema("CREATE TABLE t (PRIMARY KEY (id));", "t.sql"),
            Err(SchemaError::NoValidColumns { .. })
        ));
        assert!(matches!(
            parse_schema("CREATE TABLE t (id INT", "t.sql"),
            Err(SchemaError::UnterminatedColumns { .. })
        ));
    }
}
