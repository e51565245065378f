//! Minimal character scanner shared by the DDL and type-string parsers.

/// Characters allowed in a bare SQL identifier or keyword
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Forward-only cursor over a string slice.
///
/// Every method either consumes input and reports success, or leaves the
/// position untouched.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn at(input: &'a str, pos: usize) -> Self {
        Self { input, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, returning true if anything was skipped
    pub fn skip_whitespace(&mut self) -> bool {
        !self.take_while(char::is_whitespace).is_empty()
    }

    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Consume `keyword` (ASCII case-insensitive) if it appears as a whole word
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        let Some(head) = rest.get(..keyword.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(keyword) {
            return false;
        }
        if rest[keyword.len()..].chars().next().is_some_and(is_ident_char) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    /// Consume a run of identifier characters
    pub fn identifier(&mut self) -> Option<&'a str> {
        let ident = self.take_while(is_ident_char);
        (!ident.is_empty()).then_some(ident)
    }

    /// Consume an identifier that may be wrapped in backticks, double quotes
    /// or square brackets. Returns the name with the quoting removed.
    pub fn quoted_identifier(&mut self) -> Option<&'a str> {
        let close = match self.peek()? {
            '`' => '`',
            '"' => '"',
            '[' => ']',
            _ => return self.identifier(),
        };
        let start = self.pos;
        self.bump();
        let name = self.take_while(|c| c != close);
        if name.is_empty() || !self.eat_char(close) {
            self.reset(start);
            return None;
        }
        Some(name)
    }

    /// Consume an unsigned decimal integer that fits in a u32
    pub fn unsigned(&mut self) -> Option<u32> {
        let start = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        match digits.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.reset(start);
                None
            }
        }
    }
}
