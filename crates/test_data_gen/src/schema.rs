//! Schema model for fixture tables and their `CREATE TABLE` rendering.

/// Column types the fixtures draw from
#[derive(Debug, Clone, PartialEq)]
pub enum SqlType {
    Char(u16),
    VarChar(u16),
    Int,
    Integer,
    BigInt,
    Bit,
    /// Total digits and fractional digits
    Decimal(u8, u8),
    Float,
    Double,
    Date,
    DateTime,
    Boolean,
    /// Not understood by the generator; produces the 'Unknown' sentinel
    Text,
}

impl SqlType {
    /// Returns the type as written in a column definition
    pub fn to_sql(&self) -> String {
        match self {
            SqlType::Char(n) => format!("CHAR({})", n),
            SqlType::VarChar(n) => format!("VARCHAR({})", n),
            SqlType::Int => "INT".to_string(),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::BigInt => "BIGINT".to_string(),
            SqlType::Bit => "BIT".to_string(),
            SqlType::Decimal(p, s) => format!("DECIMAL({}, {})", p, s),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Double => "DOUBLE".to_string(),
            SqlType::Date => "DATE".to_string(),
            SqlType::DateTime => "DATETIME".to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Text => "TEXT".to_string(),
        }
    }
}

/// Identifier quoting style for column names
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Quoting {
    #[default]
    None,
    Backtick,
    DoubleQuote,
}

impl Quoting {
    pub fn quote(&self, ident: &str) -> String {
        match self {
            Quoting::None => ident.to_string(),
            Quoting::Backtick => format!("`{}`", ident),
            Quoting::DoubleQuote => format!("\"{}\"", ident),
        }
    }
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub sql_type: SqlType,
    pub not_null: bool,
    pub default: Option<String>,
}

impl Column {
    pub fn new(name: &str, sql_type: SqlType) -> Self {
        Self {
            name: name.to_string(),
            sql_type,
            not_null: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    fn render(&self, quoting: Quoting) -> String {
        let mut def = format!("{} {}", quoting.quote(&self.name), self.sql_type.to_sql());
        if self.not_null {
            def.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            def.push_str(" DEFAULT ");
            def.push_str(default);
        }
        def
    }
}

/// Table definition
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Option<String>,
    /// (local column, referenced table)
    pub foreign_keys: Vec<(String, String)>,
    /// Emit foreign keys as `CONSTRAINT fk_... FOREIGN KEY`
    pub named_constraints: bool,
    pub quoting: Quoting,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            named_constraints: false,
            quoting: Quoting::None,
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Render the table as a `CREATE TABLE` statement
    pub fn render(&self) -> String {
        let mut defs: Vec<String> = self.columns.iter().map(|c| c.render(self.quoting)).collect();

        if let Some(pk) = &self.primary_key {
            defs.push(format!("PRIMARY KEY ({})", self.quoting.quote(pk)));
        }
        for (column, ref_table) in &self.foreign_keys {
            let fk = format!(
                "FOREIGN KEY ({}) REFERENCES {}(id)",
                self.quoting.quote(column),
                ref_table
            );
            if self.named_constraints {
                defs.push(format!("CONSTRAINT fk_{}_{} {}", self.name, column, fk));
            } else {
                defs.push(fk);
            }
        }

        format!(
            "CREATE TABLE {} (\n    {}\n);\n",
            self.name,
            defs.join(",\n    ")
        )
    }
}
