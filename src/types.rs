use crate::error::SqlSeedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of rows rendered per INSERT statement
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Target SQL engine flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgresql,
    Mysql,
    Sqlite,
}

impl Dialect {
    /// All recognized dialects, in CLI display order
    pub const ALL: [Dialect; 3] = [Dialect::Postgresql, Dialect::Mysql, Dialect::Sqlite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Literal used for a boolean cell in this dialect
    pub fn boolean_literal(&self, value: bool) -> &'static str {
        match (self, value) {
            (Dialect::Mysql, true) => "1",
            (Dialect::Mysql, false) => "0",
            (_, true) => "TRUE",
            (_, false) => "FALSE",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SqlSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|dialect| dialect.as_str() == s)
            .ok_or_else(|| {
                SqlSeedError::config(format!(
                    "Unknown dialect '{}', expected one of: postgresql, mysql, sqlite",
                    s
                ))
            })
    }
}

/// SQL column types that can be inferred from CSV data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ColumnType {
    Boolean,
    Integer,
    /// Always rendered as DECIMAL(10,2)
    Decimal,
    Date,
    /// Variable character with length
    Varchar(usize),
}

impl ColumnType {
    /// Convert to SQL type string
    pub fn to_sql(&self) -> String {
        match self {
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Decimal => "DECIMAL(10,2)".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Varchar(len) => format!("VARCHAR({})", len),
        }
    }

    /// Numeric values are emitted verbatim, without quoting
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Decimal)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.to_sql()
    }
}

impl FromStr for ColumnType {
    type Err = SqlSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOLEAN" => Ok(ColumnType::Boolean),
            "INTEGER" => Ok(ColumnType::Integer),
            "DECIMAL(10,2)" => Ok(ColumnType::Decimal),
            "DATE" => Ok(ColumnType::Date),
            other => other
                .strip_prefix("VARCHAR(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|len| len.parse().ok())
                .map(ColumnType::Varchar)
                .ok_or_else(|| SqlSeedError::config(format!("Unknown column type '{}'", other))),
        }
    }
}

impl TryFrom<String> for ColumnType {
    type Error = SqlSeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Ordered rename table applied to CSV header names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `old:new` list, e.g. `id:user_id,name:full_name`
    pub fn parse(pairs: &str) -> Result<Self, SqlSeedError> {
        let mut mapping = Self::new();
        for pair in pairs.split(',') {
            let mut parts = pair.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(old), Some(new), None) if !old.is_empty() && !new.is_empty() => {
                    mapping.insert(old, new);
                }
                _ => {
                    return Err(SqlSeedError::config(format!(
                        "Invalid column mapping '{}', expected old:new",
                        pair
                    )))
                }
            }
        }
        Ok(mapping)
    }

    /// Add a rename; a later rename for the same column replaces the earlier one
    pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) {
        let old = old.into();
        let new = new.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == old) {
            Some(entry) => entry.1 = new,
            None => self.entries.push((old, new)),
        }
    }

    /// New name for `column`, if it is mapped
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(old, _)| old == column)
            .map(|(_, new)| new.as_str())
    }

    /// Name a column ends up with after the mapping is applied
    pub fn rename<'a>(&'a self, column: &'a str) -> &'a str {
        self.get(column).unwrap_or(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (old, new) in iter {
            mapping.insert(old, new);
        }
        mapping
    }
}

/// Settings for a generator instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Table name used in every statement
    pub table_name: String,
    /// Target dialect
    pub dialect: Dialect,
    /// Maximum number of rows per INSERT statement
    pub batch_size: usize,
    /// Optional header renames applied at load time
    pub column_mapping: Option<ColumnMapping>,
}

impl GenerationConfig {
    /// Config with the default dialect and batch size
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            dialect: Dialect::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            column_mapping: None,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_column_mapping(mut self, column_mapping: ColumnMapping) -> Self {
        self.column_mapping = Some(column_mapping);
        self
    }

    /// Check the invariants generation relies on
    pub fn validate(&self) -> Result<(), SqlSeedError> {
        if self.table_name.is_empty() {
            return Err(SqlSeedError::config("Table name must not be empty"));
        }
        if self.batch_size == 0 {
            return Err(SqlSeedError::config("Batch size must be a positive integer"));
        }
        Ok(())
    }
}

/// Inferred definition of one output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name after mapping
    pub name: String,
    /// Inferred SQL type
    pub column_type: ColumnType,
}

/// Inferred table layout, as written by `--schema-output`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub dialect: Dialect,
    pub columns: Vec<ColumnDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgresql);
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("sqlite".parse::<Dialect>().unwrap(), Dialect::Sqlite);

        let err = "oracle".parse::<Dialect>().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn test_column_type_sql_names() {
        assert_eq!(ColumnType::Boolean.to_sql(), "BOOLEAN");
        assert_eq!(ColumnType::Integer.to_sql(), "INTEGER");
        assert_eq!(ColumnType::Decimal.to_sql(), "DECIMAL(10,2)");
        assert_eq!(ColumnType::Date.to_sql(), "DATE");
        assert_eq!(ColumnType::Varchar(305).to_sql(), "VARCHAR(305)");
        assert_eq!("VARCHAR(255)".parse::<ColumnType>().unwrap(), ColumnType::Varchar(255));
        assert!("TEXT".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_column_mapping_parse() {
        let mapping = ColumnMapping::parse("id:user_id,name:full_name").unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("id"), Some("user_id"));
        assert_eq!(mapping.rename("name"), "full_name");
        assert_eq!(mapping.rename("age"), "age");
    }

    #[test]
    fn test_column_mapping_last_rename_wins() {
        let mapping = ColumnMapping::parse("id:a,id:b").unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("id"), Some("b"));
    }

    #[test]
    fn test_column_mapping_malformed() {
        for pairs in ["id", "id:user_id:extra", "id:user_id,", ":user_id", "id:", ""] {
            let err = ColumnMapping::parse(pairs).unwrap_err();
            assert!(err.is_config_error(), "expected config error for {:?}", pairs);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(GenerationConfig::new("users").validate().is_ok());
        assert!(GenerationConfig::new("").validate().unwrap_err().is_config_error());
        assert!(GenerationConfig::new("users")
            .with_batch_size(0)
            .validate()
            .unwrap_err()
            .is_config_error());
    }

    #[test]
    fn test_schema_serializes_sql_type_names() {
        let schema = TableSchema {
            table_name: "users".to_string(),
            dialect: Dialect::Mysql,
            columns: vec![ColumnDefinition {
                name: "price".to_string(),
                column_type: ColumnType::Decimal,
            }],
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["dialect"], "mysql");
        assert_eq!(json["columns"][0]["column_type"], "DECIMAL(10,2)");

        let back: TableSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
