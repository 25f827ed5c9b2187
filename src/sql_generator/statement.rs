use crate::sql_generator::escape::escape_value;
use crate::types::TableSchema;

/// Maximum number of rows rendered by a dry run
pub const DRY_RUN_ROW_LIMIT: usize = 5;

/// Comment placed in front of dry-run output
pub const DRY_RUN_MARKER: &str = "-- Showing first 5 INSERT statements (dry run)";

/// A single SQL statement with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQLStatement {
    /// The SQL statement text
    pub sql: String,
    /// Table this statement affects
    pub table_name: String,
    /// Number of rows this statement will insert
    pub row_count: usize,
    /// Statement type
    pub statement_type: StatementType,
}

/// Type of SQL statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    /// CREATE TABLE statement
    CreateTable,
    /// Multi-row INSERT statement
    Insert,
    /// Informational SQL comment
    Comment,
}

/// Generate the CREATE TABLE statement for a schema
pub fn create_table_statement(schema: &TableSchema) -> SQLStatement {
    let column_definitions: Vec<String> = schema
        .columns
        .iter()
        .map(|column| format!("  {} {}", column.name, column.column_type.to_sql()))
        .collect();

    let sql = format!(
        "CREATE TABLE {} (\n{}\n);\n",
        schema.table_name,
        column_definitions.join(",\n")
    );

    SQLStatement {
        sql,
        table_name: schema.table_name.clone(),
        row_count: 0,
        statement_type: StatementType::CreateTable,
    }
}

/// Generate one multi-row INSERT statement for `rows`.
///
/// Each row must hold one raw value per schema column, in column order.
pub fn insert_statement(schema: &TableSchema, rows: &[Vec<String>]) -> SQLStatement {
    let column_names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();

    let value_clauses: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = schema
                .columns
                .iter()
                .zip(row)
                .map(|(column, value)| {
                    escape_value(Some(value.as_str()), column.column_type, schema.dialect)
                })
                .collect();
            format!("({})", values.join(", "))
        })
        .collect();

    let sql = format!(
        "INSERT INTO {} ({})\nVALUES\n  {};\n",
        schema.table_name,
        column_names.join(", "),
        value_clauses.join(",\n  ")
    );

    SQLStatement {
        sql,
        table_name: schema.table_name.clone(),
        row_count: rows.len(),
        statement_type: StatementType::Insert,
    }
}

/// The comment announcing a truncated dry-run preview
pub fn dry_run_marker(schema: &TableSchema) -> SQLStatement {
    SQLStatement {
        sql: DRY_RUN_MARKER.to_string(),
        table_name: schema.table_name.clone(),
        row_count: 0,
        statement_type: StatementType::Comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnDefinition, ColumnType, Dialect};

    fn create_test_schema(dialect: Dialect) -> TableSchema {
        TableSchema {
            table_name: "users".to_string(),
            dialect,
            columns: vec![
                ColumnDefinition { name: "id".to_string(), column_type: ColumnType::Integer },
                ColumnDefinition { name: "name".to_string(), column_type: ColumnType::Varchar(255) },
                ColumnDefinition { name: "active".to_string(), column_type: ColumnType::Boolean },
            ],
        }
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_generate_create_table_statement() {
        let statement = create_table_statement(&create_test_schema(Dialect::Postgresql));

        assert_eq!(
            statement.sql,
            "CREATE TABLE users (\n  id INTEGER,\n  name VARCHAR(255),\n  active BOOLEAN\n);\n"
        );
        assert_eq!(statement.statement_type, StatementType::CreateTable);
        assert_eq!(statement.row_count, 0);
    }

    #[test]
    fn test_generate_insert_statement() {
        let rows = vec![row(&["1", "John Doe", "true"]), row(&["2", "", "0"])];
        let statement = insert_statement(&create_test_schema(Dialect::Postgresql), &rows);

        assert_eq!(
            statement.sql,
            "INSERT INTO users (id, name, active)\nVALUES\n  (1, 'John Doe', TRUE),\n  (2, NULL, FALSE);\n"
        );
        assert_eq!(statement.row_count, 2);
        assert_eq!(statement.statement_type, StatementType::Insert);
    }

    #[test]
    fn test_insert_booleans_follow_dialect() {
        let rows = vec![row(&["1", "x", "true"])];
        let statement = insert_statement(&create_test_schema(Dialect::Mysql), &rows);
        assert!(statement.sql.contains("(1, 'x', 1)"));
    }

    #[test]
    fn test_dry_run_marker() {
        let statement = dry_run_marker(&create_test_schema(Dialect::Sqlite));
        assert!(statement.sql.starts_with("-- Showing first 5 INSERT statements"));
        assert_eq!(statement.statement_type, StatementType::Comment);
    }
}
