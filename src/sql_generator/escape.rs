use crate::types::{ColumnType, Dialect};

/// Literal emitted for missing values
pub const NULL_LITERAL: &str = "NULL";

/// Render a raw CSV cell as a SQL literal for a column of `column_type`.
///
/// `None` and the empty string both become `NULL`. Numeric columns are
/// emitted verbatim, booleans use the dialect's literal, and everything else
/// is quoted as a string.
pub fn escape_value(value: Option<&str>, column_type: ColumnType, dialect: Dialect) -> String {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return NULL_LITERAL.to_string(),
    };

    match column_type {
        ColumnType::Boolean => dialect.boolean_literal(is_truthy(value)).to_string(),
        numeric if numeric.is_numeric() => value.to_string(),
        _ => quote_string(value),
    }
}

/// Quote a string literal, doubling backslashes and single quotes
pub fn quote_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "''");
    format!("'{}'", escaped)
}

/// `true` or `1`, ignoring case; anything else is false
fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
