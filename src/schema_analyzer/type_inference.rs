use crate::csv_loader::CsvTable;
use crate::types::ColumnType;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Length used when a column has no value to size it from
pub const MIN_VARCHAR_LENGTH: usize = 255;

/// Padding added to the longest observed value of a VARCHAR column
pub const VARCHAR_PADDING: usize = 50;

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static US_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

/// Infers one SQL column type per CSV column.
///
/// A column is assigned the first type in the order BOOLEAN, INTEGER,
/// DECIMAL(10,2), DATE that every non-empty value satisfies, and falls back
/// to VARCHAR otherwise. Empty cells never take part in the decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferrer;

impl TypeInferrer {
    pub fn new() -> Self {
        Self
    }

    /// Infer the type of every column of `table`, in column order
    pub fn infer_table(&self, table: &CsvTable) -> Vec<ColumnType> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let column_type = self.infer_column(table.column_values(index));
                debug!("Inferred column '{}' as {}", name, column_type);
                column_type
            })
            .collect()
    }

    /// Infer the type of a single column from its raw values
    pub fn infer_column<'a, I>(&self, values: I) -> ColumnType
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<&str> = values.into_iter().filter(|value| !value.is_empty()).collect();

        if values.is_empty() {
            return ColumnType::Varchar(MIN_VARCHAR_LENGTH);
        }

        if values.iter().all(|value| is_boolean(value)) {
            return ColumnType::Boolean;
        }

        if values.iter().all(|value| is_integer(value)) {
            return ColumnType::Integer;
        }

        if values.iter().all(|value| is_decimal(value)) {
            return ColumnType::Decimal;
        }

        if values.iter().all(|value| is_date(value)) {
            return ColumnType::Date;
        }

        let max_len = values
            .iter()
            .map(|value| value.chars().count())
            .max()
            .unwrap_or(0);
        ColumnType::Varchar((max_len + VARCHAR_PADDING).max(MIN_VARCHAR_LENGTH))
    }
}

/// `true`, `false`, `1` or `0`, ignoring case
pub fn is_boolean(value: &str) -> bool {
    ["true", "false", "1", "0"]
        .iter()
        .any(|literal| value.eq_ignore_ascii_case(literal))
}

/// A number equal to its own integer truncation, so `25.0` counts
pub fn is_integer(value: &str) -> bool {
    match parse_number(value) {
        Some(number) => number.is_finite() && number == number.trunc(),
        None => false,
    }
}

/// Any floating-point literal
pub fn is_decimal(value: &str) -> bool {
    parse_number(value).is_some()
}

/// `YYYY-MM-DD` or `MM/DD/YYYY`, matched against the whole value
pub fn is_date(value: &str) -> bool {
    ISO_DATE_RE.is_match(value) || US_DATE_RE.is_match(value)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}
