use super::*;
use crate::csv_loader::CsvTable;
use crate::types::*;

/// Helper function to build a table from inline CSV text
fn create_test_table(csv: &str) -> CsvTable {
    CsvTable::from_reader(csv.as_bytes(), None).unwrap()
}

fn sample_table() -> CsvTable {
    create_test_table(
        "id,name,age,price,active,created\n\
         1,John,25,19.99,true,2024-01-15\n\
         2,Jane,30,29.50,false,2024-01-16\n\
         3,Bob,,15.00,1,2024-01-17",
    )
}

#[test]
fn test_infer_sample_table() {
    let types = TypeInferrer::new().infer_table(&sample_table());

    assert_eq!(
        types,
        vec![
            ColumnType::Integer,
            ColumnType::Varchar(255),
            ColumnType::Integer,
            ColumnType::Decimal,
            ColumnType::Boolean,
            ColumnType::Date,
        ]
    );
}

#[test]
fn test_boolean_wins_over_integer() {
    let inferrer = TypeInferrer::new();
    assert_eq!(inferrer.infer_column(["1", "0", "1"]), ColumnType::Boolean);
    assert_eq!(inferrer.infer_column(["TRUE", "0", "False"]), ColumnType::Boolean);
    assert_eq!(inferrer.infer_column(["1", "2"]), ColumnType::Integer);
}

#[test]
fn test_integer_accepts_integral_decimals() {
    let inferrer = TypeInferrer::new();
    assert_eq!(inferrer.infer_column(["25", "25.0", "30"]), ColumnType::Integer);
    assert_eq!(inferrer.infer_column(["25", "25.5"]), ColumnType::Decimal);
}

#[test]
fn test_mixed_dates_and_text_fall_back_to_varchar() {
    let inferrer = TypeInferrer::new();
    assert_eq!(inferrer.infer_column(["2024-01-15", "01/16/2024"]), ColumnType::Date);
    assert_eq!(inferrer.infer_column(["2024-01-15", "soon"]), ColumnType::Varchar(255));
}

#[test]
fn test_numbers_mixed_with_dates_are_varchar() {
    let inferrer = TypeInferrer::new();
    assert_eq!(inferrer.infer_column(["2024-01-15", "12"]), ColumnType::Varchar(255));
}

#[test]
fn test_empty_values_do_not_vote() {
    let inferrer = TypeInferrer::new();
    assert_eq!(inferrer.infer_column(["", "true", ""]), ColumnType::Boolean);
    assert_eq!(inferrer.infer_column(["", "3.5"]), ColumnType::Decimal);
}

#[test]
fn test_all_empty_column_is_default_varchar() {
    let table = create_test_table("id,notes\n1,\n2,\n");
    let types = TypeInferrer::new().infer_table(&table);
    assert_eq!(types[1], ColumnType::Varchar(255));
}

#[test]
fn test_varchar_length_is_padded_longest_value() {
    let inferrer = TypeInferrer::new();
    let long_value = "x".repeat(300);
    assert_eq!(
        inferrer.infer_column(["short", long_value.as_str()]),
        ColumnType::Varchar(350)
    );
    assert_eq!(inferrer.infer_column(["short"]), ColumnType::Varchar(255));
}

#[test]
fn test_varchar_length_counts_characters() {
    let inferrer = TypeInferrer::new();
    let value = "é".repeat(210);
    assert_eq!(inferrer.infer_column([value.as_str()]), ColumnType::Varchar(260));
}
