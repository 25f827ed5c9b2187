use crate::error::SqlSeedError;
use crate::types::ColumnMapping;
use std::collections::HashSet;
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Fully loaded CSV data: header names plus rows of raw cell strings.
///
/// Every row holds exactly one value per column, in column order. Missing
/// and blank cells are stored as the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Load the CSV file at `path`, applying `mapping` to the header
    pub fn load(path: &Path, mapping: Option<&ColumnMapping>) -> Result<Self, SqlSeedError> {
        info!("Loading CSV file {:?}", path);
        let file = File::open(path).map_err(load_error)?;
        Self::from_reader(file, mapping)
    }

    /// Load CSV data from any reader, applying `mapping` to the header
    pub fn from_reader<R: Read>(reader: R, mapping: Option<&ColumnMapping>) -> Result<Self, SqlSeedError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header = reader.headers().map_err(load_error)?.clone();
        let columns: Vec<String> = header
            .iter()
            .map(|name| match mapping {
                Some(mapping) => mapping.rename(name).to_string(),
                None => name.to_string(),
            })
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(load_error)?;
            if record.len() > columns.len() {
                return Err(load_error(format!(
                    "row {} has {} fields but the header has {}",
                    index + 1,
                    record.len(),
                    columns.len()
                )));
            }

            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(load_error("CSV file is empty"));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = columns.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(load_error(format!("duplicate column name '{}'", duplicate)));
        }

        if let Some(mapping) = mapping {
            debug!("Applied column mapping with {} entries", mapping.len());
        }
        info!("Loaded {} rows with {} columns", rows.len(), columns.len());

        Ok(Self { columns, rows })
    }

    /// Column names in source order, after renaming
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in source order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by its post-mapping name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// All values of the column at `index`, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }
}

fn load_error(cause: impl Display) -> SqlSeedError {
    SqlSeedError::load(format!("Failed to load CSV: {}", cause))
}
