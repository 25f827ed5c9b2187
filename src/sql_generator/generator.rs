use crate::csv_loader::CsvTable;
use crate::error::SqlSeedError;
use crate::schema_analyzer::TypeInferrer;
use crate::sql_generator::escape::escape_value;
use crate::sql_generator::statement::{
    create_table_statement, dry_run_marker, insert_statement, SQLStatement, StatementType,
    DRY_RUN_ROW_LIMIT,
};
use crate::types::{ColumnDefinition, ColumnType, GenerationConfig, TableSchema};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Result of SQL generation process
#[derive(Debug, Clone)]
pub struct SQLGenerationResult {
    /// Generated SQL statements, in output order
    pub statements: Vec<SQLStatement>,
    /// Statistics about the generation
    pub statistics: SQLGenerationStatistics,
}

impl SQLGenerationResult {
    /// Concatenate all statements into the final SQL text
    pub fn to_sql(&self) -> String {
        self.statements
            .iter()
            .map(|statement| statement.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Statistics about SQL generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SQLGenerationStatistics {
    /// Number of INSERT statements generated
    pub insert_statements: u32,
    /// Number of CREATE statements generated
    pub create_statements: u32,
    /// Number of rows covered by the INSERT statements
    pub rows_rendered: u64,
    /// Generation time in milliseconds
    pub generation_time_ms: u64,
}

/// Turns one CSV file into SQL for a single table.
///
/// The CSV data and the inferred column types are fixed at construction, so
/// every call to [`SQLGenerator::generate`] with the same flags returns the
/// same text.
#[derive(Debug, Clone)]
pub struct SQLGenerator {
    config: GenerationConfig,
    table: CsvTable,
    schema: TableSchema,
}

impl SQLGenerator {
    /// Load `csv_path` and infer its column types.
    ///
    /// The configuration is validated before the file is touched.
    pub fn new(csv_path: impl AsRef<Path>, config: GenerationConfig) -> Result<Self, SqlSeedError> {
        config.validate()?;
        let table = CsvTable::load(csv_path.as_ref(), config.column_mapping.as_ref())?;
        Self::from_table(table, config)
    }

    /// Like [`SQLGenerator::new`], reading CSV data from `reader`
    pub fn from_reader<R: Read>(reader: R, config: GenerationConfig) -> Result<Self, SqlSeedError> {
        config.validate()?;
        let table = CsvTable::from_reader(reader, config.column_mapping.as_ref())?;
        Self::from_table(table, config)
    }

    /// Build a generator over an already loaded table
    pub fn from_table(table: CsvTable, config: GenerationConfig) -> Result<Self, SqlSeedError> {
        config.validate()?;

        let column_types = TypeInferrer::new().infer_table(&table);
        let columns = table
            .columns()
            .iter()
            .zip(column_types)
            .map(|(name, column_type)| ColumnDefinition {
                name: name.clone(),
                column_type,
            })
            .collect();

        let schema = TableSchema {
            table_name: config.table_name.clone(),
            dialect: config.dialect,
            columns,
        };

        info!(
            "Prepared table '{}' with {} columns and {} rows for {}",
            schema.table_name,
            schema.columns.len(),
            table.row_count(),
            schema.dialect
        );

        Ok(Self { config, table, schema })
    }

    /// Generate the SQL text.
    ///
    /// Blocks are separated by a blank line. A dry run renders at most
    /// [`DRY_RUN_ROW_LIMIT`] rows in one INSERT, preceded by a marker comment.
    pub fn generate(&self, include_create_table: bool, dry_run: bool) -> String {
        self.generate_statements(include_create_table, dry_run).to_sql()
    }

    /// Generate the statements behind [`SQLGenerator::generate`]
    pub fn generate_statements(&self, include_create_table: bool, dry_run: bool) -> SQLGenerationResult {
        let start_time = Instant::now();
        let mut statements = Vec::new();
        let mut statistics = SQLGenerationStatistics::default();

        if include_create_table {
            statements.push(create_table_statement(&self.schema));
            statistics.create_statements += 1;
        }

        let rows = self.table.rows();
        if dry_run {
            statements.push(dry_run_marker(&self.schema));
            let preview = &rows[..rows.len().min(DRY_RUN_ROW_LIMIT)];
            if !preview.is_empty() {
                statements.push(insert_statement(&self.schema, preview));
            }
        } else {
            for batch in rows.chunks(self.config.batch_size) {
                statements.push(insert_statement(&self.schema, batch));
            }
        }

        for statement in &statements {
            if statement.statement_type == StatementType::Insert {
                statistics.insert_statements += 1;
                statistics.rows_rendered += statement.row_count as u64;
            }
        }
        statistics.generation_time_ms = start_time.elapsed().as_millis() as u64;

        debug!(
            "Generated {} INSERT statements covering {} rows (dry_run={})",
            statistics.insert_statements, statistics.rows_rendered, dry_run
        );

        SQLGenerationResult { statements, statistics }
    }

    /// Render one raw value as a literal in this generator's dialect
    pub fn escape_value(&self, value: Option<&str>, column_type: ColumnType) -> String {
        escape_value(value, column_type, self.config.dialect)
    }

    /// Inferred schema of the output table
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn table(&self) -> &CsvTable {
        &self.table
    }

    /// Column names after mapping, in output order
    pub fn column_names(&self) -> &[String] {
        self.table.columns()
    }

    /// Inferred type of a column by its post-mapping name
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.schema
            .columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.column_type)
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }
}
