pub mod error;
pub mod types;
pub mod csv_loader;
pub mod schema_analyzer;
pub mod sql_generator;

pub use error::SqlSeedError;
pub use sql_generator::SQLGenerator;
pub use types::{ColumnMapping, ColumnType, Dialect, GenerationConfig, TableSchema};
