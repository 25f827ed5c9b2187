// SQL generator module: value escaping, statement rendering and batching
pub mod escape;
pub mod generator;
pub mod statement;


pub use escape::{escape_value, quote_string, NULL_LITERAL};
pub use generator::{SQLGenerationResult, SQLGenerationStatistics, SQLGenerator};
pub use statement::{SQLStatement, StatementType, DRY_RUN_MARKER, DRY_RUN_ROW_LIMIT};
