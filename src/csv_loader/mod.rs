// CSV loader module: reads a CSV file into an in-memory table
pub mod loader;


pub use loader::CsvTable;
