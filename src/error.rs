use thiserror::Error;

/// Main error type for sql-seed
#[derive(Error, Debug)]
pub enum SqlSeedError {
    /// The CSV source could not be turned into a table
    #[error("Load error: {message}")]
    Load { message: String },

    /// Invalid generation settings, detected before any file access
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SqlSeedError {
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// True for errors raised while reading or parsing the CSV file
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    /// True for errors raised while validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}
