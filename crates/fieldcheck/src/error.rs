// File: src/error.rs
// Purpose: Hard failures. Invalid data never ends up here, only in the report.

use std::path::PathBuf;

/// The field list of an instance could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("field `{field}` declares min_size {min} above max_size {max}")]
    ConflictingSize { field: String, min: usize, max: usize },

    #[error("field `{field}` declares min_value {min} above max_value {max}")]
    ConflictingValue { field: String, min: i64, max: i64 },

    #[error("expected a record with named fields, found {found}")]
    NotAnObject { found: &'static str },
}

/// Rule book could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rule book {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule book: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("field entry {index} has no string `name`")]
    MissingName { index: usize },

    #[error("invalid rule for field `{field}`")]
    InvalidRule {
        field: String,
        #[source]
        source: SchemaError,
    },
}
