use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Failures of a single scaffold run.
///
/// Nothing is rolled back: a `WriteFailure` lists every artifact that was already
/// written when the failing write happened, so callers can report the partial result.
/// Re-running the scaffold is the recovery path.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Table {0} does not exist or has no columns")]
    Schema(String),

    #[error("Table {table} cannot be scaffolded: {reason}")]
    UnsupportedTable { table: String, reason: String },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template {template} left unresolved placeholders: {}", tokens.join(", "))]
    UnresolvedPlaceholder { template: String, tokens: Vec<String> },

    #[error("Write failed for {}: {message}", path.display())]
    WriteFailure {
        path: PathBuf,
        message: String,
        written: Vec<PathBuf>,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ScaffoldError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut field_errors = BTreeMap::new();
        field_errors.insert(field.to_string(), message.clone());
        ScaffoldError::Validation { message, field_errors }
    }

    pub fn write_failure(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ScaffoldError::WriteFailure {
            path: path.into(),
            message: err.to_string(),
            written: Vec::new(),
        }
    }

    /// Attach the artifacts already on disk to a write failure.
    pub fn with_written(self, already: &[PathBuf]) -> Self {
        match self {
            ScaffoldError::WriteFailure { path, message, mut written } => {
                let mut all = already.to_vec();
                all.append(&mut written);
                ScaffoldError::WriteFailure { path, message, written: all }
            }
            other => other,
        }
    }
}
