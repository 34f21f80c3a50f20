//! # Store Error Types
//!
//! Error types for loading and saving the delimited-text stores.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / bad row                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds the file path and line number            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (register) ← Printed by the CLI                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Store load / save errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// File could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be parsed.
    ///
    /// ## When This Occurs
    /// - Fewer columns than the header declares
    /// - Price, quantity, points or discount is not a number
    /// - Expiration date is not `YYYY-MM-DD`
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl DbError {
    /// Creates an Io error for a given path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DbError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a Parse error for a given path and 1-based line.
    pub fn parse(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        DbError::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
