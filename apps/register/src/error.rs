//! # App Error Type
//!
//! Unified error type for register operations.
//!
//! ```text
//!  ConfigError ──┐
//!  DbError ──────┼──► AppError ──► anyhow (main) ──► stderr, exit 1
//!  CoreError ────┤
//!  scan file ────┘
//! ```
//!
//! Per-line decode failures never reach this type. They are dropped inside
//! the batch and show up in the `ScanReport` instead.

use std::path::PathBuf;

use scanlane_core::CoreError;
use scanlane_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The scan input could not be opened or read.
    #[error("Cannot read scan input {}: {source}", path.display())]
    ScanInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;
