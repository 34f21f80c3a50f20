//! # Error Types
//!
//! Domain-specific error types for scanlane-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scanlane-core errors (this file)                                      │
//! │  ├── BarcodeError  - One variant per decode / checksum / shape rule    │
//! │  └── CoreError     - General domain errors                             │
//! │                                                                         │
//! │  scanlane-db errors (separate crate)                                   │
//! │  └── DbError       - Store load / save failures                        │
//! │                                                                         │
//! │  register errors (in app)                                              │
//! │  └── AppError      - What the CLI reports                              │
//! │                                                                         │
//! │  Flow: BarcodeError → CoreError → AppError → stderr                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inside a scan batch a `BarcodeError` never escapes a single line: the
//! decode orchestrator turns it into a reversed attempt or a drop. The
//! standalone entry points (`validate_symbol`, `verify_checksum`, `classify`)
//! return it directly so callers can see which rule failed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::Side;

// =============================================================================
// Barcode Error
// =============================================================================

/// A rule violated while validating, decoding or classifying a symbol.
///
/// Every structural rule has its own variant so tests and logs can tell
/// exactly which check rejected a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BarcodeError {
    /// Symbol is not exactly 95 modules long. Checked before anything else.
    #[error("Wrong length: expected {expected} modules, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// First three modules are not `101`.
    #[error("Wrong LEFT guard: found '{found}'")]
    LeftGuard { found: String },

    /// Last three modules are not `101`.
    #[error("Wrong RIGHT guard: found '{found}'")]
    RightGuard { found: String },

    /// Modules 45..50 are not `01010`.
    #[error("Wrong CENTER guard: found '{found}'")]
    CenterGuard { found: String },

    /// A payload half did not split into six digit modules.
    #[error("Wrong number of {side} modules: {count}")]
    ModuleCount { side: Side, count: usize },

    /// A digit module is not seven modules wide.
    #[error("Wrong length within {side} module {index}")]
    ModuleWidth { side: Side, index: usize },

    /// A digit module has the wrong parity (odd on the left, even on the right).
    #[error("Wrong number of ones in {side} module {index}")]
    ModuleParity { side: Side, index: usize },

    /// A digit module starts or ends with the wrong bar.
    #[error("Wrong start or end in {side} module {index}")]
    ModuleBoundary { side: Side, index: usize },

    /// A structurally valid module matched no entry in the digit table.
    #[error("Unrecognized {side} module pattern '{pattern}'")]
    UnknownModule { side: Side, pattern: String },

    /// Check digit does not match the other eleven digits.
    #[error("Security check failed: expected check digit {expected}, found {found}")]
    ChecksumMismatch { expected: u8, found: u8 },

    /// Numeric code is not made of the required number of decimal digits.
    #[error("Invalid barcode: '{code}'")]
    InvalidCode { code: String },
}

impl BarcodeError {
    /// Creates an InvalidCode error for the given input.
    pub fn invalid_code(code: impl Into<String>) -> Self {
        BarcodeError::InvalidCode { code: code.into() }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Symbol or numeric code rejected.
    #[error("Barcode error: {0}")]
    Barcode(#[from] BarcodeError),

    /// Membership tier label not recognised.
    #[error("Unknown membership tier: {0}")]
    UnknownTier(String),

    /// Coupon discount type not recognised.
    #[error("Unknown coupon type: {0}")]
    UnknownCouponType(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with BarcodeError.
pub type BarcodeResult<T> = Result<T, BarcodeError>;

// =============================================================================
// Unit Tests
// =============================================================================
