//! # Symbol Codec
//!
//! Maps 7-module patterns to digits for the two halves of a UPC-A symbol.
//!
//! ## Symbol Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UPC-A Symbol (95 modules)                        │
//! │                                                                         │
//! │   0..3    3..45                 45..50   50..92                92..95   │
//! │  ┌─────┬──────────────────────┬───────┬──────────────────────┬─────┐   │
//! │  │ 101 │ L0 L1 L2 L3 L4 L5    │ 01010 │ R0 R1 R2 R3 R4 R5    │ 101 │   │
//! │  └─────┴──────────────────────┴───────┴──────────────────────┴─────┘   │
//! │   guard  6 × 7, odd parity     center   6 × 7, even parity    guard    │
//! │          0xxxxx1                         1xxxxx0                        │
//! │                                                                         │
//! │  Left offsets:  3, 10, 17, 24, 31, 38                                  │
//! │  Right offsets: 50, 57, 64, 71, 78, 85                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offsets are derived from the guard widths, never from contiguous packing.
//! Lookups are exact: a pattern either is a table key or it is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BarcodeError, BarcodeResult};
use crate::validation::validate_numeric_code;

// =============================================================================
// Layout Constants
// =============================================================================

/// Total number of modules in a UPC-A symbol.
pub const SYMBOL_LENGTH: usize = 95;

/// Outer guard pattern at the left end.
pub const LEFT_GUARD: &str = "101";

/// Outer guard pattern at the right end.
pub const RIGHT_GUARD: &str = "101";

/// Center guard pattern between the two halves.
pub const CENTER_GUARD: &str = "01010";

/// Digit modules per half.
pub const MODULES_PER_SIDE: usize = 6;

/// Width of one digit module.
pub const MODULE_WIDTH: usize = 7;

/// Offset of the center guard.
pub const CENTER_GUARD_START: usize = LEFT_GUARD.len() + MODULES_PER_SIDE * MODULE_WIDTH;

/// Number of digits in a decoded numeric code.
pub const CODE_LENGTH: usize = 2 * MODULES_PER_SIDE;

// =============================================================================
// Digit Tables
// =============================================================================

/// Left-half (odd parity) patterns, indexed by digit.
pub const LEFT_PATTERNS: [&str; 10] = [
    "0001101", "0011001", "0010011", "0111101", "0100011",
    "0110001", "0101111", "0111011", "0110111", "0001011",
];

/// Right-half (even parity) patterns, indexed by digit.
/// Each one is the bitwise complement of its left counterpart.
pub const RIGHT_PATTERNS: [&str; 10] = [
    "1110010", "1100110", "1101100", "1000010", "1011100",
    "1001110", "1010000", "1000100", "1001000", "1110100",
];

// =============================================================================
// Side
// =============================================================================

/// Which half of the symbol a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both halves in decode order.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Offset of the first module of this half.
    pub const fn payload_start(self) -> usize {
        match self {
            Side::Left => LEFT_GUARD.len(),
            Side::Right => CENTER_GUARD_START + CENTER_GUARD.len(),
        }
    }

    /// Digit table for this half.
    pub const fn patterns(self) -> &'static [&'static str; 10] {
        match self {
            Side::Left => &LEFT_PATTERNS,
            Side::Right => &RIGHT_PATTERNS,
        }
    }

    /// True if modules on this half carry an odd number of dark bars.
    pub const fn odd_parity(self) -> bool {
        matches!(self, Side::Left)
    }

    /// Required first and last module of every digit on this half.
    pub const fn boundary(self) -> (u8, u8) {
        match self {
            Side::Left => (b'0', b'1'),
            Side::Right => (b'1', b'0'),
        }
    }

    /// Start offsets of the six digit modules on this half.
    pub fn module_offsets(self) -> impl Iterator<Item = usize> {
        let start = self.payload_start();
        (0..MODULES_PER_SIDE).map(move |i| start + i * MODULE_WIDTH)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "LEFT"),
            Side::Right => write!(f, "RIGHT"),
        }
    }
}

// =============================================================================
// Module Extraction
// =============================================================================

/// Slices the six digit modules of one half out of a symbol.
///
/// Behaves like a bounded slice: a window that runs past the end of a short
/// input comes back truncated (possibly empty) so width checks can reject it.
pub fn modules(bits: &str, side: Side) -> Vec<&str> {
    side.module_offsets()
        .map(|start| {
            let end = (start + MODULE_WIDTH).min(bits.len());
            bits.get(start.min(end)..end).unwrap_or("")
        })
        .collect()
}

/// Looks up the digit encoded by one module.
pub fn decode_module(module: &str, side: Side) -> BarcodeResult<u8> {
    side.patterns()
        .iter()
        .position(|pattern| *pattern == module)
        .map(|digit| digit as u8)
        .ok_or_else(|| BarcodeError::UnknownModule {
            side,
            pattern: module.to_string(),
        })
}

/// Converts a symbol into its 12-digit numeric code.
///
/// Only table membership is checked here; callers validate structure first.
pub fn decode_digits(bits: &str) -> BarcodeResult<String> {
    let mut code = String::with_capacity(CODE_LENGTH);
    for side in Side::BOTH {
        for module in modules(bits, side) {
            code.push(char::from(b'0' + decode_module(module, side)?));
        }
    }
    Ok(code)
}

/// Builds the 95-module symbol for a 12-digit code.
///
/// Digits 0–5 use the left table and digits 6–11 the right table. The check
/// digit is encoded as given; use [`crate::checksum::check_digit`] to build a
/// code that will survive decoding.
pub fn encode(code: &str) -> BarcodeResult<String> {
    validate_numeric_code(code)?;

    let digits = code.as_bytes();
    let mut bits = String::with_capacity(SYMBOL_LENGTH);
    bits.push_str(LEFT_GUARD);
    for &d in &digits[..MODULES_PER_SIDE] {
        bits.push_str(LEFT_PATTERNS[usize::from(d - b'0')]);
    }
    bits.push_str(CENTER_GUARD);
    for &d in &digits[MODULES_PER_SIDE..] {
        bits.push_str(RIGHT_PATTERNS[usize::from(d - b'0')]);
    }
    bits.push_str(RIGHT_GUARD);
    Ok(bits)
}

// =============================================================================
// Unit Tests
// =============================================================================
