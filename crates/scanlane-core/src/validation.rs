//! # Validation Module
//!
//! Structural validation of raw UPC-A symbols and numeric codes.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      validate_symbol(bits)                              │
//! │                                                                         │
//! │  1. Length == 95 ─────────────── WrongLength   (short-circuits all)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. bits[0..3]   == "101" ────── LeftGuard                             │
//! │  3. bits[92..95] == "101" ────── RightGuard                            │
//! │  4. bits[45..50] == "01010" ──── CenterGuard                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  5. LEFT modules:  count, width, odd parity,  0xxxxx1                  │
//! │     RIGHT modules: count, width, even parity, 1xxxxx0                  │
//! │                                                                         │
//! │  First failure wins. No error aggregation.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is shape-only: a module can pass every rule here and still be
//! missing from the digit table. That is caught later by the codec.
//!
//! ## Usage
//! ```rust
//! use scanlane_core::codec::encode;
//! use scanlane_core::validation::validate_symbol;
//! use scanlane_core::BarcodeError;
//!
//! let bits = encode("036000291452").unwrap();
//! assert!(validate_symbol(&bits).is_ok());
//!
//! let err = validate_symbol("101").unwrap_err();
//! assert!(matches!(err, BarcodeError::WrongLength { .. }));
//! ```

use crate::codec::{
    modules, Side, CENTER_GUARD, CENTER_GUARD_START, CODE_LENGTH, LEFT_GUARD, MODULES_PER_SIDE,
    MODULE_WIDTH, RIGHT_GUARD, SYMBOL_LENGTH,
};
use crate::error::{BarcodeError, BarcodeResult};

// =============================================================================
// Symbol Validators
// =============================================================================

/// Runs every structural check in order, stopping at the first failure.
pub fn validate_symbol(bits: &str) -> BarcodeResult<()> {
    validate_length(bits)?;
    validate_left_guard(bits)?;
    validate_right_guard(bits)?;
    validate_center_guard(bits)?;
    validate_modules(bits, Side::Left)?;
    validate_modules(bits, Side::Right)?;
    Ok(())
}

/// Symbol must be exactly 95 modules, counted in characters.
pub fn validate_length(bits: &str) -> BarcodeResult<()> {
    let actual = bits.chars().count();
    if actual != SYMBOL_LENGTH {
        return Err(BarcodeError::WrongLength {
            expected: SYMBOL_LENGTH,
            actual,
        });
    }
    Ok(())
}

/// First three modules must be the left guard.
pub fn validate_left_guard(bits: &str) -> BarcodeResult<()> {
    let found = bits.get(..LEFT_GUARD.len()).unwrap_or(bits);
    if found != LEFT_GUARD {
        return Err(BarcodeError::LeftGuard {
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Last three modules must be the right guard.
pub fn validate_right_guard(bits: &str) -> BarcodeResult<()> {
    let start = bits.len().saturating_sub(RIGHT_GUARD.len());
    let found = bits.get(start..).unwrap_or(bits);
    if found != RIGHT_GUARD {
        return Err(BarcodeError::RightGuard {
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Modules 45..50 must be the center guard.
pub fn validate_center_guard(bits: &str) -> BarcodeResult<()> {
    let end = CENTER_GUARD_START + CENTER_GUARD.len();
    let found = bits.get(CENTER_GUARD_START..end).unwrap_or("");
    if found != CENTER_GUARD {
        return Err(BarcodeError::CenterGuard {
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Checks the six digit modules of one half.
///
/// Each rule is applied to all six modules before the next rule runs, so a
/// parity problem in module 5 is reported ahead of a boundary problem in
/// module 0.
pub fn validate_modules(bits: &str, side: Side) -> BarcodeResult<()> {
    let mods = modules(bits, side);

    if mods.len() != MODULES_PER_SIDE {
        return Err(BarcodeError::ModuleCount {
            side,
            count: mods.len(),
        });
    }

    if let Some(index) = mods.iter().position(|m| m.len() != MODULE_WIDTH) {
        return Err(BarcodeError::ModuleWidth { side, index });
    }

    let wanted_remainder = usize::from(side.odd_parity());
    if let Some(index) = mods
        .iter()
        .position(|m| m.bytes().filter(|&b| b == b'1').count() % 2 != wanted_remainder)
    {
        return Err(BarcodeError::ModuleParity { side, index });
    }

    let (first, last) = side.boundary();
    if let Some(index) = mods.iter().position(|m| {
        let bytes = m.as_bytes();
        bytes[0] != first || bytes[MODULE_WIDTH - 1] != last
    }) {
        return Err(BarcodeError::ModuleBoundary { side, index });
    }

    Ok(())
}

// =============================================================================
// Numeric Code Validators
// =============================================================================

/// A numeric code must be exactly 12 ASCII decimal digits.
pub fn validate_numeric_code(code: &str) -> BarcodeResult<()> {
    if code.len() != CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BarcodeError::invalid_code(code));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
