//! # Decode Orchestrator
//!
//! Turns one scanned line into a numeric code, or drops it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        decode_scan(bits)                                │
//! │                                                                         │
//! │  START ── validate(bits) ──ok──────────────► VALIDATED(bits)            │
//! │    │                                              │                     │
//! │   err                                             │                     │
//! │    ▼                                              │                     │
//! │  REVERSED_ATTEMPT ── validate(rev) ──ok──► VALIDATED(rev)               │
//! │    │                                              │                     │
//! │   err                                       decode_digits               │
//! │    ▼                                         │         │                │
//! │  DROPPED ◄──────────────────── unknown module        code               │
//! │    ▲                                                   │                │
//! │    └──────────────────── checksum mismatch ◄── verify_checksum          │
//! │                                                        │ ok             │
//! │                                                        ▼                │
//! │                                                ACCEPTED(code)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guards read the same in both directions, so only a second full
//! validation pass can tell a mirrored scan from a malformed one. There is no
//! third attempt.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checksum::verify_checksum;
use crate::codec::decode_digits;
use crate::error::BarcodeError;
use crate::validation::validate_symbol;

/// Physical direction the symbol was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Forward,
    Reversed,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "forward"),
            Orientation::Reversed => write!(f, "reversed"),
        }
    }
}

/// Result of decoding one scanned line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Symbol validated, decoded and passed the modulo check.
    Accepted {
        code: String,
        orientation: Orientation,
    },
    /// Symbol produced no code. `reason` is the last rule that failed.
    Dropped { reason: BarcodeError },
}

impl ScanOutcome {
    /// The decoded code, if accepted.
    pub fn code(&self) -> Option<&str> {
        match self {
            ScanOutcome::Accepted { code, .. } => Some(code),
            ScanOutcome::Dropped { .. } => None,
        }
    }
}

/// Character-order reversal of a symbol (not a bit complement).
pub fn reverse_symbol(bits: &str) -> String {
    bits.chars().rev().collect()
}

/// Runs the two-attempt decode policy on one scanned line.
pub fn decode_scan(bits: &str) -> ScanOutcome {
    let (symbol, orientation): (Cow<'_, str>, Orientation) = match validate_symbol(bits) {
        Ok(()) => (Cow::Borrowed(bits), Orientation::Forward),
        Err(forward_err) => {
            debug!(reason = %forward_err, "Forward validation failed, trying reversed");
            let reversed = reverse_symbol(bits);
            match validate_symbol(&reversed) {
                Ok(()) => (Cow::Owned(reversed), Orientation::Reversed),
                Err(reason) => {
                    debug!(%reason, "Reversed validation failed, dropping symbol");
                    return ScanOutcome::Dropped { reason };
                }
            }
        }
    };

    let code = match decode_digits(&symbol) {
        Ok(code) => code,
        Err(reason) => {
            debug!(%reason, %orientation, "Module lookup failed, dropping symbol");
            return ScanOutcome::Dropped { reason };
        }
    };

    if let Err(reason) = verify_checksum(&code) {
        debug!(%code, %reason, "Modulo check failed, dropping symbol");
        return ScanOutcome::Dropped { reason };
    }

    debug!(%code, %orientation, "Symbol accepted");
    ScanOutcome::Accepted { code, orientation }
}

// =============================================================================
// Unit Tests
// =============================================================================
