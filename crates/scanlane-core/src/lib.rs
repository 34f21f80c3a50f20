//! # scanlane-core: Barcode Pipeline for ScanLane POS
//!
//! This crate holds every rule ScanLane applies to a scanned symbol, from the
//! raw 95-module bit string to the cart it ends up in. It does no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanLane Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 scanlane CLI (apps/register)                    │   │
//! │  │      scan ──► checkout ──► receipt        encode / classify     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ scanlane-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   codec   │  │validation │  │ checksum  │  │   scan    │  │   │
//! │  │   │  tables   │─►│  guards   │─►│  modulo   │─►│ fwd / rev │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      │        │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────▼─────┐  │   │
//! │  │   │   types   │  │   cart    │◄─│  lookup   │◄─│ assembler │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK EXCEPT *_now() HELPERS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ lookup traits                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  scanlane-db (csv stores)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - Digit tables, module extraction, encode / decode
//! - [`validation`] - Structural checks on a symbol
//! - [`checksum`] - UPC-A check digit
//! - [`scan`] - Forward-then-reversed decode of one line
//! - [`types`] - Product, Member, Coupon
//! - [`cart`] - The cart and its totals
//! - [`lookup`] - Traits the stores implement
//! - [`assembler`] - Classification and cart rules
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use scanlane_core::{decode_scan, encode, reverse_symbol, ScanOutcome};
//!
//! let bits = encode("036000291452").unwrap();
//!
//! // A mirrored read decodes to the same code
//! let outcome = decode_scan(&reverse_symbol(&bits));
//! assert_eq!(outcome.code(), Some("036000291452"));
//!
//! // Garbage is dropped, never raised
//! assert!(matches!(decode_scan("1010"), ScanOutcome::Dropped { .. }));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembler;
pub mod cart;
pub mod checksum;
pub mod codec;
pub mod error;
pub mod lookup;
pub mod scan;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use assembler::{classify, CartAssembler, DroppedLine, ScanEffect, ScanReport, SkipReason};
pub use cart::{Cart, CartTotals};
pub use checksum::{check_digit, complete_code, verify_checksum};
pub use codec::{decode_digits, encode, Side};
pub use error::{BarcodeError, BarcodeResult, CoreError, CoreResult};
pub use lookup::{CouponLookup, MemberLookup, ProductLookup};
pub use scan::{decode_scan, reverse_symbol, Orientation, ScanOutcome};
pub use types::*;
pub use validation::validate_symbol;
