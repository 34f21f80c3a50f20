//! # scanlane-db: Store Layer for ScanLane POS
//!
//! Loads products, memberships and coupons from comma-delimited files, serves
//! them through the `scanlane-core` lookup traits, and writes updated
//! inventory and membership snapshots after checkout.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanLane Data Flow                               │
//! │                                                                         │
//! │  PosSession::open / checkout                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   scanlane-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │ StoreBackend  │    │    Stores     │    │    table     │   │   │
//! │  │   │ (backend.rs)  │◄───│ ProductStore  │◄───│ header, rows │   │   │
//! │  │   │ lookup traits │    │ MemberStore   │    │ trim, write  │   │   │
//! │  │   │ checkout ops  │    │ CouponStore   │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fixtures/db/*.csv  ──►  out/updated_*.csv                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scanlane_db::{StoreBackend, StorePaths};
//!
//! let backend = StoreBackend::load(StorePaths {
//!     inventory: Path::new("fixtures/db/inventory.csv"),
//!     memberships: Path::new("fixtures/db/memberships.csv"),
//!     coupons: Path::new("fixtures/db/coupons.csv"),
//! })?;
//! let milk = backend.products().get("012345678905");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{StoreBackend, StorePaths};
pub use error::{DbError, DbResult};
pub use store::{CouponStore, MemberStore, ProductStore};

#[cfg(test)]
pub(crate) fn test_fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/db")
        .join(name)
}
