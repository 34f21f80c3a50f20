//! # Store Module
//!
//! Delimited-text stores for ScanLane POS.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  inventory.csv ───► ProductStore ──┐                                    │
//! │  memberships.csv ─► MemberStore ───┼──► StoreBackend ──► CartAssembler  │
//! │  coupons.csv ─────► CouponStore ───┘      (lookup traits)               │
//! │                                                                         │
//! │  Each store loads its whole file once, serves keyed lookups from        │
//! │  memory and (products, members) writes a full snapshot on save.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`ProductStore`] - Inventory, stock decrement
//! - [`MemberStore`] - Memberships, points credit
//! - [`CouponStore`] - Coupons, read-only

pub mod coupon;
pub mod member;
pub mod product;
mod table;

pub use coupon::CouponStore;
pub use member::MemberStore;
pub use product::ProductStore;
