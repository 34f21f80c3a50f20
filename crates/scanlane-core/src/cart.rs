//! # Cart
//!
//! The shopping cart built up by a scan batch.
//!
//! ## Cart Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Cart                                       │
//! │                                                                         │
//! │  items       Vec<Product>      ordered, duplicates allowed              │
//! │  membership  Option<Member>    last valid scan wins                     │
//! │  coupons     Vec<Coupon>       unique by barcode, first scan kept       │
//! │                                                                         │
//! │  total = max(subtotal − Σ coupon − subtotal × member rate, 0)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything the cart holds is a snapshot cloned out of the stores at scan
//! time. Store updates only happen at checkout.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{Coupon, Member, Product};

/// The shopping cart.
///
/// ## Invariants
/// - Coupon barcodes are unique; insertion order is preserved
/// - At most one membership
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Product>,
    membership: Option<Member>,
    coupons: Vec<Coupon>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Appends one unit of a product.
    pub fn add_item(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Sets the membership, returning the one it replaced.
    pub fn add_membership(&mut self, member: Member) -> Option<Member> {
        self.membership.replace(member)
    }

    /// Adds a coupon unless one with the same barcode is already present.
    ///
    /// Returns `true` if the coupon was inserted.
    pub fn add_coupon(&mut self, coupon: Coupon) -> bool {
        if self.has_coupon(&coupon.barcode) {
            return false;
        }
        self.coupons.push(coupon);
        true
    }

    pub fn has_coupon(&self, barcode: &str) -> bool {
        self.coupons.iter().any(|c| c.barcode == barcode)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn membership(&self) -> Option<&Member> {
        self.membership.as_ref()
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Units of one product already in the cart.
    pub fn count_of(&self, barcode: &str) -> i64 {
        self.items.iter().filter(|p| p.barcode == barcode).count() as i64
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.coupons.is_empty() && self.membership.is_none()
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Sum of item prices.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|p| p.price).sum()
    }

    /// Sum of every coupon's discount against the current subtotal.
    pub fn coupon_discount_at(&self, now: NaiveDateTime) -> f64 {
        let subtotal = self.subtotal();
        self.coupons
            .iter()
            .map(|c| c.discount_amount(subtotal, now))
            .sum()
    }

    /// Membership discount: `subtotal × rate`, or 0 without a member.
    pub fn membership_discount(&self) -> f64 {
        self.membership
            .as_ref()
            .map_or(0.0, |m| self.subtotal() * m.discount_rate())
    }

    /// Amount due at `now`, never below zero.
    pub fn total_at(&self, now: NaiveDateTime) -> f64 {
        let total = self.subtotal() - self.coupon_discount_at(now) - self.membership_discount();
        total.max(0.0)
    }

    /// [`Cart::total_at`] against the local clock.
    pub fn total(&self) -> f64 {
        self.total_at(Local::now().naive_local())
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.membership = None;
        self.coupons.clear();
    }
}

/// Cart summary for printing and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub item_count: usize,
    pub coupon_count: usize,
    pub member: Option<String>,
    pub subtotal: f64,
    pub coupon_discount: f64,
    pub membership_discount: f64,
    pub total: f64,
}

impl CartTotals {
    pub fn at(cart: &Cart, now: NaiveDateTime) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            coupon_count: cart.coupons().len(),
            member: cart.membership().map(|m| m.name.clone()),
            subtotal: cart.subtotal(),
            coupon_discount: cart.coupon_discount_at(now),
            membership_discount: cart.membership_discount(),
            total: cart.total_at(now),
        }
    }
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals::at(cart, Local::now().naive_local())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
