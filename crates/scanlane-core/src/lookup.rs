//! # Lookups
//!
//! Read-only access to the entity stores, keyed by numeric code.
//!
//! The core never touches files. Whoever owns the data (the csv stores in
//! `scanlane-db`, or a plain map in tests) implements these traits and the
//! cart assembler reads through them.

use std::collections::HashMap;

use crate::types::{Coupon, Member, Product};

/// Finds products by barcode.
pub trait ProductLookup {
    fn get_product(&self, code: &str) -> Option<&Product>;
}

/// Finds coupons by barcode.
pub trait CouponLookup {
    fn get_coupon(&self, code: &str) -> Option<&Coupon>;
}

/// Finds members by barcode.
pub trait MemberLookup {
    fn get_member(&self, code: &str) -> Option<&Member>;
}

impl ProductLookup for HashMap<String, Product> {
    fn get_product(&self, code: &str) -> Option<&Product> {
        self.get(code)
    }
}

impl CouponLookup for HashMap<String, Coupon> {
    fn get_coupon(&self, code: &str) -> Option<&Coupon> {
        self.get(code)
    }
}

impl MemberLookup for HashMap<String, Member> {
    fn get_member(&self, code: &str) -> Option<&Member> {
        self.get(code)
    }
}
