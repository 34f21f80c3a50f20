//! # Cart Assembler
//!
//! Applies decoded numeric codes to a cart.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     CartAssembler::apply(cart, code)                    │
//! │                                                                         │
//! │  classify(code)                                                         │
//! │    ├── Err ─────────────────────────────────► Skipped(InvalidCode)      │
//! │    ├── None (3–9) ──────────────────────────► Skipped(Unclassifiable)   │
//! │    ├── Product ── lookup ── miss ───────────► Skipped(UnknownProduct)   │
//! │    │                 ├── qty <= 0 ──────────► Skipped(OutOfStock)       │
//! │    │                 ├── in cart >= qty ────► Skipped(QuantityCap)      │
//! │    │                 └──────────────────────► ItemAdded                 │
//! │    ├── Coupon ─── lookup ── miss ───────────► Skipped(UnknownCoupon)    │
//! │    │                 ├── already in cart ───► Skipped(DuplicateCoupon)  │
//! │    │                 └──────────────────────► CouponAdded               │
//! │    └── Membership ─ lookup ── miss ─────────► Skipped(UnknownMember)    │
//! │                      └──────────────────────► MembershipSet             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup misses are not errors. They are logged at debug and reported as a
//! skip so a batch always runs to the end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cart::Cart;
use crate::error::{BarcodeError, BarcodeResult};
use crate::lookup::{CouponLookup, MemberLookup, ProductLookup};
use crate::scan::{decode_scan, Orientation, ScanOutcome};
use crate::types::CodeKind;
use crate::validation::validate_numeric_code;

// =============================================================================
// Classification
// =============================================================================

/// Identifies what a numeric code refers to.
///
/// ## Returns
/// - `Ok(Some(kind))` for leading digits 0, 1, 2
/// - `Ok(None)` for leading digits 3–9
/// - `Err(InvalidCode)` if `code` is not 12 decimal digits
///
/// ## Example
/// ```rust
/// use scanlane_core::{classify, CodeKind};
///
/// assert_eq!(classify("040112000000").unwrap(), Some(CodeKind::Product));
/// assert_eq!(classify("312345678901").unwrap(), None);
/// assert!(classify("04011200").is_err());
/// ```
pub fn classify(code: &str) -> BarcodeResult<Option<CodeKind>> {
    validate_numeric_code(code)?;
    Ok(code.bytes().next().and_then(CodeKind::from_leading_digit))
}

// =============================================================================
// Effects
// =============================================================================

/// Why a decoded code left the cart unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidCode,
    Unclassifiable,
    UnknownProduct,
    OutOfStock,
    QuantityCap,
    UnknownCoupon,
    DuplicateCoupon,
    UnknownMember,
}

/// What applying one code did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ScanEffect {
    ItemAdded { code: String },
    CouponAdded { code: String },
    /// `replaced` is true when an earlier membership was overwritten.
    MembershipSet { code: String, replaced: bool },
    Skipped { code: String, reason: SkipReason },
}

impl ScanEffect {
    fn skipped(code: &str, reason: SkipReason) -> Self {
        ScanEffect::Skipped {
            code: code.to_string(),
            reason,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, ScanEffect::Skipped { .. })
    }
}

// =============================================================================
// Scan Report
// =============================================================================

/// A line that produced no code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub reason: BarcodeError,
}

/// Summary of one scan batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Non-blank lines seen.
    pub scanned: usize,
    /// Lines that decoded to a code.
    pub accepted: usize,
    /// Accepted lines that were read mirrored.
    pub reversed: usize,
    pub dropped: Vec<DroppedLine>,
    /// One entry per accepted line, in input order.
    pub effects: Vec<ScanEffect>,
}

impl ScanReport {
    pub fn skipped(&self) -> usize {
        self.effects.iter().filter(|e| e.is_skip()).count()
    }
}

// =============================================================================
// Assembler
// =============================================================================

/// Builds a cart from codes, reading entities through `catalog`.
pub struct CartAssembler<'a, C> {
    catalog: &'a C,
}

impl<'a, C> CartAssembler<'a, C>
where
    C: ProductLookup + CouponLookup + MemberLookup,
{
    pub fn new(catalog: &'a C) -> Self {
        CartAssembler { catalog }
    }

    /// Applies one numeric code to the cart.
    pub fn apply(&self, cart: &mut Cart, code: &str) -> ScanEffect {
        let kind = match classify(code) {
            Ok(Some(kind)) => kind,
            Ok(None) => {
                debug!(%code, "Unclassifiable code");
                return ScanEffect::skipped(code, SkipReason::Unclassifiable);
            }
            Err(err) => {
                debug!(%code, error = %err, "Invalid code");
                return ScanEffect::skipped(code, SkipReason::InvalidCode);
            }
        };

        match kind {
            CodeKind::Product => self.apply_product(cart, code),
            CodeKind::Coupon => self.apply_coupon(cart, code),
            CodeKind::Membership => self.apply_membership(cart, code),
        }
    }

    /// Adds one unit while the cart holds fewer units of this barcode than
    /// the store has on record.
    ///
    /// The cap is per product: units of other products already in the cart
    /// do not count against it.
    fn apply_product(&self, cart: &mut Cart, code: &str) -> ScanEffect {
        let Some(product) = self.catalog.get_product(code) else {
            debug!(%code, "Product not found");
            return ScanEffect::skipped(code, SkipReason::UnknownProduct);
        };
        if !product.is_in_stock() {
            debug!(%code, quantity = product.quantity, "Product out of stock");
            return ScanEffect::skipped(code, SkipReason::OutOfStock);
        }
        let in_cart = cart.count_of(code);
        if in_cart >= product.quantity {
            debug!(%code, in_cart, quantity = product.quantity, "Product quantity cap reached");
            return ScanEffect::skipped(code, SkipReason::QuantityCap);
        }

        debug!(%code, name = %product.name, "Adding product");
        cart.add_item(product.clone());
        ScanEffect::ItemAdded {
            code: code.to_string(),
        }
    }

    fn apply_coupon(&self, cart: &mut Cart, code: &str) -> ScanEffect {
        let Some(coupon) = self.catalog.get_coupon(code) else {
            debug!(%code, "Coupon not found");
            return ScanEffect::skipped(code, SkipReason::UnknownCoupon);
        };
        if !cart.add_coupon(coupon.clone()) {
            debug!(%code, "Coupon already in cart");
            return ScanEffect::skipped(code, SkipReason::DuplicateCoupon);
        }

        debug!(%code, description = %coupon.description, "Adding coupon");
        ScanEffect::CouponAdded {
            code: code.to_string(),
        }
    }

    fn apply_membership(&self, cart: &mut Cart, code: &str) -> ScanEffect {
        let Some(member) = self.catalog.get_member(code) else {
            debug!(%code, "Member not found");
            return ScanEffect::skipped(code, SkipReason::UnknownMember);
        };

        let replaced = cart.add_membership(member.clone());
        if let Some(previous) = &replaced {
            debug!(%code, previous = %previous.barcode, "Replacing membership");
        } else {
            debug!(%code, name = %member.name, "Setting membership");
        }
        ScanEffect::MembershipSet {
            code: code.to_string(),
            replaced: replaced.is_some(),
        }
    }

    /// Decodes and applies each line of a scan batch, in order.
    ///
    /// Lines that are empty after trimming are ignored and do not count as
    /// scanned. Line numbers in the report are 1-based over the raw input.
    pub fn process_lines<I, S>(&self, cart: &mut Cart, lines: I) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ScanReport::default();

        for (index, line) in lines.into_iter().enumerate() {
            let bits = line.as_ref().trim();
            if bits.is_empty() {
                continue;
            }
            report.scanned += 1;

            match decode_scan(bits) {
                ScanOutcome::Accepted { code, orientation } => {
                    report.accepted += 1;
                    if orientation == Orientation::Reversed {
                        report.reversed += 1;
                    }
                    report.effects.push(self.apply(cart, &code));
                }
                ScanOutcome::Dropped { reason } => {
                    debug!(line = index + 1, %reason, "Dropping line");
                    report.dropped.push(DroppedLine {
                        line: index + 1,
                        reason,
                    });
                }
            }
        }

        info!(
            scanned = report.scanned,
            accepted = report.accepted,
            reversed = report.reversed,
            dropped = report.dropped.len(),
            skipped = report.skipped(),
            "Scan batch processed"
        );
        report
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::scan::reverse_symbol;
    use crate::types::{Coupon, CouponKind, Member, MembershipTier, Product};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Catalog {
        products: HashMap<String, Product>,
        coupons: HashMap<String, Coupon>,
        members: HashMap<String, Member>,
    }

    impl ProductLookup for Catalog {
        fn get_product(&self, code: &str) -> Option<&Product> {
            self.products.get_product(code)
        }
    }

    impl CouponLookup for Catalog {
        fn get_coupon(&self, code: &str) -> Option<&Coupon> {
            self.coupons.get_coupon(code)
        }
    }

    impl MemberLookup for Catalog {
        fn get_member(&self, code: &str) -> Option<&Member> {
            self.members.get_member(code)
        }
    }

    fn catalog() -> Catalog {
        let mut c = Catalog::default();
        for p in [
            Product::new("040112000000", "Apple", 1.3, 200),
            Product::new("073390000110", "Cheddar Cheese", 7.0, 40),
            Product::new("065432109875", "Bread", 3.49, 0),
            Product::new("098765432105", "Eggs", 4.25, 1),
        ] {
            c.products.insert(p.barcode.clone(), p);
        }
        let expires = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
        let coupon = Coupon::new("112345000017", expires, 5.0, "7.47 off", CouponKind::Fixed(7.47));
        c.coupons.insert(coupon.barcode.clone(), coupon);
        for m in [
            Member::new("213456789010", "John Smith", MembershipTier::Gold, 500.0),
            Member::new("257274767454", "Jane Doe", MembershipTier::Platinum, 1200.0),
        ] {
            c.members.insert(m.barcode.clone(), m);
        }
        c
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("112345000017").unwrap(), Some(CodeKind::Coupon));
        assert_eq!(classify("213456789010").unwrap(), Some(CodeKind::Membership));
        assert_eq!(classify("040112000000").unwrap(), Some(CodeKind::Product));
        assert_eq!(classify("073390000110").unwrap(), Some(CodeKind::Product));
        for lead in '3'..='9' {
            assert_eq!(classify(&format!("{lead}00000000000")).unwrap(), None);
        }
        assert!(matches!(
            classify("abc"),
            Err(BarcodeError::InvalidCode { .. })
        ));
        assert!(classify("").is_err());
    }

    #[test]
    fn test_apply_product_rules() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();

        assert!(matches!(
            assembler.apply(&mut cart, "040112000000"),
            ScanEffect::ItemAdded { .. }
        ));
        assert_eq!(
            assembler.apply(&mut cart, "065432109875"),
            ScanEffect::skipped("065432109875", SkipReason::OutOfStock)
        );
        assert!(matches!(
            assembler.apply(&mut cart, "098765432105"),
            ScanEffect::ItemAdded { .. }
        ));
        assert_eq!(
            assembler.apply(&mut cart, "098765432105"),
            ScanEffect::skipped("098765432105", SkipReason::QuantityCap)
        );
        assert_eq!(
            assembler.apply(&mut cart, "012345678905"),
            ScanEffect::skipped("012345678905", SkipReason::UnknownProduct)
        );
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_quantity_cap_is_per_product() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();

        assembler.apply(&mut cart, "040112000000");
        // Eggs has one unit on record; the Apple already in the cart does not count
        assert!(matches!(
            assembler.apply(&mut cart, "098765432105"),
            ScanEffect::ItemAdded { .. }
        ));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_apply_coupon_is_idempotent() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();

        assert!(matches!(
            assembler.apply(&mut cart, "112345000017"),
            ScanEffect::CouponAdded { .. }
        ));
        assert_eq!(
            assembler.apply(&mut cart, "112345000017"),
            ScanEffect::skipped("112345000017", SkipReason::DuplicateCoupon)
        );
        assert_eq!(cart.coupons().len(), 1);
        assert_eq!(
            assembler.apply(&mut cart, "149234073227"),
            ScanEffect::skipped("149234073227", SkipReason::UnknownCoupon)
        );
    }

    #[test]
    fn test_apply_membership_overwrites() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();

        assert_eq!(
            assembler.apply(&mut cart, "213456789010"),
            ScanEffect::MembershipSet {
                code: "213456789010".to_string(),
                replaced: false
            }
        );
        assert_eq!(
            assembler.apply(&mut cart, "257274767454"),
            ScanEffect::MembershipSet {
                code: "257274767454".to_string(),
                replaced: true
            }
        );
        assert_eq!(cart.membership().map(|m| m.name.as_str()), Some("Jane Doe"));
        assert_eq!(
            assembler.apply(&mut cart, "200000000000"),
            ScanEffect::skipped("200000000000", SkipReason::UnknownMember)
        );
    }

    #[test]
    fn test_apply_unclassifiable() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();
        assert_eq!(
            assembler.apply(&mut cart, "312345678901"),
            ScanEffect::skipped("312345678901", SkipReason::Unclassifiable)
        );
        assert_eq!(
            assembler.apply(&mut cart, "31234"),
            ScanEffect::skipped("31234", SkipReason::InvalidCode)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_process_lines_builds_cart() {
        let catalog = catalog();
        let assembler = CartAssembler::new(&catalog);
        let mut cart = Cart::new();

        let lines = vec![
            encode("112345000017").unwrap(),
            reverse_symbol(&encode("213456789010").unwrap()),
            String::new(),
            encode("040112000000").unwrap(),
            "   ".to_string(),
            "1".repeat(95),
            encode("073390000110").unwrap(),
        ];
        let report = assembler.process_lines(&mut cart, &lines);

        assert_eq!(report.scanned, 5);
        assert_eq!(report.accepted, 4);
        assert_eq!(report.reversed, 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].line, 6);
        assert_eq!(report.skipped(), 0);

        assert_eq!(cart.item_count(), 2);
        assert!((cart.subtotal() - 8.3).abs() < 1e-9);
        assert_eq!(cart.membership().map(|m| m.name.as_str()), Some("John Smith"));
        assert!((cart.total() - 0.415).abs() < 1e-6);
    }
}
