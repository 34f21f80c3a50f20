//! # Domain Types
//!
//! Core domain types used throughout ScanLane POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Member      │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode        │   │  barcode        │   │  barcode        │       │
//! │  │  name           │   │  name           │   │  expires_on     │       │
//! │  │  price          │   │  points         │   │  min_purchase   │       │
//! │  │  quantity       │   │  tier ──┐       │   │  kind ──┐       │       │
//! │  └─────────────────┘   └─────────┼───────┘   └─────────┼───────┘       │
//! │                                  ▼                     ▼               │
//! │                        ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │ MembershipTier  │   │   CouponKind    │       │
//! │                        │  Silver         │   │  Fixed(amount)  │       │
//! │                        │  Gold           │   │  Percent(rate)  │       │
//! │                        │  Platinum       │   └─────────────────┘       │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tiers differ only in two constants and a label, and coupon kinds only in
//! their discount formula, so both are tagged data rather than trait objects.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Code Kind
// =============================================================================

/// What a numeric code identifies, from its leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    /// Leading `0`.
    Product,
    /// Leading `1`.
    Coupon,
    /// Leading `2`.
    Membership,
}

impl CodeKind {
    /// Maps a leading digit to a kind. Digits 3–9 identify nothing.
    pub const fn from_leading_digit(digit: u8) -> Option<Self> {
        match digit {
            b'0' => Some(CodeKind::Product),
            b'1' => Some(CodeKind::Coupon),
            b'2' => Some(CodeKind::Membership),
            _ => None,
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Product => write!(f, "product"),
            CodeKind::Coupon => write!(f, "coupon"),
            CodeKind::Membership => write!(f, "membership"),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on record in the inventory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 12-digit numeric code, leading `0`.
    pub barcode: String,

    /// Display name shown on receipts.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Units currently on record. Decremented only at checkout.
    pub quantity: i64,
}

impl Product {
    pub fn new(barcode: impl Into<String>, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Product {
            barcode: barcode.into(),
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Lowers the tracked quantity. May go negative.
    pub fn decrease_quantity(&mut self, quantity: i64) {
        self.quantity -= quantity;
    }

    /// True while at least one unit is on record.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Membership Tier
// =============================================================================

/// Constants that distinguish one membership tier from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPolicy {
    pub label: &'static str,
    /// Points earned per unit of currency spent.
    pub points_multiplier: f64,
    /// Fraction of the subtotal taken off at checkout.
    pub discount_rate: f64,
}

/// Policy table, indexed by `MembershipTier as usize`.
static TIER_POLICIES: [TierPolicy; 3] = [
    TierPolicy {
        label: "Silver",
        points_multiplier: 1.1,
        discount_rate: 0.01,
    },
    TierPolicy {
        label: "Gold",
        points_multiplier: 1.5,
        discount_rate: 0.05,
    },
    TierPolicy {
        label: "Platinum",
        points_multiplier: 2.0,
        discount_rate: 0.10,
    },
];

/// Membership tier tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipTier {
    Silver = 0,
    Gold = 1,
    Platinum = 2,
}

impl MembershipTier {
    /// Looks up this tier's constants.
    #[inline]
    pub fn policy(self) -> &'static TierPolicy {
        &TIER_POLICIES[self as usize]
    }

    #[inline]
    pub fn label(self) -> &'static str {
        self.policy().label
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MembershipTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silver" => Ok(MembershipTier::Silver),
            "gold" => Ok(MembershipTier::Gold),
            "platinum" => Ok(MembershipTier::Platinum),
            _ => Err(CoreError::UnknownTier(s.to_string())),
        }
    }
}

// =============================================================================
// Member
// =============================================================================

/// A registered store member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// 12-digit numeric code, leading `2`.
    pub barcode: String,
    pub name: String,
    pub points: f64,
    pub tier: MembershipTier,
}

impl Member {
    pub fn new(barcode: impl Into<String>, name: impl Into<String>, tier: MembershipTier, points: f64) -> Self {
        Member {
            barcode: barcode.into(),
            name: name.into(),
            points,
            tier,
        }
    }

    pub fn add_points(&mut self, points: f64) {
        self.points += points;
    }

    #[inline]
    pub fn discount_rate(&self) -> f64 {
        self.tier.policy().discount_rate
    }

    #[inline]
    pub fn points_multiplier(&self) -> f64 {
        self.tier.policy().points_multiplier
    }

    #[inline]
    pub fn tier_label(&self) -> &'static str {
        self.tier.label()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon computes its discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CouponKind {
    /// Flat amount off.
    Fixed(f64),
    /// Percentage of the subtotal, expressed 0–100.
    Percent(f64),
}

impl CouponKind {
    /// Parses the store's `discount_type` column together with its value.
    pub fn parse(discount_type: &str, value: f64) -> CoreResult<Self> {
        match discount_type.trim().to_lowercase().as_str() {
            "fixed" => Ok(CouponKind::Fixed(value)),
            "percent" => Ok(CouponKind::Percent(value)),
            other => Err(CoreError::UnknownCouponType(other.to_string())),
        }
    }
}

/// A store coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// 12-digit numeric code, leading `1`.
    pub barcode: String,

    /// The coupon stops applying from midnight at the start of this date.
    pub expires_on: NaiveDate,

    /// Smallest subtotal the coupon applies to.
    pub min_purchase: f64,

    pub description: String,

    pub kind: CouponKind,
}

impl Coupon {
    pub fn new(
        barcode: impl Into<String>,
        expires_on: NaiveDate,
        min_purchase: f64,
        description: impl Into<String>,
        kind: CouponKind,
    ) -> Self {
        Coupon {
            barcode: barcode.into(),
            expires_on,
            min_purchase,
            description: description.into(),
            kind,
        }
    }

    /// True once `now` is past midnight of the expiration date.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        now > self.expires_on.and_time(NaiveTime::default())
    }

    /// Discount this coupon gives on `subtotal` at time `now`.
    ///
    /// ## Rules
    /// - Expired, or subtotal below `min_purchase` → 0
    /// - `Fixed(a)` → `min(a, subtotal)`
    /// - `Percent(r)` → `min(subtotal × r / 100, subtotal)`
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use scanlane_core::{Coupon, CouponKind};
    ///
    /// let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    /// let now = NaiveDate::from_ymd_opt(2029, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    ///
    /// let coupon = Coupon::new("112345000017", expires, 5.0, "10% off", CouponKind::Percent(10.0));
    /// assert!((coupon.discount_amount(20.0, now) - 2.0).abs() < 1e-9);
    /// assert_eq!(coupon.discount_amount(4.0, now), 0.0);
    /// ```
    pub fn discount_amount(&self, subtotal: f64, now: NaiveDateTime) -> f64 {
        if self.is_expired_at(now) || subtotal < self.min_purchase {
            return 0.0;
        }
        match self.kind {
            CouponKind::Fixed(amount) => amount.min(subtotal),
            CouponKind::Percent(rate) => (subtotal * (rate / 100.0)).min(subtotal),
        }
    }

    /// [`Coupon::discount_amount`] against the local clock.
    pub fn discount_amount_now(&self, subtotal: f64) -> f64 {
        self.discount_amount(subtotal, Local::now().naive_local())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_code_kind_from_leading_digit() {
        assert_eq!(CodeKind::from_leading_digit(b'0'), Some(CodeKind::Product));
        assert_eq!(CodeKind::from_leading_digit(b'1'), Some(CodeKind::Coupon));
        assert_eq!(CodeKind::from_leading_digit(b'2'), Some(CodeKind::Membership));
        assert_eq!(CodeKind::from_leading_digit(b'3'), None);
        assert_eq!(CodeKind::Membership.to_string(), "membership");
    }

    #[test]
    fn test_product_stock() {
        let mut milk = Product::new("012345678905", "Milk", 2.99, 150);
        assert!(milk.is_in_stock());
        milk.decrease_quantity(10);
        assert_eq!(milk.quantity, 140);
        milk.decrease_quantity(140);
        assert!(!milk.is_in_stock());
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(MembershipTier::Silver.policy().points_multiplier, 1.1);
        assert_eq!(MembershipTier::Gold.policy().discount_rate, 0.05);
        assert_eq!(MembershipTier::Platinum.policy().discount_rate, 0.10);
        assert_eq!(MembershipTier::Platinum.to_string(), "Platinum");
    }

    #[test]
    fn test_tier_from_str() {
        assert_eq!("Gold".parse::<MembershipTier>().unwrap(), MembershipTier::Gold);
        assert_eq!(" silver ".parse::<MembershipTier>().unwrap(), MembershipTier::Silver);
        assert!("Bronze".parse::<MembershipTier>().is_err());
    }

    #[test]
    fn test_member_points() {
        let mut jane = Member::new("257274767454", "Jane Doe", MembershipTier::Platinum, 1200.0);
        jane.add_points(100.0);
        assert_eq!(jane.points, 1300.0);
        assert_eq!(jane.points_multiplier(), 2.0);
        assert_eq!(jane.tier_label(), "Platinum");
    }

    #[test]
    fn test_fixed_coupon() {
        let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let coupon = Coupon::new("b4", expires, 1.0, "desc", CouponKind::Fixed(1.0));
        let now = noon(2029, 1, 1);

        assert_eq!(coupon.discount_amount(5.0, now), 1.0);
        // Never more than the subtotal
        let big = Coupon::new("b5", expires, 0.0, "desc", CouponKind::Fixed(50.0));
        assert_eq!(big.discount_amount(5.0, now), 5.0);
        // Below threshold
        assert_eq!(coupon.discount_amount(0.5, now), 0.0);
    }

    #[test]
    fn test_percent_coupon_capped() {
        let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let coupon = Coupon::new("b6", expires, 0.0, "desc", CouponKind::Percent(150.0));
        assert_eq!(coupon.discount_amount(10.0, noon(2029, 1, 1)), 10.0);
    }

    #[test]
    fn test_coupon_expires_at_start_of_date() {
        let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let coupon = Coupon::new("b7", expires, 0.0, "desc", CouponKind::Fixed(2.0));

        assert!(!coupon.is_expired_at(noon(2029, 12, 31)));
        assert!(coupon.is_expired_at(noon(2030, 1, 1)));
        assert_eq!(coupon.discount_amount(10.0, noon(2030, 1, 1)), 0.0);

        let old = Coupon::new("b8", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 0.0, "d", CouponKind::Fixed(2.0));
        assert_eq!(old.discount_amount_now(10.0), 0.0);
        let far = Coupon::new("b9", NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(), 0.0, "d", CouponKind::Fixed(2.0));
        assert_eq!(far.discount_amount_now(10.0), 2.0);
    }

    #[test]
    fn test_coupon_kind_parse() {
        assert_eq!(CouponKind::parse("Percent", 10.0).unwrap(), CouponKind::Percent(10.0));
        assert_eq!(CouponKind::parse("fixed", 2.5).unwrap(), CouponKind::Fixed(2.5));
        assert!(CouponKind::parse("bogo", 1.0).is_err());
    }
}
