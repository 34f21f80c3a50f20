//! # POS Session
//!
//! One register session: open the stores, run scan batches into a cart,
//! check out.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PosSession::checkout()                             │
//! │                                                                         │
//! │  1. total = cart.total_at(now); next = backend.clone()                  │
//! │  2. for each cart item ──► next.decrease_product_quantity(code, 1)      │
//! │  3. membership? ─────────► next.add_member_points(code, total × m)      │
//! │  4. next.save_inventory(output.inventory)                               │
//! │     next.save_memberships(output.memberships)                           │
//! │  5. backend = next; Receipt { id, issued_at, amounts, items }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-cart cap compares against the stock figures loaded at open time.
//! Stock only changes in step 2, after the batch is done.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use scanlane_core::{
    classify, encode, BarcodeResult, Cart, CartAssembler, CartTotals, CodeKind, CoreError,
    ScanReport,
};
use scanlane_db::{StoreBackend, StorePaths};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::RegisterConfig;
use crate::error::{AppError, AppResult};

// =============================================================================
// Receipt
// =============================================================================

/// Record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
    /// Item names in scan order.
    pub items: Vec<String>,
    pub member: Option<String>,
    pub subtotal: f64,
    pub coupon_discount: f64,
    pub membership_discount: f64,
    pub total: f64,
    pub points_earned: f64,
}

// =============================================================================
// Session
// =============================================================================

pub struct PosSession {
    backend: StoreBackend,
    cart: Cart,
    config: RegisterConfig,
}

impl PosSession {
    /// Loads the stores named in `config`.
    pub fn open(config: RegisterConfig) -> AppResult<Self> {
        let backend = StoreBackend::load(StorePaths {
            inventory: &config.data.inventory,
            memberships: &config.data.memberships,
            coupons: &config.data.coupons,
        })?;
        Ok(PosSession::with_backend(backend, config))
    }

    pub fn with_backend(backend: StoreBackend, config: RegisterConfig) -> Self {
        PosSession {
            backend,
            cart: Cart::new(),
            config,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn backend(&self) -> &StoreBackend {
        &self.backend
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Runs every line of a scan file through decode and the cart rules.
    ///
    /// Failing to read the file is the only error. Bad lines are reported in
    /// the returned `ScanReport`.
    pub fn process_scan_file(&mut self, path: impl AsRef<Path>) -> AppResult<ScanReport> {
        let path = path.as_ref();
        let contents = read_scan_input(path)?;
        info!(path = %path.display(), "Processing scan file");
        Ok(self.process_lines(contents.lines()))
    }

    pub fn process_lines<I, S>(&mut self, lines: I) -> ScanReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CartAssembler::new(&self.backend).process_lines(&mut self.cart, lines)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Completes the sale and writes updated snapshots.
    pub fn checkout(&mut self) -> AppResult<Receipt> {
        self.checkout_at(Local::now().naive_local())
    }

    /// [`PosSession::checkout`] with coupon expiry evaluated at `now`.
    ///
    /// Stock and points are applied to a copy of the stores. The session only
    /// takes the copy once both snapshots are written, so a failed save leaves
    /// the stores and the cart as they were.
    pub fn checkout_at(&mut self, now: NaiveDateTime) -> AppResult<Receipt> {
        let totals = CartTotals::at(&self.cart, now);
        let mut next = self.backend.clone();

        for item in self.cart.items() {
            next.decrease_product_quantity(&item.barcode, 1);
        }

        let points_earned = match self.cart.membership() {
            Some(member) => {
                let points = totals.total * member.points_multiplier();
                next.add_member_points(&member.barcode, points);
                points
            }
            None => 0.0,
        };

        next.save_inventory(&self.config.output.inventory)?;
        next.save_memberships(&self.config.output.memberships)?;
        self.backend = next;

        let receipt = Receipt {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
            items: self.cart.items().iter().map(|p| p.name.clone()).collect(),
            member: totals.member,
            subtotal: totals.subtotal,
            coupon_discount: totals.coupon_discount,
            membership_discount: totals.membership_discount,
            total: totals.total,
            points_earned,
        };

        info!(
            receipt = %receipt.id,
            items = receipt.items.len(),
            total = receipt.total,
            points = receipt.points_earned,
            "Checkout complete"
        );
        self.cart.clear();
        Ok(receipt)
    }
}

// =============================================================================
// Standalone Commands
// =============================================================================

/// Classification of one line of a numeric-code file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub code: String,
    pub kind: BarcodeResult<Option<CodeKind>>,
}

/// Classifies each non-blank line of a file of numeric codes.
pub fn classify_file(path: impl AsRef<Path>) -> AppResult<Vec<ClassifiedLine>> {
    let contents = read_scan_input(path.as_ref())?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|code| ClassifiedLine {
            code: code.to_string(),
            kind: classify(code),
        })
        .collect())
}

/// Encodes each code into its 95-module symbol, failing on the first bad one.
pub fn encode_codes<S: AsRef<str>>(codes: &[S]) -> AppResult<Vec<String>> {
    codes
        .iter()
        .map(|code| encode(code.as_ref()).map_err(|e| AppError::from(CoreError::from(e))))
        .collect()
}

fn read_scan_input(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::ScanInput {
        path: PathBuf::from(path),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scanlane_core::{BarcodeError, ScanEffect, SkipReason};
    use scanlane_db::{MemberStore, ProductStore};
    use tempfile::TempDir;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
    }

    fn open_session(out: &TempDir) -> PosSession {
        let mut config = RegisterConfig::default();
        config.data.inventory = fixtures().join("db/inventory.csv");
        config.data.memberships = fixtures().join("db/memberships.csv");
        config.data.coupons = fixtures().join("db/coupons.csv");
        config.output.inventory = out.path().join("out/updated_inventory.csv");
        config.output.memberships = out.path().join("out/updated_memberships.csv");
        PosSession::open(config).unwrap()
    }

    #[test]
    fn test_end_to_end_scan_1() {
        let out = tempfile::tempdir().unwrap();
        let mut session = open_session(&out);

        let report = session
            .process_scan_file(fixtures().join("scans/scan_1_binary.txt"))
            .unwrap();
        assert_eq!(report.scanned, 4);
        assert_eq!(report.accepted, 4);
        assert_eq!(report.reversed, 1);
        assert!(report.dropped.is_empty());

        let names: Vec<&str> = session.cart().items().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Cheddar Cheese"]);
        let member = session.cart().membership().unwrap();
        assert_eq!(member.name, "John Smith");
        assert_eq!(member.tier_label(), "Gold");

        let receipt = session.checkout().unwrap();
        assert!((receipt.subtotal - 8.3).abs() < 1e-9);
        assert!((receipt.total - 0.415).abs() < 1e-6);
        assert!((receipt.points_earned - 0.6225).abs() < 1e-6);
        assert_eq!(receipt.items, vec!["Apple", "Cheddar Cheese"]);

        let config = session.config();
        assert!(config.output.inventory.exists());
        assert!(config.output.memberships.exists());

        let inventory = ProductStore::load(&config.output.inventory).unwrap();
        assert_eq!(inventory.get("040112000000").unwrap().quantity, 199);
        assert_eq!(inventory.get("073390000110").unwrap().quantity, 39);
        assert_eq!(inventory.get("012345678905").unwrap().quantity, 150);

        let members = MemberStore::load(&config.output.memberships).unwrap();
        let john = members.get("213456789010").unwrap();
        assert!((john.points - 500.6225).abs() < 1e-6);

        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_noisy_batch_scan_2() {
        let out = tempfile::tempdir().unwrap();
        let mut session = open_session(&out);

        let report = session
            .process_scan_file(fixtures().join("scans/scan_2_binary.txt"))
            .unwrap();
        assert_eq!(report.scanned, 12);
        assert_eq!(report.accepted, 9);
        assert_eq!(report.reversed, 2);

        let dropped: Vec<usize> = report.dropped.iter().map(|d| d.line).collect();
        assert_eq!(dropped, vec![10, 11, 14]);
        assert!(matches!(report.dropped[0].reason, BarcodeError::LeftGuard { .. }));
        assert_eq!(
            report.dropped[1].reason,
            BarcodeError::ChecksumMismatch {
                expected: 0,
                found: 1
            }
        );
        assert!(matches!(
            report.dropped[2].reason,
            BarcodeError::WrongLength { actual: 94, .. }
        ));

        let skips: Vec<SkipReason> = report
            .effects
            .iter()
            .filter_map(|e| match e {
                ScanEffect::Skipped { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect();
        assert_eq!(
            skips,
            vec![
                SkipReason::DuplicateCoupon,
                SkipReason::OutOfStock,
                SkipReason::QuantityCap
            ]
        );

        let cart = session.cart();
        assert_eq!(cart.coupons().len(), 2);
        assert_eq!(cart.membership().map(|m| m.name.as_str()), Some("Jane Doe"));
        let names: Vec<&str> = cart.items().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Milk"]);
        assert!((cart.subtotal() - 7.24).abs() < 1e-9);

        let receipt = session.checkout().unwrap();
        assert_eq!(receipt.total, 0.0);
        assert_eq!(receipt.points_earned, 0.0);
        assert!((receipt.coupon_discount - 7.24).abs() < 1e-9);

        let inventory = ProductStore::load(&session.config().output.inventory).unwrap();
        assert_eq!(inventory.get("098765432105").unwrap().quantity, 0);
    }

    #[test]
    fn test_failed_save_leaves_stores_untouched() {
        let out = tempfile::tempdir().unwrap();
        let mut session = open_session(&out);
        // A directory cannot be written as a file
        session.config.output.inventory = out.path().to_path_buf();

        session
            .process_scan_file(fixtures().join("scans/scan_1_binary.txt"))
            .unwrap();

        for _ in 0..2 {
            assert!(matches!(session.checkout(), Err(AppError::Store(_))));
        }

        let apple = session.backend().products().get("040112000000").unwrap();
        assert_eq!(apple.quantity, 200);
        let john = session.backend().members().get("213456789010").unwrap();
        assert_eq!(john.points, 500.0);
        assert_eq!(session.cart().item_count(), 2);

        session.config.output.inventory = out.path().join("retry/updated_inventory.csv");
        let receipt = session.checkout().unwrap();
        assert!((receipt.total - 0.415).abs() < 1e-6);
        let apple = session.backend().products().get("040112000000").unwrap();
        assert_eq!(apple.quantity, 199);
    }

    #[test]
    fn test_missing_scan_file_is_fatal() {
        let out = tempfile::tempdir().unwrap();
        let mut session = open_session(&out);
        assert!(matches!(
            session.process_scan_file(out.path().join("missing.txt")),
            Err(AppError::ScanInput { .. })
        ));
    }

    #[test]
    fn test_missing_store_fails_open() {
        let mut config = RegisterConfig::default();
        config.data.inventory = PathBuf::from("/nonexistent/inventory.csv");
        assert!(matches!(PosSession::open(config), Err(AppError::Store(_))));
    }

    #[test]
    fn test_classify_file() {
        let lines = classify_file(fixtures().join("scans/scan_1.txt")).unwrap();
        let kinds: Vec<Option<CodeKind>> = lines.iter().map(|l| l.kind.clone().unwrap()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(CodeKind::Coupon),
                Some(CodeKind::Membership),
                Some(CodeKind::Product),
                Some(CodeKind::Product)
            ]
        );
    }

    #[test]
    fn test_encode_codes() {
        let symbols = encode_codes(&["112345000017"]).unwrap();
        assert_eq!(symbols[0].len(), 95);
        assert!(matches!(encode_codes(&["12"]), Err(AppError::Core(_))));
    }
}
