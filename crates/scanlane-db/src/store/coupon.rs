//! # Coupon Store
//!
//! Read-only coupon records keyed by barcode.
//!
//! ```text
//! numeric_barcode,expiration_date,discount_type,discount,min_purchase,description
//! 149234073227,2099-12-31,percent,10,20.0,10% off orders over 20
//! ```
//!
//! `discount_type` is `fixed` or `percent` in any case. Rows with any other
//! type are skipped with a warning. The description is the last column and
//! may itself contain commas.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use scanlane_core::{Coupon, CouponKind, CouponLookup};
use tracing::{info, warn};

use super::table::{read_file, rows};
use crate::error::{DbError, DbResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DESCRIPTION_COLUMN: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct CouponStore {
    coupons: HashMap<String, Coupon>,
}

impl CouponStore {
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let contents = read_file(path)?;

        let mut store = CouponStore::default();
        for row in rows(path, &contents) {
            let value = row.parse::<f64>(3, "discount")?;
            let kind = match CouponKind::parse(row.field(2, "discount_type")?, value) {
                Ok(kind) => kind,
                Err(e) => {
                    warn!(path = %path.display(), line = row.line, error = %e, "Skipping coupon row");
                    continue;
                }
            };

            let raw_date = row.field(1, "expiration_date")?;
            let expires_on = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
                DbError::parse(path, row.line, format!("bad expiration_date '{raw_date}': {e}"))
            })?;

            row.field(DESCRIPTION_COLUMN, "description")?;
            let description = row.rest(DESCRIPTION_COLUMN).join(",");

            let coupon = Coupon::new(
                row.field(0, "numeric_barcode")?,
                expires_on,
                row.parse::<f64>(4, "min_purchase")?,
                description,
                kind,
            );
            store.coupons.insert(coupon.barcode.clone(), coupon);
        }

        info!(path = %path.display(), count = store.len(), "Loaded coupons");
        Ok(store)
    }

    pub fn get(&self, barcode: &str) -> Option<&Coupon> {
        self.coupons.get(barcode)
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl CouponLookup for CouponStore {
    fn get_coupon(&self, code: &str) -> Option<&Coupon> {
        self.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixture;

    #[test]
    fn test_load_fixture_coupons() {
        let store = CouponStore::load(test_fixture("coupons.csv")).unwrap();
        let coupon = store.get("149234073227").unwrap();
        assert_eq!(coupon.kind, CouponKind::Percent(10.0));
        assert_eq!(coupon.min_purchase, 20.0);
        assert_eq!(coupon.description, "10% off orders over 20");

        let fixed = store.get("112345000017").unwrap();
        assert_eq!(fixed.kind, CouponKind::Fixed(7.47));
        assert_eq!(fixed.expires_on, NaiveDate::from_ymd_opt(2099, 12, 31).unwrap());
    }

    #[test]
    fn test_unknown_type_skipped_and_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coupons.csv");
        std::fs::write(
            &path,
            "numeric_barcode,expiration_date,discount_type,discount,min_purchase,description\n\
             112345000017,2099-01-01,BOGO,1,0,nope\n\
             149234073227,2099-01-01,Fixed,2.5,0,2.50 off, any order\n",
        )
        .unwrap();

        let store = CouponStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        let coupon = store.get("149234073227").unwrap();
        assert_eq!(coupon.kind, CouponKind::Fixed(2.5));
        assert_eq!(coupon.description, "2.50 off,any order");
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coupons.csv");
        std::fs::write(
            &path,
            "numeric_barcode,expiration_date,discount_type,discount,min_purchase,description\n\
             112345000017,31/12/2099,fixed,1,0,desc\n",
        )
        .unwrap();

        assert!(matches!(
            CouponStore::load(&path),
            Err(DbError::Parse { line: 2, .. })
        ));
    }
}
