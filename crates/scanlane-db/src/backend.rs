//! # Store Backend
//!
//! Bundles the three stores behind the core lookup traits and exposes the
//! mutations checkout needs.

use std::path::Path;

use scanlane_core::{Coupon, CouponLookup, Member, MemberLookup, Product, ProductLookup};

use crate::error::DbResult;
use crate::store::{CouponStore, MemberStore, ProductStore};

/// Paths to the three input files.
#[derive(Debug, Clone, Copy)]
pub struct StorePaths<'a> {
    pub inventory: &'a Path,
    pub memberships: &'a Path,
    pub coupons: &'a Path,
}

/// All entity data for one register session.
#[derive(Debug, Clone, Default)]
pub struct StoreBackend {
    products: ProductStore,
    members: MemberStore,
    coupons: CouponStore,
}

impl StoreBackend {
    pub fn new(products: ProductStore, members: MemberStore, coupons: CouponStore) -> Self {
        StoreBackend {
            products,
            members,
            coupons,
        }
    }

    /// Loads every store, failing on the first unreadable file.
    pub fn load(paths: StorePaths<'_>) -> DbResult<Self> {
        Ok(StoreBackend::new(
            ProductStore::load(paths.inventory)?,
            MemberStore::load(paths.memberships)?,
            CouponStore::load(paths.coupons)?,
        ))
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn members(&self) -> &MemberStore {
        &self.members
    }

    pub fn decrease_product_quantity(&mut self, barcode: &str, quantity: i64) {
        self.products.decrement(barcode, quantity);
    }

    pub fn add_member_points(&mut self, barcode: &str, points: f64) {
        self.members.add_points(barcode, points);
    }

    pub fn save_inventory(&self, path: impl AsRef<Path>) -> DbResult<()> {
        self.products.save(path)
    }

    pub fn save_memberships(&self, path: impl AsRef<Path>) -> DbResult<()> {
        self.members.save(path)
    }
}

impl ProductLookup for StoreBackend {
    fn get_product(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }
}

impl CouponLookup for StoreBackend {
    fn get_coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons.get(code)
    }
}

impl MemberLookup for StoreBackend {
    fn get_member(&self, code: &str) -> Option<&Member> {
        self.members.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixture;
    use scanlane_core::{Cart, CartAssembler, ScanEffect};

    fn fixture_backend() -> StoreBackend {
        let inventory = test_fixture("inventory.csv");
        let memberships = test_fixture("memberships.csv");
        let coupons = test_fixture("coupons.csv");
        StoreBackend::load(StorePaths {
            inventory: &inventory,
            memberships: &memberships,
            coupons: &coupons,
        })
        .unwrap()
    }

    #[test]
    fn test_backend_serves_lookups() {
        let backend = fixture_backend();
        assert_eq!(backend.get_product("040112000000").map(|p| p.name.as_str()), Some("Apple"));
        assert_eq!(
            backend.get_member("213456789010").map(|m| m.name.as_str()),
            Some("John Smith")
        );
        assert!(backend.get_coupon("112345000017").is_some());
        assert!(backend.get_coupon("040112000000").is_none());
    }

    #[test]
    fn test_backend_drives_assembler() {
        let backend = fixture_backend();
        let assembler = CartAssembler::new(&backend);
        let mut cart = Cart::new();

        assert!(matches!(
            assembler.apply(&mut cart, "073390000110"),
            ScanEffect::ItemAdded { .. }
        ));
        assert_eq!(cart.items()[0].name, "Cheddar Cheese");
    }

    #[test]
    fn test_backend_mutations_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = fixture_backend();

        backend.decrease_product_quantity("012345678905", 10);
        backend.add_member_points("257274767454", 100.0);
        backend.save_inventory(dir.path().join("inv.csv")).unwrap();
        backend.save_memberships(dir.path().join("mem.csv")).unwrap();

        let products = ProductStore::load(dir.path().join("inv.csv")).unwrap();
        let members = MemberStore::load(dir.path().join("mem.csv")).unwrap();
        assert_eq!(products.get("012345678905").unwrap().quantity, 140);
        assert_eq!(members.get("257274767454").unwrap().points, 1300.0);
    }
}
