//! # Product Store
//!
//! Inventory records keyed by barcode.
//!
//! ```text
//! numeric_barcode,name,price,quantity
//! 012345678905,Milk,2.99,150
//! ```

use std::collections::HashMap;
use std::path::Path;

use scanlane_core::{Product, ProductLookup};
use tracing::{debug, info};

use super::table::{read_file, rows, write_file};
use crate::error::DbResult;

const HEADER: &str = "numeric_barcode,name,price,quantity";

/// In-memory inventory. File order is kept for saving.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductStore {
    /// Loads the inventory file.
    ///
    /// A later row with an already-seen barcode replaces the earlier one.
    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let contents = read_file(path)?;

        let mut store = ProductStore::default();
        for row in rows(path, &contents) {
            let product = Product::new(
                row.field(0, "numeric_barcode")?,
                row.field(1, "name")?,
                row.parse::<f64>(2, "price")?,
                row.parse::<i64>(3, "quantity")?,
            );
            store.insert(product);
        }

        info!(path = %path.display(), count = store.len(), "Loaded inventory");
        Ok(store)
    }

    /// Adds or replaces a product.
    pub fn insert(&mut self, product: Product) {
        match self.index.get(&product.barcode) {
            Some(&i) => self.products[i] = product,
            None => {
                self.index.insert(product.barcode.clone(), self.products.len());
                self.products.push(product);
            }
        }
    }

    pub fn get(&self, barcode: &str) -> Option<&Product> {
        self.index.get(barcode).map(|&i| &self.products[i])
    }

    /// Lowers a product's quantity. Unknown barcodes are ignored.
    pub fn decrement(&mut self, barcode: &str, quantity: i64) {
        match self.index.get(barcode) {
            Some(&i) => {
                let product = &mut self.products[i];
                product.decrease_quantity(quantity);
                debug!(barcode, remaining = product.quantity, "Decremented stock");
            }
            None => debug!(barcode, "Decrement on unknown product ignored"),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Writes the inventory with the same header it was loaded with.
    pub fn save(&self, path: impl AsRef<Path>) -> DbResult<()> {
        let path = path.as_ref();
        write_file(
            path,
            HEADER,
            self.products
                .iter()
                .map(|p| format!("{},{},{},{}", p.barcode, p.name, p.price, p.quantity)),
        )?;
        info!(path = %path.display(), count = self.len(), "Saved inventory");
        Ok(())
    }
}

impl ProductLookup for ProductStore {
    fn get_product(&self, code: &str) -> Option<&Product> {
        self.get(code)
    }
}
