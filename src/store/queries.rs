/// Lookup and mutation operations on the inventory
///
/// Linear scans over the ordered list. All mutation is validated here;
/// callers only ever get shared references back.

use crate::error::{InventoryError, Result};
use crate::store::models::{validate_quantity, Product};
use crate::store::Inventory;
use tracing::debug;

/// Quantity below which a product counts as low stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

impl Inventory {
    /// Add a new product at the end of the list
    ///
    /// # Returns
    /// * `Ok(())` - Product appended
    /// * `Err(InventoryError::DuplicateId)` - The id is already taken
    /// * `Err(InventoryError::InvalidField)` - Empty name, negative price or quantity
    pub fn add(&mut self, id: i64, name: &str, price: f64, quantity: i64) -> Result<()> {
        if self.find_by_id(id).is_some() {
            return Err(InventoryError::DuplicateId(id));
        }

        let product = Product::new(id, name, price, quantity)?;
        self.products.push(product);

        debug!(id, product = name, price, quantity, "Product added");
        Ok(())
    }

    /// Find a product by id
    pub fn find_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Overwrite the quantity of an existing product in place
    ///
    /// # Returns
    /// * `Ok(())` - Quantity updated
    /// * `Err(InventoryError::NotFound)` - No product with that id
    /// * `Err(InventoryError::InvalidField)` - `quantity` is negative
    pub fn update_quantity(&mut self, id: i64, quantity: i64) -> Result<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(InventoryError::NotFound(id))?;

        validate_quantity(quantity).map_err(|reason| InventoryError::invalid("quantity", reason))?;

        let previous = product.quantity();
        product.set_quantity(quantity);

        debug!(id, previous, quantity, "Quantity updated");
        Ok(())
    }

    /// All products in insertion order
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Products with `quantity < threshold`, in insertion order
    ///
    /// An empty result is not an error.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity() < threshold)
            .collect()
    }
}
