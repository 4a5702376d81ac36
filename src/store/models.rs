/// Data model for inventory entries
///
/// A product is one line of the inventory file: `id,name,price,quantity`.

use crate::error::{DecodeError, InventoryError, Result};
use serde::Serialize;
use std::str::FromStr;

/// Field separator in the inventory file
pub const DELIMITER: char = ',';

const FIELD_COUNT: usize = 4;

/// One product entry
///
/// Fields are private. Once a product sits in an `Inventory` the only way to
/// change it is through the inventory's validated operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: i64,
    name: String,
    price: f64,
    quantity: i64,
}

impl Product {
    /// Build a product, checking the field invariants
    ///
    /// # Returns
    /// * `Ok(Product)` - All fields valid
    /// * `Err(InventoryError::InvalidField)` - Empty name, negative or
    ///   non-finite price, or negative quantity
    pub fn new(id: i64, name: impl Into<String>, price: f64, quantity: i64) -> Result<Self> {
        let name = name.into();
        validate_fields(&name, price, quantity)
            .map_err(|(field, reason)| InventoryError::invalid(field, reason))?;

        Ok(Self {
            id,
            name,
            price,
            quantity,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Only the inventory may call this, after validating `quantity`
    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Encode as a single line, without the line terminator
    ///
    /// Names are written verbatim. A name containing the delimiter will not
    /// decode back to the same product.
    pub fn encode(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.id,
            self.name,
            self.price,
            self.quantity,
            d = DELIMITER
        )
    }

    /// Decode one line of the inventory file
    ///
    /// Splits on the first three delimiters. Numeric fields may carry
    /// surrounding whitespace; a trailing `\r` is dropped.
    pub fn decode(line: &str) -> std::result::Result<Self, DecodeError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, DELIMITER).collect();

        if fields.len() < FIELD_COUNT {
            return Err(DecodeError::MissingFields(fields.len()));
        }

        let id = fields[0]
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::BadId(fields[0].to_string()))?;
        let name = fields[1].to_string();
        let price = fields[2]
            .trim()
            .parse::<f64>()
            .map_err(|_| DecodeError::BadPrice(fields[2].to_string()))?;
        let quantity = fields[3]
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeError::BadQuantity(fields[3].to_string()))?;

        validate_fields(&name, price, quantity)
            .map_err(|(field, reason)| DecodeError::InvalidRecord { field, reason })?;

        Ok(Self {
            id,
            name,
            price,
            quantity,
        })
    }
}

/// Parse one inventory line, reporting failure as `InventoryError::Decode`
impl FromStr for Product {
    type Err = InventoryError;

    fn from_str(line: &str) -> Result<Self> {
        Ok(Self::decode(line)?)
    }
}

/// Check the product invariant; returns the offending field and why
fn validate_fields(
    name: &str,
    price: f64,
    quantity: i64,
) -> std::result::Result<(), (&'static str, String)> {
    if name.trim().is_empty() {
        return Err(("name", "cannot be empty".to_string()));
    }
    if !price.is_finite() {
        return Err(("price", format!("{} is not a valid amount", price)));
    }
    if price < 0.0 {
        return Err(("price", "cannot be negative".to_string()));
    }
    validate_quantity(quantity).map_err(|reason| ("quantity", reason))
}

pub(crate) fn validate_quantity(quantity: i64) -> std::result::Result<(), String> {
    if quantity < 0 {
        return Err("cannot be negative".to_string());
    }
    Ok(())
}
