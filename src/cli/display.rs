// Table output for products
//
// Fixed-width columns: ID, Name, Price, Quantity. Long names push the row
// wider instead of being cut.

use crate::store::Product;
use std::io::{self, Write};

const RULE_WIDTH: usize = 45;

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<5}{:<20}{:<10}{:<10}", "ID", "Name", "Price", "Quantity")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

pub fn write_row<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "{:<5}{:<20}{:<10.2}{:<10}",
        product.id(),
        product.name(),
        product.price(),
        product.quantity()
    )
}

/// Full inventory listing with a total footer
pub fn write_inventory<W: Write>(out: &mut W, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products in inventory.");
    }

    write_header(out)?;
    for product in products {
        write_row(out, product)?;
    }
    writeln!(out, "\nTotal Products: {}", products.len())
}

/// Low stock report; the header is printed even when nothing qualifies
pub fn write_low_stock<W: Write>(out: &mut W, products: &[&Product]) -> io::Result<()> {
    write_header(out)?;
    if products.is_empty() {
        return writeln!(out, "No products with low stock.");
    }
    for product in products {
        write_row(out, product)?;
    }
    Ok(())
}

/// A single search hit
pub fn write_product<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    write_header(out)?;
    write_row(out, product)
}
