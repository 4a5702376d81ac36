/// stockroom library
///
/// Product records, the ordered inventory store and its text file format,
/// plus the terminal session built on top of them.

pub mod cli;
pub mod config;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use config::Settings;
pub use error::{InventoryError, Result};
pub use store::{Inventory, LoadOutcome, Product};
