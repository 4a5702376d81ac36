/// Inventory store
///
/// The ordered product list, its text encoding, and file persistence.

pub mod inventory;
pub mod models;
pub mod queries;

pub use inventory::{Inventory, LoadOutcome, LoadSummary};
pub use models::Product;
pub use queries::DEFAULT_LOW_STOCK_THRESHOLD;
