/// Error types for stockroom
///
/// Every store operation reports failure as a value. Nothing in here is
/// fatal to the process; the CLI turns each variant into a message.

use thiserror::Error;

/// Why a single line of the inventory file could not be turned into a product
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Fewer than four delimiter-separated fields
    #[error("expected 4 fields, found {0}")]
    MissingFields(usize),

    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("id is not an integer: {0:?}")]
    BadId(String),

    #[error("price is not a number: {0:?}")]
    BadPrice(String),

    #[error("quantity is not an integer: {0:?}")]
    BadQuantity(String),

    /// Parsed fine, but the values break the product invariant
    #[error("invalid {field}: {reason}")]
    InvalidRecord { field: &'static str, reason: String },
}

/// Main error type for stockroom operations
#[derive(Error, Debug)]
pub enum InventoryError {
    /// A product with this id is already stored
    #[error("Duplicate product id: {0}")]
    DuplicateId(i64),

    /// Empty name, negative price or negative quantity
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// No product with this id
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// Malformed persisted line
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O errors (reading or writing the inventory file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for stockroom operations
pub type Result<T> = std::result::Result<T, InventoryError>;

impl InventoryError {
    /// Shorthand used by the validators
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        InventoryError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Convert an error into the message shown at the prompt
    pub fn user_message(&self) -> String {
        match self {
            InventoryError::DuplicateId(id) => {
                format!("Product with ID {} already exists!", id)
            }
            InventoryError::InvalidField { field, reason } => {
                format!("Invalid {}: {}", field, reason)
            }
            InventoryError::NotFound(id) => {
                format!("Product with ID {} not found!", id)
            }
            InventoryError::Decode(e) => {
                format!("Could not read inventory entry: {}", e)
            }
            InventoryError::Io(e) => {
                format!("Unable to access inventory file. Check permissions. Details: {}", e)
            }
            InventoryError::Config(e) => {
                format!("Configuration issue: {}", e)
            }
            InventoryError::Json(e) => {
                format!("Data format error: {}", e)
            }
        }
    }
}
