/// Inventory file persistence
///
/// Loads and saves the ordered product list against a line-oriented text
/// file, one encoded product per line.

use crate::error::{DecodeError, InventoryError, Result};
use crate::store::models::Product;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str;
use tracing::{debug, info, warn};

/// Counts from a load that found a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Result of reading the inventory file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file does not exist; the in-memory list was not touched
    NoFile,
    Loaded(LoadSummary),
}

/// Ordered in-memory product list
///
/// Insertion order is iteration and display order. Product ids are unique.
#[derive(Debug, Default)]
pub struct Inventory {
    pub(crate) products: Vec<Product>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory populated from `path`
    ///
    /// # Returns
    /// * `Ok((Inventory, LoadOutcome))` - Loaded, or empty when there is no file
    /// * `Err(InventoryError::Io)` - The file exists but could not be read
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, LoadOutcome)> {
        let mut inventory = Self::new();
        let outcome = inventory.load(path)?;
        Ok((inventory, outcome))
    }

    /// Replace the in-memory list with the contents of `path`
    ///
    /// Every non-empty line is decoded on its own. Lines that fail to decode
    /// (including lines that are not valid UTF-8), or that repeat an id seen
    /// earlier in the file, are skipped and counted. When the file does not
    /// exist, or cannot be read, the current contents are left as they were.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadOutcome> {
        let path = path.as_ref();

        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No inventory file found");
                return Ok(LoadOutcome::NoFile);
            }
            Err(e) => return Err(e.into()),
        };

        let mut products = Vec::new();
        let mut seen = HashSet::new();
        let mut summary = LoadSummary::default();

        for (index, raw) in contents.split(|&b| b == b'\n').enumerate() {
            if raw.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let parsed = str::from_utf8(raw)
                .map_err(|_| InventoryError::from(DecodeError::InvalidUtf8))
                .and_then(str::parse::<Product>);

            match parsed {
                Ok(product) => {
                    // First occurrence of an id wins
                    if seen.insert(product.id()) {
                        products.push(product);
                        summary.loaded += 1;
                    } else {
                        warn!(line = index + 1, id = product.id(), "Skipping duplicate product id");
                        summary.skipped += 1;
                    }
                }
                Err(e) => {
                    warn!(line = index + 1, error = %e, "Skipping malformed inventory line");
                    summary.skipped += 1;
                }
            }
        }

        self.products = products;

        info!(
            path = %path.display(),
            loaded = summary.loaded,
            skipped = summary.skipped,
            "Inventory loaded"
        );

        Ok(LoadOutcome::Loaded(summary))
    }

    /// Write every product to `path`, one line each, in current order
    ///
    /// Truncates the file first. The write is not atomic: a crash part way
    /// through leaves a partial file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);

        for product in &self.products {
            writeln!(writer, "{}", product.encode())?;
        }
        writer.flush()?;

        debug!(path = %path.display(), count = self.products.len(), "Inventory saved");
        Ok(())
    }

    /// Pretty-printed JSON array of every product, in order
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.products)?)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
