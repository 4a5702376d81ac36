/// Runtime settings
///
/// Layered with the `config` crate: built-in defaults, an optional
/// `stockroom.toml` in the working directory, `STOCKROOM_*` environment
/// variables, then command-line overrides.

use crate::error::{InventoryError, Result};
use crate::store::DEFAULT_LOW_STOCK_THRESHOLD;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

/// Default inventory file, relative to the working directory
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

const CONFIG_FILE: &str = "stockroom";
const ENV_PREFIX: &str = "STOCKROOM";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Inventory file to load at startup and save on exit
    pub file: PathBuf,
    /// Products with fewer units than this are reported as low stock
    pub low_stock_threshold: i64,
}

impl Settings {
    /// Resolve settings from every source
    ///
    /// `file_override` comes from the `--file` flag and wins over everything.
    pub fn load(file_override: Option<&str>) -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::resolve(builder, file_override)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("file", DEFAULT_INVENTORY_FILE)?
            .set_default("low_stock_threshold", DEFAULT_LOW_STOCK_THRESHOLD)?)
    }

    /// Apply the command-line override on top of `builder` and validate
    fn resolve(builder: ConfigBuilder<DefaultState>, file_override: Option<&str>) -> Result<Self> {
        let settings: Settings = builder
            .set_override_option("file", file_override)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.low_stock_threshold < 0 {
            return Err(InventoryError::Config(config::ConfigError::Message(format!(
                "low_stock_threshold must not be negative (got {})",
                self.low_stock_threshold
            ))));
        }
        if self.file.as_os_str().is_empty() {
            return Err(InventoryError::Config(config::ConfigError::Message(
                "inventory file path is empty".to_string(),
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_INVENTORY_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    // Only defaults plus an inline TOML layer, so the host environment can't leak in
    fn resolve_with(toml: &str, file_override: Option<&str>) -> Result<Settings> {
        let builder = Settings::defaults()
            .unwrap()
            .add_source(config::File::from_str(toml, FileFormat::Toml));
        Settings::resolve(builder, file_override)
    }

    #[test]
    fn test_builtin_defaults() {
        let settings = resolve_with("", None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_override_wins() {
        let settings = resolve_with(
            "file = \"from-toml.txt\"\nlow_stock_threshold = 2",
            Some("/tmp/custom-stock.txt"),
        )
        .unwrap();

        assert_eq!(settings.file, PathBuf::from("/tmp/custom-stock.txt"));
        assert_eq!(settings.low_stock_threshold, 2);
    }

    #[test]
    fn test_layered_negative_threshold_rejected() {
        let result = resolve_with("low_stock_threshold = -1", None);
        assert!(matches!(result, Err(InventoryError::Config(_))));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.file, PathBuf::from("inventory.txt"));
        assert_eq!(settings.low_stock_threshold, 5);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let settings = Settings {
            low_stock_threshold: -1,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(InventoryError::Config(_))));
    }

    #[test]
    fn test_empty_file_rejected() {
        let settings = Settings {
            file: PathBuf::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
