//! # Datasource Configuration
//!
//! Where the catalog files live.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_PRODUCTS_PATH=/srv/catalog/products.json                  │
//! │     CHECKOUT_PROMOTIONS_PATH=/srv/catalog/promotions.json              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ./checkout.toml (or the path given with --config)                  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./data/products.json, ./data/promotions.json                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! [data]
//! products = "./data/products.json"
//! promotions = "./data/promotions.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DatasourceError, DsResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "checkout.toml";

pub const PRODUCTS_PATH_ENV: &str = "CHECKOUT_PRODUCTS_PATH";
pub const PROMOTIONS_PATH_ENV: &str = "CHECKOUT_PROMOTIONS_PATH";

// =============================================================================
// Data Files
// =============================================================================

/// Catalog file locations (`[data]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFiles {
    /// JSON array of products.
    #[serde(default = "default_products_path")]
    pub products: PathBuf,

    /// JSON array of promotion definitions.
    #[serde(default = "default_promotions_path")]
    pub promotions: PathBuf,
}

fn default_products_path() -> PathBuf {
    PathBuf::from("./data/products.json")
}

fn default_promotions_path() -> PathBuf {
    PathBuf::from("./data/promotions.json")
}

impl Default for DataFiles {
    fn default() -> Self {
        DataFiles {
            products: default_products_path(),
            promotions: default_promotions_path(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete datasource configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    #[serde(default)]
    pub data: DataFiles,
}

impl DatasourceConfig {
    /// Builds a config pointing at explicit catalog files.
    pub fn new(products: impl Into<PathBuf>, promotions: impl Into<PathBuf>) -> Self {
        DatasourceConfig {
            data: DataFiles {
                products: products.into(),
                promotions: promotions.into(),
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`checkout.toml`, or `config_path`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> DsResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> DsResult<Self> {
        info!(?path, "Loading datasource config from file");
        let contents =
            std::fs::read_to_string(path).map_err(|e| DatasourceError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> DsResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`DatasourceConfig::load`]).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(PRODUCTS_PATH_ENV) {
            debug!(path = %path, "Overriding products path from environment");
            self.data.products = PathBuf::from(path);
        }

        if let Some(path) = lookup(PROMOTIONS_PATH_ENV) {
            debug!(path = %path, "Overriding promotions path from environment");
            self.data.promotions = PathBuf::from(path);
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DsResult<()> {
        if self.data.products.as_os_str().is_empty() {
            return Err(DatasourceError::Config(
                "products path must not be empty".into(),
            ));
        }

        if self.data.promotions.as_os_str().is_empty() {
            return Err(DatasourceError::Config(
                "promotions path must not be empty".into(),
            ));
        }

        Ok(())
    }

    pub fn products_path(&self) -> &Path {
        &self.data.products
    }

    pub fn promotions_path(&self) -> &Path {
        &self.data.promotions
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DatasourceConfig::default();
        assert_eq!(config.products_path(), Path::new("./data/products.json"));
        assert_eq!(config.promotions_path(), Path::new("./data/promotions.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [data]
            products = "/srv/catalog/products.json"
            promotions = "/srv/catalog/promotions.json"
        "#;

        let config = DatasourceConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.products_path(), Path::new("/srv/catalog/products.json"));
        assert_eq!(config.promotions_path(), Path::new("/srv/catalog/promotions.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DatasourceConfig::from_toml_str(
            r#"
            [data]
            promotions = "promos.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.products_path(), Path::new("./data/products.json"));
        assert_eq!(config.promotions_path(), Path::new("promos.json"));

        let empty = DatasourceConfig::from_toml_str("").unwrap();
        assert_eq!(empty, DatasourceConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = DatasourceConfig::from_toml_str("[data\nproducts = ");
        assert!(matches!(result, Err(DatasourceError::Toml(_))));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = DatasourceConfig::new("file-products.json", "file-promotions.json");
        let env: HashMap<&str, &str> = [(PRODUCTS_PATH_ENV, "env-products.json")].into();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.products_path(), Path::new("env-products.json"));
        assert_eq!(config.promotions_path(), Path::new("file-promotions.json"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = DatasourceConfig::new("", "promotions.json");
        assert!(matches!(config.validate(), Err(DatasourceError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\nproducts = \"p.json\"\npromotions = \"q.json\"").unwrap();

        let config = DatasourceConfig::from_file(file.path()).unwrap();
        assert_eq!(config, DatasourceConfig::new("p.json", "q.json"));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = DatasourceConfig::load(Some(&path));
        assert!(matches!(result, Err(DatasourceError::Io { .. })));
    }
}
