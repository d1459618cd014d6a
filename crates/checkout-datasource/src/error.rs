//! # Datasource Error Types
//!
//! Error types for catalog loading and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / serde_json / toml errors                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DatasourceError (this module) ← Adds the offending path               │
//! │       ▲                                                                 │
//! │       │ #[from]                                                         │
//! │  CoreError (checkout-core) ← Invalid products, registry conflicts      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use checkout_core::CoreError;
use thiserror::Error;

/// Catalog and configuration errors.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// A file could not be read.
    ///
    /// ## When This Occurs
    /// - Products or promotions file missing
    /// - Explicit config file missing
    /// - File permissions issue
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid JSON, or has the wrong top-level shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The config file is not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Domain error raised while building the catalog.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DatasourceError {
    /// Creates an Io error for a given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasourceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for datasource operations.
pub type DsResult<T> = Result<T, DatasourceError>;
