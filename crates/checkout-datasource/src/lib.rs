//! # checkout-datasource: Catalog & Basket Store
//!
//! Loads the product/promotion catalog from JSON files and keeps baskets in a
//! concurrent in-memory registry, exposing both through
//! [`checkout_core::CheckoutStore`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Data Flow                               │
//! │                                                                         │
//! │  CheckoutService::get_basket_price(id)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                checkout-datasource (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ InMemory      │    │   Catalog     │    │   Basket     │  │   │
//! │  │   │ Datasource    │───►│ (Arc, frozen) │    │   Registry   │  │   │
//! │  │   │               │───────────────────────►│ (RwLock map) │  │   │
//! │  │   └───────────────┘    └───────▲───────┘    └──────────────┘  │   │
//! │  │                                │ startup                        │   │
//! │  │                   config ──► parser ──► products/promotions     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   data/products.json, data/promotions.json, checkout.toml      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - TOML + environment configuration
//! - [`parser`] - Promotion JSON parsing
//! - [`catalog`] - Product and promotion lookup
//! - [`registry`] - Concurrent basket map
//! - [`datasource`] - `CheckoutStore` implementation
//! - [`error`] - Datasource error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::CheckoutService;
//! use checkout_datasource::{DatasourceConfig, InMemoryDatasource};
//!
//! let config = DatasourceConfig::load(None)?;
//! let service = CheckoutService::new(InMemoryDatasource::load(&config)?);
//!
//! let basket = service.create_basket()?;
//! service.add_product_to_basket(&basket, "PEN")?;
//! println!("{}", service.get_basket_price(&basket)?);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod datasource;
pub mod error;
pub mod parser;
pub mod registry;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use config::DatasourceConfig;
pub use datasource::InMemoryDatasource;
pub use error::{DatasourceError, DsResult};
pub use parser::parse_promotion;
pub use registry::BasketRegistry;
