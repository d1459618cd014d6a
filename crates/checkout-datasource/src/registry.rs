//! # Basket Registry
//!
//! Concurrent `id → Arc<Basket>` map.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RwLock<HashMap<String, Arc<Basket>>>                                   │
//! │                                                                         │
//! │  get     ── read lock ──► clone Arc ──► release                         │
//! │  insert  ── write lock ─► reject occupied id (PrimaryKey)               │
//! │  remove  ── write lock ─► drop entry if present                         │
//! │                                                                         │
//! │  Each Basket carries its own lock: the registry lock is never held     │
//! │  while a basket is being mutated or priced.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use checkout_core::{Basket, CoreError, CoreResult};
use tracing::debug;

#[derive(Debug, Default)]
pub struct BasketRegistry {
    baskets: RwLock<HashMap<String, Arc<Basket>>>,
}

impl BasketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `BasketNotFound`.
    pub fn get(&self, id: &str) -> CoreResult<Arc<Basket>> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::BasketNotFound(id.to_string()))
    }

    /// Registers a fully built basket. Fails with `PrimaryKey` if the id is taken.
    pub fn insert(&self, basket: Basket) -> CoreResult<Arc<Basket>> {
        let mut baskets = self.write();
        if baskets.contains_key(basket.id()) {
            return Err(CoreError::PrimaryKey(basket.id().to_string()));
        }

        let basket = Arc::new(basket);
        baskets.insert(basket.id().to_string(), Arc::clone(&basket));

        debug!(basket_id = %basket.id(), baskets = baskets.len(), "Basket registered");
        Ok(basket)
    }

    /// Removes a basket, returning it if it was registered.
    pub fn remove(&self, id: &str) -> Option<Arc<Basket>> {
        let mut baskets = self.write();
        let removed = baskets.remove(id);

        if removed.is_some() {
            debug!(basket_id = id, baskets = baskets.len(), "Basket removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Insert and remove are single map operations; a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Basket>>> {
        self.baskets.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Basket>>> {
        self.baskets.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
