// src/catalog/mod.rs

//! In-memory catalog of ingested systems
//!
//! The catalog lives for the lifetime of the process. It is created once at
//! startup and shared by handle between the ingestion path and the listing
//! path. Entries are immutable once appended and are never removed.

pub mod models;

pub use models::{Component, SystemComponentList, SystemComponents};

use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Append-only store of `SystemComponents` entries
///
/// A single lock covers the backing vector. Appends hold the write lock only
/// for the push; snapshots hold the read lock only for the clone.
#[derive(Debug, Default)]
pub struct CatalogStore {
    systems: RwLock<Vec<SystemComponents>>,
}

impl CatalogStore {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the end of the catalog
    pub fn append(&self, entry: SystemComponents) {
        // A panic while holding the lock cannot leave a half-pushed entry,
        // so a poisoned lock is still safe to use.
        let mut systems = self.systems.write().unwrap_or_else(PoisonError::into_inner);
        systems.push(entry);
        debug!("Catalog now holds {} systems", systems.len());
    }

    /// Copy of every entry appended so far, in append order
    pub fn snapshot(&self) -> SystemComponentList {
        let systems = self.systems.read().unwrap_or_else(PoisonError::into_inner);
        SystemComponentList {
            systems: systems.clone(),
        }
    }

    /// Number of systems appended so far
    pub fn len(&self) -> usize {
        self.systems.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been ingested yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
