// src/ingest.rs

//! Archive ingestion
//!
//! Runs an uploaded archive through extraction and manifest parsing, then
//! appends the resulting entry to the catalog. Either the whole ingestion
//! succeeds and exactly one entry is appended, or it fails and the catalog
//! is untouched.

use crate::archive;
use crate::catalog::CatalogStore;
use crate::error::Result;
use crate::manifest;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

/// Feeds uploaded archives into a shared catalog
#[derive(Debug, Clone)]
pub struct Ingestor {
    catalog: Arc<CatalogStore>,
}

impl Ingestor {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// The catalog this ingestor appends to
    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Ingest one compressed archive
    ///
    /// Errors are returned exactly as extraction or parsing produced them,
    /// so callers can tell a corrupt upload from an incomplete collection.
    pub fn ingest<R: Read>(&self, reader: R) -> Result<()> {
        let files = archive::extract(reader)?;
        let file_count = files.len();

        let entry = manifest::parse(&files)?;
        drop(files);

        info!(
            system_id = %entry.system_id.trim_end(),
            components = entry.components.len(),
            files = file_count,
            "Ingested system archive"
        );

        self.catalog.append(entry);
        Ok(())
    }
}
