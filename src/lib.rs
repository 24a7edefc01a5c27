// src/lib.rs

//! Insights Inventory
//!
//! Collects the RPM package lists of systems that upload insights-client
//! archives, and keeps them in an in-memory catalog.
//!
//! # Architecture
//!
//! - `archive`: decompress an upload and index its regular files by path
//! - `manifest`: find the machine-id and rpm package list and decode them
//! - `catalog`: append-only, thread-safe store of ingested systems
//! - `ingest`: run one archive through the pipeline into the catalog
//! - `server`: axum routes for uploading archives and listing the catalog

pub mod archive;
pub mod catalog;
mod error;
pub mod ingest;
pub mod manifest;
pub mod server;

pub use error::{Error, Result};
