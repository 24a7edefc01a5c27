// src/archive/mod.rs

//! Archive extraction for uploaded insights collections
//!
//! An upload is a compressed tarball whose entries all live under a single
//! wrapper directory (e.g. `insights-host-20240101120000/`). Extraction
//! decompresses it, drops the wrapper component from every path, and keeps
//! the contents of each regular file in memory keyed by the stripped path.

pub mod compression;

pub use compression::CompressionFormat;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::io::Read;
use tar::Archive;
use tracing::{debug, trace};

/// Regular files extracted from one archive, keyed by root-stripped path
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: HashMap<String, Vec<u8>>,
}

impl FileSet {
    /// Create an empty file set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, replacing any earlier file stored at the same path
    pub fn insert(&mut self, path: String, content: Vec<u8>) {
        self.files.insert(path, content);
    }

    /// Get the contents of the file at `path`
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Whether a file is stored at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files stored
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the archive held no regular files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Extract every regular file from a compressed tar stream
///
/// The stream is read to completion before decompression starts, so a
/// reader that fails or ends early surfaces as `Error::Decompression`.
/// Directories, symlinks, and other non-regular entries are skipped.
pub fn extract<R: Read>(mut reader: R) -> Result<FileSet> {
    let mut compressed = Vec::new();
    reader
        .read_to_end(&mut compressed)
        .map_err(|e| Error::Decompression(format!("Failed to read archive stream: {}", e)))?;

    let format = CompressionFormat::detect(&compressed)?;
    let tarball = format.decompress(&compressed)?;

    unpack(&tarball)
}

/// Walk a decompressed tarball and collect its regular files
fn unpack(tarball: &[u8]) -> Result<FileSet> {
    let mut archive = Archive::new(tarball);
    let mut files = FileSet::new();

    for entry in archive
        .entries()
        .map_err(|e| Error::ArchiveFormat(format!("Failed to read archive entries: {}", e)))?
    {
        let mut entry =
            entry.map_err(|e| Error::ArchiveFormat(format!("Failed to read archive entry: {}", e)))?;

        let entry_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();

        if !entry.header().entry_type().is_file() {
            trace!("Skipping non-regular entry: {}", entry_path);
            continue;
        }

        let key = strip_wrapper(&entry_path)?;

        // The header size is untrusted; never reserve more than the tarball holds
        let size = entry.size();
        let capacity = size.min(tarball.len() as u64) as usize;
        let mut content = Vec::with_capacity(capacity);
        entry
            .read_to_end(&mut content)
            .map_err(|e| Error::ArchiveFormat(format!("Failed to read {}: {}", entry_path, e)))?;

        // A short read means the tarball ended inside this entry's data
        if (content.len() as u64) != size {
            return Err(Error::ArchiveFormat(format!(
                "Truncated entry {}: expected {} bytes, got {}",
                entry_path,
                size,
                content.len()
            )));
        }

        files.insert(key, content);
    }

    debug!("Extracted {} files from archive", files.len());
    Ok(files)
}

/// Drop the top-level wrapper directory from an entry path
///
/// `insights-host/etc/hostname` becomes `etc/hostname`. Entries that are not
/// inside a wrapper directory are rejected.
fn strip_wrapper(path: &str) -> Result<String> {
    match path.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => Ok(rest.to_string()),
        _ => Err(Error::ArchiveFormat(format!(
            "Entry {:?} is not inside a top-level directory",
            path
        ))),
    }
}
