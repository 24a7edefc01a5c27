// src/error.rs

use thiserror::Error;

/// Core error types for archive ingestion
///
/// Every variant is terminal for the ingestion that produced it. Callers
/// match on the variant to pick a diagnostic for the uploader.
#[derive(Error, Debug)]
pub enum Error {
    /// The compressed stream could not be read or decompressed
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// The decompressed data is not a well-formed tar archive
    #[error("Archive format error: {0}")]
    ArchiveFormat(String),

    /// The archive has no machine-id file
    #[error("Failed to find machine ID at {0}")]
    MissingIdentifier(String),

    /// The archive has no rpm package list
    #[error("Failed to find package list file at {0}")]
    MissingManifest(String),

    /// A manifest line is not a valid package record
    #[error("Error decoding package record on line {line} ({content:?}): {source}")]
    RecordDecode {
        /// 1-based line number within the manifest
        line: usize,
        /// The offending line, lossily decoded
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
