// src/archive/compression.rs

//! Compression detection and decompression for uploaded archives
//!
//! insights-client compresses its collection with gzip by default, but can
//! be told to use xz or zstd instead. The format is detected from the magic
//! bytes at the start of the stream rather than from a file name, since
//! uploads arrive as anonymous byte streams.

use crate::error::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::io::Read;
use tracing::debug;
use xz2::read::XzDecoder;

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Archive compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Xz,
    Zstd,
}

impl CompressionFormat {
    /// Detect compression format from magic bytes
    pub fn detect(data: &[u8]) -> Result<Self> {
        if data.starts_with(GZIP_MAGIC) {
            Ok(Self::Gzip)
        } else if data.starts_with(XZ_MAGIC) {
            Ok(Self::Xz)
        } else if data.starts_with(ZSTD_MAGIC) {
            Ok(Self::Zstd)
        } else {
            Err(Error::Decompression(format!(
                "Unrecognized compression format ({} byte input). Expected gzip, xz, or zstd",
                data.len()
            )))
        }
    }

    /// Decompress the whole stream into memory
    ///
    /// Truncated or corrupt streams are reported as `Error::Decompression`.
    /// No size limit is applied here; callers bound the compressed input.
    pub fn decompress(self, data: &[u8]) -> Result<Vec<u8>> {
        let mut decompressed = Vec::new();

        let result = match self {
            Self::Gzip => MultiGzDecoder::new(data).read_to_end(&mut decompressed),
            Self::Xz => XzDecoder::new(data).read_to_end(&mut decompressed),
            Self::Zstd => zstd::Decoder::new(data)
                .and_then(|mut decoder| decoder.read_to_end(&mut decompressed)),
        };

        result.map_err(|e| {
            Error::Decompression(format!("Failed to decompress {} stream: {}", self, e))
        })?;

        debug!(
            "Decompressed {} stream: {} -> {} bytes",
            self,
            data.len(),
            decompressed.len()
        );
        Ok(decompressed)
    }
}

impl fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gzip => write!(f, "gzip"),
            Self::Xz => write!(f, "xz"),
            Self::Zstd => write!(f, "zstd"),
        }
    }
}
