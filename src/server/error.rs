// src/server/error.rs

//! Upload error responses

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Errors returned to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// The multipart form had no `file` field
    #[error("No files uploaded")]
    NoFile,

    /// The multipart body could not be read (malformed, or over the size limit)
    #[error("Unable to read upload: {0}")]
    Upload(#[from] MultipartError),

    /// The archive was received but could not be ingested
    #[error("Failed to ingest archive: {0}")]
    Ingest(#[from] crate::Error),

    /// The blocking ingestion task panicked or was cancelled
    #[error("Ingestion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFile => StatusCode::BAD_REQUEST,
            Self::Upload(e) => e.status(),
            Self::Ingest(e) => match e {
                crate::Error::Decompression(_) | crate::Error::ArchiveFormat(_) => {
                    StatusCode::BAD_REQUEST
                }
                crate::Error::MissingIdentifier(_)
                | crate::Error::MissingManifest(_)
                | crate::Error::RecordDecode { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), "Upload rejected: {}", self);
        (status, format!("{}\n", self)).into_response()
    }
}
