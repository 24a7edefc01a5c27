// src/server/mod.rs

//! HTTP front end for the ingestion pipeline
//!
//! - `POST /upload` and `POST /upload/:machineid` accept a multipart form
//!   whose `file` field carries the archive
//! - `GET /list` returns the whole catalog as JSON

mod error;

pub use error::ApiError;

use crate::catalog::{CatalogStore, SystemComponentList};
use crate::ingest::Ingestor;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Default listen address
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Default cap on the request body of an upload (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Multipart field that carries the archive
const FILE_FIELD: &str = "file";

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Clone)]
struct AppState {
    ingestor: Ingestor,
}

/// Build the router over a shared catalog
pub fn router(catalog: Arc<CatalogStore>, config: &ServerConfig) -> Router {
    let state = AppState {
        ingestor: Ingestor::new(catalog),
    };

    Router::new()
        .route("/upload", post(upload))
        .route("/upload/:machineid", post(upload))
        .route("/list", get(list))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig, catalog: Arc<CatalogStore>) -> io::Result<()> {
    let app = router(catalog, &config);
    let listener = TcpListener::bind(config.listen).await?;

    info!(
        listen = %config.listen,
        max_upload_bytes = config.max_upload_bytes,
        "Starting inventory server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

async fn upload(
    State(state): State<AppState>,
    machine_id: Option<Path<String>>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    if let Some(Path(machine_id)) = &machine_id {
        debug!(machine_id = %machine_id, "Upload addressed to machine");
    }

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?;
        debug!("Received {} ({} bytes)", file_name, data.len());

        // Decompression and parsing are CPU-bound
        let ingestor = state.ingestor.clone();
        tokio::task::spawn_blocking(move || ingestor.ingest(&data[..])).await??;

        return Ok(format!("File {} uploaded successfully!\n", file_name));
    }

    Err(ApiError::NoFile)
}

async fn list(State(state): State<AppState>) -> Json<SystemComponentList> {
    Json(state.ingestor.catalog().snapshot())
}
