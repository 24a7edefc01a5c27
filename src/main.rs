// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use insights_inventory::archive;
use insights_inventory::catalog::{CatalogStore, SystemComponents};
use insights_inventory::manifest;
use insights_inventory::server::{self, ServerConfig};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "insights-inventory")]
#[command(author, version, about = "Catalog installed packages from uploaded insights archives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the upload and listing HTTP server
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = server::DEFAULT_LISTEN)]
        listen: SocketAddr,
        /// Largest accepted upload request body, in bytes
        #[arg(short, long, default_value_t = server::DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,
    },
    /// Parse a local archive and print its catalog entry
    Inspect {
        /// Path to the insights archive (.tar.gz, .tar.xz or .tar.zst)
        archive_path: String,
        /// Print one name-epoch:version-release.arch line per package instead of JSON
        #[arg(long)]
        nevra: bool,
    },
}

/// Run extraction and manifest parsing on an archive on disk
fn inspect_archive(path: &str) -> Result<SystemComponents> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let files = archive::extract(BufReader::new(file))?;
    info!("Extracted {} files from {}", files.len(), path);
    Ok(manifest::parse(&files)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            listen,
            max_upload_bytes,
        }) => {
            let config = ServerConfig {
                listen,
                max_upload_bytes,
            };
            let catalog = Arc::new(CatalogStore::new());

            server::serve(config, catalog)
                .await
                .with_context(|| format!("Server on {} failed", listen))?;

            info!("Server stopped");
            Ok(())
        }
        Some(Commands::Inspect {
            archive_path,
            nevra,
        }) => {
            let entry = inspect_archive(&archive_path)?;

            if nevra {
                for component in &entry.components {
                    println!("{}", component.nevra());
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }

            Ok(())
        }
        None => {
            // No command provided, show help
            println!("Insights Inventory v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'insights-inventory --help' for usage information");
            Ok(())
        }
    }
}
