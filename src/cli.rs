//! CLI domain: parse, route, and presentation only.
//!
//! No storage logic lives here; commands dispatch to [`BlobStore`] and
//! format its results. The store root comes from `--store`, else the
//! `CASK_STORE__ROOT` environment variable or `cask.toml` via the
//! configuration layer.

use crate::config::CaskConfig;
use crate::error::CliError;
use crate::store::BlobStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Cask CLI - content-addressed blob store
#[derive(Parser)]
#[command(name = "cask")]
#[command(about = "Content-addressed blob store with deduplicated, crash-safe writes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store root directory (overrides config file and environment)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a file into the store and print its digest
    Store {
        /// Source file to ingest
        file: PathBuf,
    },
    /// Check whether a blob with the given digest is present
    Exists {
        /// 64-character lowercase hex digest
        digest: String,
    },
    /// Recompute a stored blob's digest and compare it to the given one
    Verify {
        /// 64-character lowercase hex digest
        digest: String,
    },
    /// Print the canonical blob path for a digest
    Path {
        /// 64-character lowercase hex digest
        digest: String,
    },
}

/// Execution context binding a parsed command line to a blob store.
pub struct RunContext {
    store: BlobStore,
}

impl RunContext {
    /// Resolve the store root (flag > environment/config file > default) and
    /// build the context.
    pub fn new(store_flag: Option<PathBuf>, config: &CaskConfig) -> Self {
        let root = store_flag.unwrap_or_else(|| config.store.root.clone());
        Self {
            store: BlobStore::new(root),
        }
    }

    /// The blob store this context operates on.
    pub fn store(&self) -> &BlobStore {
        &self.store
    }

    /// Execute a command, returning the line to print on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Store { file } => {
                let digest = self.store.store(file)?;
                info!(digest = %digest, file = %file.display(), "stored");
                Ok(digest.to_string())
            }
            Commands::Exists { digest } => {
                let present = self.store.exists(digest)?;
                Ok(present.to_string())
            }
            Commands::Verify { digest } => {
                if !self.store.exists(digest)? {
                    return Ok("missing".to_string());
                }
                let ok = self.store.verify(digest)?;
                Ok(if ok { "ok" } else { "mismatch" }.to_string())
            }
            Commands::Path { digest } => {
                let path = self.store.blob_path(digest)?;
                Ok(path.display().to_string())
            }
        }
    }
}

/// Map an error to the single line printed on stderr.
pub fn map_error(err: &CliError) -> String {
    format!("error: {}", err)
}
