//! Cask: Content-Addressed Blob Store
//!
//! A local directory structure storing immutable files keyed by the SHA-256
//! digest of their contents, with deduplicated writes, atomic publication,
//! and read-time integrity verification.
//!
//! Digest collisions are treated as out of scope: distinct contents hashing
//! to the same digest would be stored once, per standard content-addressing
//! assumptions.

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod store;

pub use digest::Digest;
pub use error::{CliError, StoreError};
pub use store::BlobStore;
