//! Blob storage implementation
//!
//! Provides content-addressed storage for immutable blobs using the
//! filesystem. Blobs are stored at paths derived from the SHA-256 digest of
//! their content: `{root}/blobs/{hex[0..3]}/{hex[3..64]}`.
//!
//! This structure:
//! - Enables content-addressed lookup and deduplication (same digest = same path)
//! - Prevents directory bloat (distributes blobs across shard directories)
//! - Makes publication atomic: a blob is staged under a private random name
//!   in `{root}/partial/` and hard-linked into place, so readers observe
//!   either no blob or a complete one, never a partial write
//!
//! The store holds no in-process locks. Concurrent writers racing on the
//! same content converge: exactly one hard link succeeds and the other
//! treats "already exists" as success. This relies on `partial/` and
//! `blobs/` sharing a filesystem volume.

use crate::digest::Digest;
use crate::error::StoreError;
use rand::RngCore;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Number of random bytes in a staging filename (hex-encoded to 32 chars).
const STAGING_TOKEN_BYTES: usize = 16;

/// Content-addressed blob store rooted at a single directory.
///
/// State-free beyond the configured root path; the filesystem itself is the
/// shared resource. Published blobs are never modified or deleted.
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store handle rooted at the given directory.
    ///
    /// No filesystem state is created until the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root path of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding published blobs.
    pub fn blob_dir(&self) -> PathBuf {
        self.root.join("blobs")
    }

    /// Staging directory for in-flight writes.
    pub fn partial_dir(&self) -> PathBuf {
        self.root.join("partial")
    }

    /// Canonical path for a digest string.
    ///
    /// Validates the digest before deriving any path; malformed input fails
    /// with [`StoreError::InvalidDigestFormat`] and touches no filesystem
    /// state.
    pub fn blob_path(&self, digest: &str) -> Result<PathBuf, StoreError> {
        let digest: Digest = digest.parse()?;
        Ok(self.blob_path_for(&digest))
    }

    /// True iff a regular file exists at the digest's canonical path.
    ///
    /// Never reads blob content.
    pub fn exists(&self, digest: &str) -> Result<bool, StoreError> {
        Ok(self.blob_path(digest)?.is_file())
    }

    /// Recompute the stored blob's digest and compare.
    ///
    /// Returns false if the blob is absent or its content no longer hashes
    /// to `digest` (bit-rot, external tampering). O(file size); intended as
    /// an audit operation, not a hot-path check.
    pub fn verify(&self, digest: &str) -> Result<bool, StoreError> {
        let digest: Digest = digest.parse()?;
        let path = self.blob_path_for(&digest);
        if !path.is_file() {
            return Ok(false);
        }
        let observed = Digest::compute(&path)?;
        Ok(observed == digest)
    }

    /// Ingest a source file, returning its digest as the content handle.
    ///
    /// If a blob with the same digest is already published this is a no-op
    /// (deduplication). Otherwise the content is copied to a private staging
    /// file, made read-only, and published with a single atomic hard link.
    /// The staging file is removed on every exit path. A concurrent writer
    /// publishing identical content first is treated as success.
    pub fn store(&self, src: &Path) -> Result<Digest, StoreError> {
        let digest = Digest::compute(src)?;
        let blob_path = self.blob_path_for(&digest);

        if blob_path.is_file() {
            debug!(digest = %digest, "blob already stored, skipping write");
            return Ok(digest);
        }

        if let Some(parent) = blob_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let staging = StagingFile::create(&self.partial_dir())?;

        // Content only; source permissions and timestamps are not carried
        // into the store.
        let mut reader = fs::File::open(src)?;
        let mut writer = OpenOptions::new().write(true).open(staging.path())?;
        io::copy(&mut reader, &mut writer)?;
        drop(writer);

        let mut perms = fs::metadata(staging.path())?.permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            perms.set_mode(0o444);
        }
        #[cfg(not(unix))]
        perms.set_readonly(true);
        fs::set_permissions(staging.path(), perms)?;

        // The hard link is the atomic-visibility boundary. "Already exists"
        // means another writer durably published identical content first.
        match fs::hard_link(staging.path(), &blob_path) {
            Ok(()) => {
                debug!(digest = %digest, path = %blob_path.display(), "blob published");
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(digest = %digest, "lost publish race, blob already present");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(digest)
    }

    /// Garbage collection is not provided by this store.
    pub fn clean(&self) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("clean"))
    }

    fn blob_path_for(&self, digest: &Digest) -> PathBuf {
        let (prefix, rest) = digest.split();
        self.blob_dir().join(prefix).join(rest)
    }
}

/// Scoped staging slot inside the partial directory.
///
/// Holds a freshly created, randomly named file; dropping the guard removes
/// the file, so staging state never outlives the write that created it, even
/// on error or panic. Removing the staging path after a successful hard link
/// only drops one of the two links; the published blob remains.
struct StagingFile {
    path: PathBuf,
}

impl StagingFile {
    fn create(partial_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(partial_dir)?;
        loop {
            let mut token = [0u8; STAGING_TOKEN_BYTES];
            rand::thread_rng().fill_bytes(&mut token);
            let path = partial_dir.join(hex::encode(token));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove staging file");
        }
    }
}
