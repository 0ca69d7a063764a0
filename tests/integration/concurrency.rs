//! Concurrent-writer convergence and atomic visibility

use super::test_utils::{partial_entries, write_source};
use cask::BlobStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

/// Writers racing to store identical content all succeed with the same
/// digest; exactly one publication wins and the rest converge on it.
#[test]
fn test_racing_identical_stores_converge() {
    let src_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let root = store_dir.path().to_path_buf();

    let content = vec![0x5a_u8; 256 * 1024];
    let sources: Vec<_> = (0..8)
        .map(|i| write_source(src_dir.path(), &format!("src-{}", i), &content))
        .collect();

    let handles: Vec<_> = sources
        .into_iter()
        .map(|src| {
            let root = root.clone();
            thread::spawn(move || BlobStore::new(root).store(&src).unwrap())
        })
        .collect();

    let digests: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(digests.windows(2).all(|w| w[0] == w[1]));

    let store = BlobStore::new(&root);
    assert!(store.verify(digests[0].as_str()).unwrap());
    assert!(partial_entries(&root).is_empty());
}

/// A reader polling exists() during a concurrent store never observes a
/// partially written blob: as soon as the digest exists, it verifies.
#[test]
fn test_reader_never_sees_partial_blob() {
    let src_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let root = store_dir.path().to_path_buf();

    let content = vec![0xc3_u8; 4 * 1024 * 1024];
    let src = write_source(src_dir.path(), "large.bin", &content);
    let digest = cask::Digest::compute(&src).unwrap();

    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let root = root.clone();
        let done = done.clone();
        thread::spawn(move || {
            let result = BlobStore::new(root).store(&src);
            done.store(true, Ordering::SeqCst);
            result.unwrap()
        })
    };

    let reader = {
        let root = root.clone();
        let done = done.clone();
        let digest = digest.clone();
        thread::spawn(move || {
            let store = BlobStore::new(root);
            loop {
                if store.exists(digest.as_str()).unwrap() {
                    // Visible implies complete.
                    assert!(store.verify(digest.as_str()).unwrap());
                    break;
                }
                if done.load(Ordering::SeqCst) {
                    break;
                }
                thread::yield_now();
            }
        })
    };

    let stored = writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(stored, digest);
    let store = BlobStore::new(&root);
    assert!(store.exists(digest.as_str()).unwrap());
}
