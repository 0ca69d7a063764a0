//! Integration tests for the cask blob store

mod concurrency;
mod test_utils;
