//! # Notes Cache
//!
//! This crate provides the process-lifetime memo used by the notes pipeline
//! to avoid repeating external calls: fetched transcripts keyed by video id
//! and translations keyed by the exact source text.
//!
//! Entries are never evicted. The store lives as long as its owner and is
//! empty again after a process restart.

mod store;

pub use store::memory::MemoryStore;
pub use store::{CacheStore, Namespace};
