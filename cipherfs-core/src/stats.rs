//! Operation statistics collection.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic per-operation counters for a filesystem instance.
///
/// Counters are advisory diagnostics; they are updated with relaxed ordering
/// and never influence operation behavior.
#[derive(Debug, Default)]
pub struct FsStats {
    attr_queries: AtomicU64,
    listings: AtomicU64,
    reads: AtomicU64,
    writes: AtomicU64,
    creates: AtomicU64,
    not_found: AtomicU64,
    bytes_read: AtomicU64,
    bytes_written: AtomicU64,
}

impl FsStats {
    pub(crate) fn record_attr_query(&self) {
        self.attr_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_listing(&self) {
        self.listings.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_read(&self, bytes: usize) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self, bytes: usize) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_create(&self) {
        self.creates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attr_queries: self.attr_queries.load(Ordering::Relaxed),
            listings: self.listings.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            creates: self.creates.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the operation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Attribute queries served
    pub attr_queries: u64,
    /// Directory listings served
    pub listings: u64,
    /// Read calls served
    pub reads: u64,
    /// Write calls served
    pub writes: u64,
    /// Entries created
    pub creates: u64,
    /// Lookups that resolved to nothing
    pub not_found: u64,
    /// Total plaintext bytes returned by reads
    pub bytes_read: u64,
    /// Total plaintext bytes accepted by writes
    pub bytes_written: u64,
}
