//! Runtime configuration for the filesystem core.

use serde::{Deserialize, Serialize};

/// Behavior when a write targets a path that resolves to no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritePolicy {
    /// Fail the write with a not-found error.
    Strict,
    /// Accept the write, change nothing and report the full byte count.
    ///
    /// This reproduces the silent-ignore behavior of the original driver.
    Lenient,
}

/// How write calls apply data to existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    /// Replace stored content wholesale; the supplied offset is ignored.
    ///
    /// This is the original driver's behavior: every write starts from byte
    /// zero and drops whatever was stored before.
    Replace,
    /// Honor the offset: patch in place, zero-filling any gap past the end
    /// of the current content.
    Patch,
}

/// Configuration for a CipherFS instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Maximum number of entries (directories plus files) the store will
    /// hold; exceeding it is a resource-exhaustion error
    pub max_entries: usize,

    /// Size in bytes reported for every file, independent of the actual
    /// stored content length
    pub reported_file_size: u64,

    /// Behavior for writes to unresolved paths
    pub write_policy: WritePolicy,

    /// Offset handling for writes to existing files
    pub write_mode: WriteMode,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            max_entries: 4096,
            reported_file_size: 1024,
            write_policy: WritePolicy::Strict,
            write_mode: WriteMode::Replace,
        }
    }
}
