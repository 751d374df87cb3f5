//! Filesystem operation handlers.
//!
//! [`CipherFs`] composes the path resolver, the entity store and the content
//! transform into the six operations the host bridge dispatches. Every
//! handler is a single synchronous pass over the store: no call blocks on
//! I/O, retries, or retains state between invocations.

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{FsConfig, WriteMode, WritePolicy};
use crate::error::{FsError, Result};
use crate::resolve::{resolve, Resolved};
use crate::stats::{FsStats, StatsSnapshot};
use crate::store::EntityStore;
use crate::transform::{ContentTransform, Rot13};
use crate::types::{CipherPath, DirEntry, EntryKind, FileId, FileMetadata};

/// An in-memory filesystem serving content through a reversible transform.
pub struct CipherFs {
    store: EntityStore,
    transform: Box<dyn ContentTransform>,
    config: FsConfig,
    stats: Arc<FsStats>,
}

impl CipherFs {
    /// Creates a filesystem with the default ROT13 content transform.
    pub fn new(config: FsConfig) -> Self {
        Self::with_transform(config, Box::new(Rot13))
    }

    /// Creates a filesystem with a caller-supplied content transform.
    pub fn with_transform(config: FsConfig, transform: Box<dyn ContentTransform>) -> Self {
        Self {
            store: EntityStore::new(config.max_entries),
            transform,
            config,
            stats: Arc::new(FsStats::default()),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &FsConfig {
        &self.config
    }

    /// Point-in-time operation statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Shared handle to the statistics counters, usable after the filesystem
    /// itself has been handed off to the host bridge.
    pub fn stats_handle(&self) -> Arc<FsStats> {
        Arc::clone(&self.stats)
    }

    /// Returns metadata for the entry at `path`.
    ///
    /// Root and stored directories report directory mode with two hard
    /// links; stored files report file mode, one hard link and the fixed
    /// configured size. Timestamps and ownership are stamped per call, never
    /// persisted.
    pub fn metadata(&self, path: &str) -> Result<FileMetadata> {
        let path = CipherPath::parse(path)?;
        self.stats.record_attr_query();
        match resolve(&self.store, &path) {
            Resolved::Root | Resolved::Directory => Ok(FileMetadata::stamped_directory()),
            Resolved::File(_) => Ok(FileMetadata::stamped_file(self.config.reported_file_size)),
            Resolved::NotFound => {
                self.stats.record_not_found();
                debug!(path = %path, "metadata: no such entry");
                Err(FsError::NotFound {
                    path: path.as_str().to_string(),
                })
            }
        }
    }

    /// Lists the entry at `path`.
    ///
    /// Every listing starts with the `.` and `..` pseudo-entries. The root
    /// additionally yields all directories followed by all files in
    /// insertion order. Any other known entry yields only the pseudo-entries:
    /// the namespace is flat, so named directories have no children.
    pub fn read_directory(&self, path: &str) -> Result<Vec<DirEntry>> {
        let path = CipherPath::parse(path)?;
        self.stats.record_listing();

        let mut entries = vec![
            DirEntry::new(".", EntryKind::Directory),
            DirEntry::new("..", EntryKind::Directory),
        ];
        match resolve(&self.store, &path) {
            Resolved::Root => {
                for name in self.store.directory_names() {
                    entries.push(DirEntry::new(name, EntryKind::Directory));
                }
                for name in self.store.file_names() {
                    entries.push(DirEntry::new(name, EntryKind::File));
                }
                Ok(entries)
            }
            Resolved::Directory | Resolved::File(_) => Ok(entries),
            Resolved::NotFound => {
                self.stats.record_not_found();
                Err(FsError::NotFound {
                    path: path.as_str().to_string(),
                })
            }
        }
    }

    /// Reads decoded content from the file at `path` into `buf`.
    ///
    /// The stored bytes are decoded in a scratch copy, then at most
    /// `buf.len()` bytes starting at `offset` are copied out. Returns the
    /// number of bytes copied; an offset at or past the end of content reads
    /// zero bytes.
    pub fn read(&self, path: &str, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let path = CipherPath::parse(path)?;
        let id = self.resolve_file(&path)?;
        let stored = self.store.get_content(id).ok_or_else(|| FsError::NotFound {
            path: path.as_str().to_string(),
        })?;

        let mut plain = stored.to_vec();
        self.transform.decode(&mut plain);

        let off = usize::try_from(offset).unwrap_or(usize::MAX);
        let available = plain.len().saturating_sub(off);
        let n = available.min(buf.len());
        if n > 0 {
            buf[..n].copy_from_slice(&plain[off..off + n]);
        }

        self.stats.record_read(n);
        debug!(path = %path, offset, bytes = n, "read");
        Ok(n)
    }

    /// Writes `data` to the file at `path`, encoding it before storage.
    ///
    /// In [`WriteMode::Replace`] the stored content is replaced wholesale and
    /// `offset` is ignored. In [`WriteMode::Patch`] the stored content is
    /// decoded, patched at `offset` (zero-filling any gap), and re-encoded.
    /// A path that resolves to no file follows the configured
    /// [`WritePolicy`]: `Strict` fails with not-found, `Lenient` reports the
    /// full count without storing anything. Returns the number of bytes
    /// logically written.
    pub fn write(&self, path: &str, offset: u64, data: &[u8]) -> Result<usize> {
        let path = CipherPath::parse(path)?;
        let id = match resolve(&self.store, &path) {
            Resolved::File(id) => id,
            _ => {
                self.stats.record_not_found();
                return match self.config.write_policy {
                    WritePolicy::Strict => Err(FsError::NotFound {
                        path: path.as_str().to_string(),
                    }),
                    WritePolicy::Lenient => {
                        warn!(path = %path, "write to unresolved path ignored");
                        Ok(data.len())
                    }
                };
            }
        };

        let encoded = match self.config.write_mode {
            WriteMode::Replace => {
                let mut buf = data.to_vec();
                self.transform.encode(&mut buf);
                buf
            }
            WriteMode::Patch => {
                let stored = self.store.get_content(id).unwrap_or_default();
                let mut plain = stored.to_vec();
                self.transform.decode(&mut plain);

                let off = usize::try_from(offset).unwrap_or(usize::MAX);
                let end = off.saturating_add(data.len());
                if plain.len() < end {
                    plain.resize(end, 0);
                }
                plain[off..end].copy_from_slice(data);
                self.transform.encode(&mut plain);
                plain
            }
        };

        if !self.store.set_content(id, Bytes::from(encoded)) {
            return Err(FsError::NotFound {
                path: path.as_str().to_string(),
            });
        }
        self.stats.record_write(data.len());
        debug!(path = %path, offset, bytes = data.len(), "write");
        Ok(data.len())
    }

    /// Creates a directory named by `path`. The mode is accepted for
    /// interface compatibility and ignored; fixed bits are reported instead.
    pub fn make_directory(&self, path: &str, _mode: u32) -> Result<()> {
        let path = CipherPath::parse(path)?;
        let name = self.entry_name(&path)?;
        self.store.add_directory(name)?;
        self.stats.record_create();
        debug!(path = %path, "directory created");
        Ok(())
    }

    /// Creates an empty file named by `path`. Mode and device info are
    /// accepted for interface compatibility and ignored.
    pub fn make_file(&self, path: &str, _mode: u32, _rdev: u32) -> Result<()> {
        let path = CipherPath::parse(path)?;
        let name = self.entry_name(&path)?;
        self.store.add_file(name)?;
        self.stats.record_create();
        debug!(path = %path, "file created");
        Ok(())
    }

    fn resolve_file(&self, path: &CipherPath) -> Result<FileId> {
        match resolve(&self.store, path) {
            Resolved::File(id) => Ok(id),
            _ => {
                self.stats.record_not_found();
                Err(FsError::NotFound {
                    path: path.as_str().to_string(),
                })
            }
        }
    }

    fn entry_name<'a>(&self, path: &'a CipherPath) -> Result<&'a str> {
        let name = path.name();
        if name.is_empty() {
            return Err(FsError::InvalidPath {
                path: path.as_str().to_string(),
                reason: "empty entry name".to_string(),
            });
        }
        Ok(name)
    }
}
