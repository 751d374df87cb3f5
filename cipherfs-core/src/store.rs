//! In-memory entity storage for directories and files.

use bytes::Bytes;
use indexmap::{IndexMap, IndexSet};
use std::sync::RwLock;

use crate::error::{FsError, Result};
use crate::types::FileId;

/// A stored file record: the name lives as the map key, the content here.
#[derive(Debug, Clone)]
struct FileRecord {
    /// Transform-applied content; plaintext never reaches the store
    content: Bytes,
}

/// Mutable store state behind the lock.
///
/// Directory names and file names are independent namespaces: the same name
/// may exist in both without conflict. Both collections keep insertion order,
/// which the listing contract depends on.
#[derive(Debug, Default)]
struct StoreInner {
    directories: IndexSet<String>,
    files: IndexMap<String, FileRecord>,
}

/// Store for all directories and files known to the filesystem.
///
/// Collections are growable; capacity is bounded only by `max_entries`, and
/// exceeding it is a hard [`FsError::StoreFull`] error rather than undefined
/// behavior. A single lock guards insertion, lookup and content mutation so
/// the store stays consistent even if the host dispatches calls concurrently.
#[derive(Debug)]
pub struct EntityStore {
    inner: RwLock<StoreInner>,
    max_entries: usize,
}

impl EntityStore {
    /// Creates an empty store bounded to `max_entries` directories plus files.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            max_entries,
        }
    }

    /// Inserts a new directory.
    ///
    /// # Arguments
    /// * `name` - Flat directory name, unique among directories
    ///
    /// # Returns
    /// Ok(()) on success, [`FsError::AlreadyExists`] for a duplicate name, or
    /// [`FsError::StoreFull`] at capacity.
    pub fn add_directory(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        self.check_capacity(&inner)?;
        if inner.directories.contains(name) {
            return Err(FsError::AlreadyExists {
                path: format!("/{name}"),
            });
        }
        inner.directories.insert(name.to_string());
        Ok(())
    }

    /// Inserts a new file with empty content.
    ///
    /// # Arguments
    /// * `name` - Flat file name, unique among files
    ///
    /// # Returns
    /// A handle to the new record, [`FsError::AlreadyExists`] for a duplicate
    /// name, or [`FsError::StoreFull`] at capacity.
    pub fn add_file(&self, name: &str) -> Result<FileId> {
        let mut inner = self.inner.write().unwrap();
        self.check_capacity(&inner)?;
        if inner.files.contains_key(name) {
            return Err(FsError::AlreadyExists {
                path: format!("/{name}"),
            });
        }
        let (index, _) = inner.files.insert_full(
            name.to_string(),
            FileRecord {
                content: Bytes::new(),
            },
        );
        Ok(FileId::new(index))
    }

    /// Returns true if a directory with this name exists.
    pub fn find_directory(&self, name: &str) -> bool {
        self.inner.read().unwrap().directories.contains(name)
    }

    /// Looks up a file by name, yielding a handle for content access.
    pub fn find_file(&self, name: &str) -> Option<FileId> {
        self.inner
            .read()
            .unwrap()
            .files
            .get_index_of(name)
            .map(FileId::new)
    }

    /// Replaces a file's stored content wholesale.
    ///
    /// # Arguments
    /// * `id` - Handle obtained from [`add_file`](Self::add_file) or
    ///   [`find_file`](Self::find_file)
    /// * `content` - Transform-applied bytes to store
    ///
    /// # Returns
    /// true if the record existed. Records are never removed, so false only
    /// occurs for a handle this store never issued.
    pub fn set_content(&self, id: FileId, content: Bytes) -> bool {
        let mut inner = self.inner.write().unwrap();
        match inner.files.get_index_mut(id.index()) {
            Some((_, record)) => {
                record.content = content;
                true
            }
            None => false,
        }
    }

    /// Returns the currently stored (transform-applied) content of a file.
    pub fn get_content(&self, id: FileId) -> Option<Bytes> {
        self.inner
            .read()
            .unwrap()
            .files
            .get_index(id.index())
            .map(|(_, record)| record.content.clone())
    }

    /// Snapshot of all directory names in insertion order.
    pub fn directory_names(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap()
            .directories
            .iter()
            .cloned()
            .collect()
    }

    /// Snapshot of all file names in insertion order.
    pub fn file_names(&self) -> Vec<String> {
        self.inner.read().unwrap().files.keys().cloned().collect()
    }

    /// Number of entries (directories plus files) currently stored.
    pub fn entry_count(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.directories.len() + inner.files.len()
    }

    /// The configured entry capacity.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn check_capacity(&self, inner: &StoreInner) -> Result<()> {
        let count = inner.directories.len() + inner.files.len();
        if count >= self.max_entries {
            return Err(FsError::StoreFull {
                count,
                max: self.max_entries,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let store = EntityStore::new(16);
        store.add_directory("docs").unwrap();
        let id = store.add_file("notes.txt").unwrap();

        assert!(store.find_directory("docs"));
        assert!(!store.find_directory("notes.txt"));
        assert_eq!(store.find_file("notes.txt"), Some(id));
        assert_eq!(store.find_file("docs"), None);
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn test_new_files_are_empty() {
        let store = EntityStore::new(16);
        let id = store.add_file("a").unwrap();
        assert_eq!(store.get_content(id).unwrap(), Bytes::new());
    }

    #[test]
    fn test_set_content_replaces() {
        let store = EntityStore::new(16);
        let id = store.add_file("a").unwrap();

        assert!(store.set_content(id, Bytes::from_static(b"uryyb")));
        assert_eq!(store.get_content(id).unwrap(), Bytes::from_static(b"uryyb"));

        assert!(store.set_content(id, Bytes::from_static(b"k")));
        assert_eq!(store.get_content(id).unwrap(), Bytes::from_static(b"k"));
    }

    #[test]
    fn test_unknown_handle() {
        let store = EntityStore::new(16);
        assert_eq!(store.get_content(FileId::new(3)), None);
        assert!(!store.set_content(FileId::new(3), Bytes::new()));
    }

    #[test]
    fn test_duplicate_names_conflict() {
        let store = EntityStore::new(16);
        store.add_file("dup").unwrap();
        let err = store.add_file("dup").unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));

        store.add_directory("docs").unwrap();
        let err = store.add_directory("docs").unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
    }

    #[test]
    fn test_file_and_directory_namespaces_are_independent() {
        let store = EntityStore::new(16);
        store.add_directory("shared").unwrap();
        store.add_file("shared").unwrap();

        assert!(store.find_directory("shared"));
        assert!(store.find_file("shared").is_some());
    }

    #[test]
    fn test_capacity_is_a_hard_error() {
        let store = EntityStore::new(2);
        store.add_directory("a").unwrap();
        store.add_file("b").unwrap();

        let err = store.add_file("c").unwrap_err();
        match err {
            FsError::StoreFull { count, max } => {
                assert_eq!(count, 2);
                assert_eq!(max, 2);
            }
            other => panic!("expected StoreFull, got {other:?}"),
        }
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn test_listing_snapshots_keep_insertion_order() {
        let store = EntityStore::new(16);
        store.add_directory("zeta").unwrap();
        store.add_directory("alpha").unwrap();
        store.add_file("b.txt").unwrap();
        store.add_file("a.txt").unwrap();

        assert_eq!(store.directory_names(), vec!["zeta", "alpha"]);
        assert_eq!(store.file_names(), vec!["b.txt", "a.txt"]);
    }
}
