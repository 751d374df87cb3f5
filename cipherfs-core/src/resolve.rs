//! Path classification against the entity store.

use crate::store::EntityStore;
use crate::types::{CipherPath, FileId};

/// Outcome of resolving a path against the current store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The root directory itself; always present.
    Root,
    /// A stored directory.
    Directory,
    /// A stored file, with the handle for content access.
    File(FileId),
    /// No entry under this name.
    NotFound,
}

/// Classifies `path` against `store`.
///
/// Checks root first, then directories, then files; a name present in both
/// namespaces resolves as a directory. Uniqueness is enforced at insertion,
/// so each probe is a single index lookup.
pub fn resolve(store: &EntityStore, path: &CipherPath) -> Resolved {
    if path.is_root() {
        return Resolved::Root;
    }
    let name = path.name();
    if store.find_directory(name) {
        return Resolved::Directory;
    }
    match store.find_file(name) {
        Some(id) => Resolved::File(id),
        None => Resolved::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> CipherPath {
        CipherPath::parse(raw).unwrap()
    }

    #[test]
    fn test_root_always_resolves() {
        let store = EntityStore::new(16);
        assert_eq!(resolve(&store, &path("/")), Resolved::Root);
    }

    #[test]
    fn test_classification() {
        let store = EntityStore::new(16);
        store.add_directory("docs").unwrap();
        let id = store.add_file("notes.txt").unwrap();

        assert_eq!(resolve(&store, &path("/docs")), Resolved::Directory);
        assert_eq!(resolve(&store, &path("/notes.txt")), Resolved::File(id));
        assert_eq!(resolve(&store, &path("/missing")), Resolved::NotFound);
    }

    #[test]
    fn test_directories_win_name_collisions() {
        let store = EntityStore::new(16);
        store.add_file("shared").unwrap();
        store.add_directory("shared").unwrap();

        assert_eq!(resolve(&store, &path("/shared")), Resolved::Directory);
    }

    #[test]
    fn test_nested_path_resolves_as_flat_name() {
        let store = EntityStore::new(16);
        let id = store.add_file("a/b").unwrap();

        assert_eq!(resolve(&store, &path("/a/b")), Resolved::File(id));
        assert_eq!(resolve(&store, &path("/a")), Resolved::NotFound);
    }
}
