use std::fmt;

/// An opaque handle to a file record in the entity store.
///
/// Handles are issued by the store during path resolution and are meant to be
/// used within the same call. Files are never removed, so a handle never
/// dangles, but callers should not retain handles across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(usize);

impl FileId {
    /// Creates a new FileId over the given record index.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying record index.
    pub(crate) fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_round_trip() {
        let id = FileId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "FileId(7)");
        assert_eq!(id, FileId::new(7));
        assert_ne!(id, FileId::new(8));
    }
}
