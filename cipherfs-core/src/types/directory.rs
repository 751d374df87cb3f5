use crate::types::EntryKind;

/// A single entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// The name of the file or directory
    pub name: String,
    /// The kind of entry
    pub kind: EntryKind,
}

impl DirEntry {
    /// Creates a new DirEntry.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Returns the name of the entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this entry is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Returns true if this entry is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry() {
        let entry = DirEntry::new("notes.txt", EntryKind::File);
        assert_eq!(entry.name(), "notes.txt");
        assert!(entry.is_file());
        assert!(!entry.is_directory());

        let entry = DirEntry::new("docs", EntryKind::Directory);
        assert!(entry.is_directory());
    }
}
