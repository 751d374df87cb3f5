use std::time::SystemTime;

/// Kind of entry held in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// Unix-style permission bits reported for an entry.
///
/// CipherFS does not enforce permissions; these are fixed bits reported to
/// the host on every attribute query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FilePermissions {
    /// Unix-style permissions (rwxrwxrwx)
    pub mode: u32,
}

impl FilePermissions {
    /// Creates a new FilePermissions instance.
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    /// Returns the fixed permissions reported for a file.
    pub fn default_file() -> Self {
        Self { mode: 0o644 }
    }

    /// Returns the fixed permissions reported for a directory.
    pub fn default_directory() -> Self {
        Self { mode: 0o755 }
    }
}

/// Metadata reported for a file system entry.
///
/// Stamped fresh on every attribute query and never persisted: timestamps are
/// the query time and uid/gid are the serving process identity.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    /// Size in bytes as reported to the host
    pub size: u64,
    /// Last access time
    pub accessed: SystemTime,
    /// Last modification time
    pub modified: SystemTime,
    /// Owning user id
    pub uid: u32,
    /// Owning group id
    pub gid: u32,
    /// File permissions
    pub permissions: FilePermissions,
    /// Kind of entry
    pub kind: EntryKind,
    /// Number of hard links
    pub nlink: u32,
}

impl FileMetadata {
    /// Builds directory metadata stamped with the current time and the
    /// serving process identity. Directories report two hard links.
    pub fn stamped_directory() -> Self {
        let (uid, gid) = process_ids();
        let now = SystemTime::now();
        Self {
            size: 0,
            accessed: now,
            modified: now,
            uid,
            gid,
            permissions: FilePermissions::default_directory(),
            kind: EntryKind::Directory,
            nlink: 2,
        }
    }

    /// Builds file metadata stamped with the current time and the serving
    /// process identity. `size` is the fixed reported size, not the stored
    /// content length.
    pub fn stamped_file(size: u64) -> Self {
        let (uid, gid) = process_ids();
        let now = SystemTime::now();
        Self {
            size,
            accessed: now,
            modified: now,
            uid,
            gid,
            permissions: FilePermissions::default_file(),
            kind: EntryKind::File,
            nlink: 1,
        }
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

#[cfg(unix)]
fn process_ids() -> (u32, u32) {
    // SAFETY: getuid/getgid cannot fail and touch no caller memory.
    unsafe { (libc::getuid(), libc::getgid()) }
}

#[cfg(not(unix))]
fn process_ids() -> (u32, u32) {
    (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_permission_bits() {
        assert_eq!(FilePermissions::default_file().mode, 0o644);
        assert_eq!(FilePermissions::default_directory().mode, 0o755);
        assert_eq!(FilePermissions::new(0o600).mode, 0o600);
    }

    #[test]
    fn test_stamped_directory() {
        let md = FileMetadata::stamped_directory();
        assert!(md.is_directory());
        assert!(!md.is_file());
        assert_eq!(md.nlink, 2);
        assert_eq!(md.permissions.mode, 0o755);
        assert_eq!(md.size, 0);
    }

    #[test]
    fn test_stamped_file_uses_reported_size() {
        let md = FileMetadata::stamped_file(1024);
        assert!(md.is_file());
        assert_eq!(md.nlink, 1);
        assert_eq!(md.permissions.mode, 0o644);
        assert_eq!(md.size, 1024);
    }
}
