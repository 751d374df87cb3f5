//! FUSE bridge for CipherFS.
//!
//! Adapts the six core operations to the kernel FUSE protocol via [`fuser`]:
//! translates inode-addressed kernel calls into the core's path-addressed
//! calls, and maps core errors back to POSIX errno values. The dispatch loop
//! is single-threaded, so at most one call executes against the store at a
//! time.

mod fs;
mod inode;

pub use fs::CipherMount;

use std::path::Path;

use fuser::MountOption;
use thiserror::Error;
use tracing::info;

use cipherfs_core::{CipherFs, FsError};

/// Errors surfaced while mounting or serving a session.
#[derive(Debug, Error)]
pub enum MountError {
    /// The kernel mount itself failed (missing fusermount, bad mountpoint,
    /// insufficient privileges).
    #[error("failed to mount cipherfs")]
    Io(#[from] std::io::Error),
}

/// Maps a core error to the POSIX errno reported to the kernel.
pub fn errno_for(err: &FsError) -> i32 {
    match err {
        FsError::NotFound { .. } => libc::ENOENT,
        FsError::AlreadyExists { .. } => libc::EEXIST,
        FsError::StoreFull { .. } => libc::ENOSPC,
        FsError::InvalidPath { .. } => libc::EINVAL,
    }
}

/// Mounts `fs` at `mountpoint` and serves until the filesystem is unmounted.
///
/// Blocks for the lifetime of the session; the kernel serialises calls
/// through the single dispatch loop.
pub fn mount(fs: CipherFs, mountpoint: &Path, allow_other: bool) -> Result<(), MountError> {
    let mut options = vec![
        MountOption::FSName("cipherfs".to_string()),
        MountOption::AutoUnmount,
    ];
    if allow_other {
        options.push(MountOption::AllowOther);
    }

    info!(mountpoint = %mountpoint.display(), "mounting cipherfs");
    fuser::mount2(CipherMount::new(fs), mountpoint, &options)?;
    info!(mountpoint = %mountpoint.display(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        let err = FsError::NotFound {
            path: "/x".to_string(),
        };
        assert_eq!(errno_for(&err), libc::ENOENT);

        let err = FsError::AlreadyExists {
            path: "/x".to_string(),
        };
        assert_eq!(errno_for(&err), libc::EEXIST);

        let err = FsError::StoreFull { count: 1, max: 1 };
        assert_eq!(errno_for(&err), libc::ENOSPC);

        let err = FsError::InvalidPath {
            path: "x".to_string(),
            reason: "must begin with '/'".to_string(),
        };
        assert_eq!(errno_for(&err), libc::EINVAL);
    }
}
