//! The fuser adapter over the filesystem core.

use std::ffi::OsStr;
use std::time::{Duration, SystemTime};

use fuser::{
    FileAttr, FileType, Filesystem, ReplyAttr, ReplyData, ReplyDirectory, ReplyEntry, ReplyWrite,
    Request, TimeOrNow,
};
use tracing::debug;

use cipherfs_core::types::{EntryKind, FileMetadata};
use cipherfs_core::CipherFs;

use crate::errno_for;
use crate::inode::{InodeTable, ROOT_INO};

/// How long the kernel may cache entries and attributes. Attributes are
/// stamped per query, so a short window keeps timestamps fresh.
const TTL: Duration = Duration::from_secs(1);

/// A mounted CipherFS session: the core plus the session's inode table.
pub struct CipherMount {
    fs: CipherFs,
    inodes: InodeTable,
}

impl CipherMount {
    /// Wraps a filesystem core for serving over FUSE.
    pub fn new(fs: CipherFs) -> Self {
        Self {
            fs,
            inodes: InodeTable::new(),
        }
    }

    fn attr_from(ino: u64, md: &FileMetadata) -> FileAttr {
        FileAttr {
            ino,
            size: md.size,
            blocks: md.size.div_ceil(512),
            atime: md.accessed,
            mtime: md.modified,
            ctime: md.modified,
            crtime: md.modified,
            kind: kind_to_fuse(md.kind),
            perm: md.permissions.mode as u16,
            nlink: md.nlink,
            uid: md.uid,
            gid: md.gid,
            rdev: 0,
            blksize: 512,
            flags: 0,
        }
    }

    /// Joins a child name under the root into a core path, or None for names
    /// the core cannot address.
    fn child_path(parent: u64, name: &OsStr) -> Option<String> {
        if parent != ROOT_INO {
            return None;
        }
        name.to_str().map(|n| format!("/{n}"))
    }
}

fn kind_to_fuse(kind: EntryKind) -> FileType {
    match kind {
        EntryKind::Directory => FileType::Directory,
        EntryKind::File => FileType::RegularFile,
    }
}

impl Filesystem for CipherMount {
    fn lookup(&mut self, _req: &Request<'_>, parent: u64, name: &OsStr, reply: ReplyEntry) {
        let path = match Self::child_path(parent, name) {
            Some(path) => path,
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        match self.fs.metadata(&path) {
            Ok(md) => {
                let ino = self.inodes.get_or_assign(&path);
                reply.entry(&TTL, &Self::attr_from(ino, &md), 0);
            }
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn getattr(&mut self, _req: &Request<'_>, ino: u64, reply: ReplyAttr) {
        let path = match self.inodes.path_of(ino) {
            Some(path) => path.to_string(),
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        match self.fs.metadata(&path) {
            Ok(md) => reply.attr(&TTL, &Self::attr_from(ino, &md)),
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn setattr(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _mode: Option<u32>,
        _uid: Option<u32>,
        _gid: Option<u32>,
        size: Option<u64>,
        _atime: Option<TimeOrNow>,
        _mtime: Option<TimeOrNow>,
        _ctime: Option<SystemTime>,
        _fh: Option<u64>,
        _crtime: Option<SystemTime>,
        _chgtime: Option<SystemTime>,
        _bkuptime: Option<SystemTime>,
        _flags: Option<u32>,
        reply: ReplyAttr,
    ) {
        let path = match self.inodes.path_of(ino) {
            Some(path) => path.to_string(),
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        // The core has no truncate operation; O_TRUNC opens arrive here as a
        // size-0 setattr and become an empty replacing write. All other
        // attribute changes are accepted and ignored, as the reported
        // attributes are fixed.
        if size == Some(0) {
            if let Err(err) = self.fs.write(&path, 0, &[]) {
                reply.error(errno_for(&err));
                return;
            }
        }
        match self.fs.metadata(&path) {
            Ok(md) => reply.attr(&TTL, &Self::attr_from(ino, &md)),
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn mknod(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        mode: u32,
        _umask: u32,
        rdev: u32,
        reply: ReplyEntry,
    ) {
        let path = match Self::child_path(parent, name) {
            Some(path) => path,
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        if let Err(err) = self.fs.make_file(&path, mode, rdev) {
            reply.error(errno_for(&err));
            return;
        }
        match self.fs.metadata(&path) {
            Ok(md) => {
                let ino = self.inodes.get_or_assign(&path);
                debug!(path = %path, ino, "mknod");
                reply.entry(&TTL, &Self::attr_from(ino, &md), 0);
            }
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn mkdir(
        &mut self,
        _req: &Request<'_>,
        parent: u64,
        name: &OsStr,
        mode: u32,
        _umask: u32,
        reply: ReplyEntry,
    ) {
        let path = match Self::child_path(parent, name) {
            Some(path) => path,
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        if let Err(err) = self.fs.make_directory(&path, mode) {
            reply.error(errno_for(&err));
            return;
        }
        match self.fs.metadata(&path) {
            Ok(md) => {
                let ino = self.inodes.get_or_assign(&path);
                debug!(path = %path, ino, "mkdir");
                reply.entry(&TTL, &Self::attr_from(ino, &md), 0);
            }
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn read(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        size: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyData,
    ) {
        let path = match self.inodes.path_of(ino) {
            Some(path) => path.to_string(),
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        let offset = match u64::try_from(offset) {
            Ok(offset) => offset,
            Err(_) => {
                reply.error(libc::EINVAL);
                return;
            }
        };
        let mut buf = vec![0u8; size as usize];
        match self.fs.read(&path, offset, &mut buf) {
            Ok(n) => reply.data(&buf[..n]),
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn write(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        data: &[u8],
        _write_flags: u32,
        _flags: i32,
        _lock_owner: Option<u64>,
        reply: ReplyWrite,
    ) {
        let path = match self.inodes.path_of(ino) {
            Some(path) => path.to_string(),
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        let offset = match u64::try_from(offset) {
            Ok(offset) => offset,
            Err(_) => {
                reply.error(libc::EINVAL);
                return;
            }
        };
        match self.fs.write(&path, offset, data) {
            Ok(n) => reply.written(n as u32),
            Err(err) => reply.error(errno_for(&err)),
        }
    }

    fn readdir(
        &mut self,
        _req: &Request<'_>,
        ino: u64,
        _fh: u64,
        offset: i64,
        mut reply: ReplyDirectory,
    ) {
        let path = match self.inodes.path_of(ino) {
            Some(path) => path.to_string(),
            None => {
                reply.error(libc::ENOENT);
                return;
            }
        };
        let entries = match self.fs.read_directory(&path) {
            Ok(entries) => entries,
            Err(err) => {
                reply.error(errno_for(&err));
                return;
            }
        };

        let skip = offset.max(0) as usize;
        for (i, entry) in entries.into_iter().enumerate().skip(skip) {
            let child_ino = match entry.name() {
                "." => ino,
                ".." => ROOT_INO,
                name => self.inodes.get_or_assign(&format!("/{name}")),
            };
            // Offset of the next entry; the kernel resumes from here.
            let full = reply.add(
                child_ino,
                (i + 1) as i64,
                kind_to_fuse(entry.kind),
                entry.name(),
            );
            if full {
                break;
            }
        }
        reply.ok();
    }
}
