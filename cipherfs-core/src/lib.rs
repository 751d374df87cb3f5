//! # CipherFS Core
//!
//! The core library for CipherFS - a minimal user-space filesystem that serves
//! every operation from an in-process object store and keeps file content
//! obfuscated at rest through a reversible byte substitution cipher.
//!
//! ## Overview
//!
//! CipherFS holds a flat namespace of directories and files entirely in memory.
//! Nothing is ever persisted: the store lives and dies with the process. File
//! content passes through a self-inverse ROT13 transform on the write boundary
//! and back through it on the read boundary, so the store only ever holds
//! transformed bytes. This is an obfuscation demonstration, not a security
//! mechanism.
//!
//! ## Basic Usage
//!
//! ```rust
//! use cipherfs_core::{CipherFs, FsConfig};
//!
//! let fs = CipherFs::new(FsConfig::default());
//! fs.make_file("/notes.txt", 0o644, 0).unwrap();
//! fs.write("/notes.txt", 0, b"hello").unwrap();
//!
//! let mut buf = [0u8; 5];
//! let n = fs.read("/notes.txt", 0, &mut buf).unwrap();
//! assert_eq!(&buf[..n], b"hello");
//! ```
//!
//! ## Architecture
//!
//! This crate provides the filesystem core used by the platform bridge:
//!
//! - [`types`]: Paths, metadata, directory entries and file handles
//! - [`error`]: Error types and handling
//! - [`config`]: Runtime configuration and write policies
//! - [`transform`]: The reversible content transform applied at rest
//! - [`store`]: In-memory storage for directories and files
//! - [`resolve`]: Path classification against the store
//! - [`ops`]: The filesystem operation handlers
//! - [`stats`]: Operation statistics collection
//!
//! The host integration lives in separate crates: `cipherfs-fuse` adapts the
//! six core operations to the kernel FUSE protocol and `cipherfs-cli` is the
//! mount entry point.

pub mod config;
pub mod error;
pub mod ops;
pub mod resolve;
pub mod stats;
pub mod store;
pub mod transform;
pub mod types;

pub use config::{FsConfig, WriteMode, WritePolicy};
pub use error::{FsError, Result};
pub use ops::CipherFs;
