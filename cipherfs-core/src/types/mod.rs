// Module declarations
pub mod directory;
pub mod handle;
pub mod metadata;
pub mod path;

// Re-export all types from submodules
pub use directory::DirEntry;
pub use handle::FileId;
pub use metadata::{EntryKind, FileMetadata, FilePermissions};
pub use path::CipherPath;
