use std::fmt;

use crate::error::FsError;

/// A validated path in the CipherFS namespace.
///
/// The namespace is flat: every entry lives one segment below the root, and
/// the entry name is everything after the leading separator. A path with
/// further separators is not split into segments; `/a/b` names the single
/// flat entry `a/b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CipherPath {
    raw: String,
}

impl CipherPath {
    /// Parses a raw path string, requiring the leading separator.
    ///
    /// # Arguments
    /// * `raw` - Path string as received from the caller
    ///
    /// # Returns
    /// The validated path, or [`FsError::InvalidPath`] if the string does not
    /// begin with `/`.
    pub fn parse(raw: &str) -> Result<Self, FsError> {
        if !raw.starts_with('/') {
            return Err(FsError::InvalidPath {
                path: raw.to_string(),
                reason: "must begin with '/'".to_string(),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Returns true if this path is the root marker `/`.
    pub fn is_root(&self) -> bool {
        self.raw == "/"
    }

    /// Returns the flat entry name: everything after the leading separator.
    ///
    /// Empty for the root path.
    pub fn name(&self) -> &str {
        &self.raw[1..]
    }

    /// Returns the raw path string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CipherPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let path = CipherPath::parse("/").unwrap();
        assert!(path.is_root());
        assert_eq!(path.name(), "");
    }

    #[test]
    fn test_flat_name_extraction() {
        let path = CipherPath::parse("/notes.txt").unwrap();
        assert!(!path.is_root());
        assert_eq!(path.name(), "notes.txt");
    }

    #[test]
    fn test_nested_path_is_a_flat_name() {
        // No real nesting: the remainder after the first separator is one name.
        let path = CipherPath::parse("/a/b").unwrap();
        assert_eq!(path.name(), "a/b");
    }

    #[test]
    fn test_relative_path_rejected() {
        let err = CipherPath::parse("notes.txt").unwrap_err();
        assert!(matches!(err, FsError::InvalidPath { .. }));
    }

    #[test]
    fn test_display_round_trips_raw() {
        let path = CipherPath::parse("/docs").unwrap();
        assert_eq!(path.to_string(), "/docs");
        assert_eq!(path.as_str(), "/docs");
    }
}
