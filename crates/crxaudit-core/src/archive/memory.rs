//! In-memory package.

use super::ExtensionArchive;
use super::decode_utf8;
use crate::Result;
use crate::VerifyError;

/// Package whose entries are already held in memory.
///
/// Entries keep insertion order. When two entries share a path, lookups
/// resolve to the first one.
///
/// # Examples
///
/// ```
/// use crxaudit_core::archive::ExtensionArchive;
/// use crxaudit_core::archive::MemoryArchive;
///
/// let mut archive = MemoryArchive::new()
///     .with_entry("manifest.json", r#"{"manifest_version": 3}"#)
///     .with_entry("background.js", "chrome.runtime.id;");
///
/// assert_eq!(archive.len(), 2);
/// assert_eq!(archive.read_text("background.js").unwrap(), "chrome.runtime.id;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    paths: Vec<String>,
    contents: Vec<Vec<u8>>,
}

impl MemoryArchive {
    /// Creates an empty package.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns the package.
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.add_entry(path, content);
        self
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.paths.push(path.into());
        self.contents.push(content.into());
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.paths.iter().position(|p| p == path)
    }
}

impl<P: Into<String>, C: Into<Vec<u8>>> FromIterator<(P, C)> for MemoryArchive {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut archive = Self::new();
        for (path, content) in iter {
            archive.add_entry(path, content);
        }
        archive
    }
}

impl ExtensionArchive for MemoryArchive {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn paths(&self) -> &[String] {
        &self.paths
    }

    fn entry_size(&self, path: &str) -> Option<u64> {
        self.position(path)
            .map(|i| self.contents[i].len() as u64)
    }

    fn read_text(&mut self, path: &str) -> Result<String> {
        let index = self.position(path).ok_or_else(|| VerifyError::EntryNotFound {
            path: path.to_string(),
        })?;
        decode_utf8(path, self.contents[index].clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let archive: MemoryArchive = vec![("b.js", "b"), ("a.js", "a"), ("c/", "")]
            .into_iter()
            .collect();
        assert_eq!(archive.paths(), ["b.js", "a.js", "c/"]);
        assert_eq!(archive.len(), 3);
        assert!(!archive.is_empty());
    }

    #[test]
    fn test_duplicate_path_resolves_to_first() {
        let mut archive = MemoryArchive::new()
            .with_entry("x.js", "first")
            .with_entry("x.js", "second");
        assert_eq!(archive.read_text("x.js").unwrap(), "first");
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_missing_entry() {
        let mut archive = MemoryArchive::new();
        assert!(archive.is_empty());
        let err = archive.read_text("nope.js").unwrap_err();
        assert!(matches!(err, VerifyError::EntryNotFound { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut archive = MemoryArchive::new().with_entry("bin.js", vec![0xFF, 0xFE, 0x00]);
        let err = archive.read_text("bin.js").unwrap_err();
        assert!(matches!(err, VerifyError::InvalidEncoding { ref path } if path == "bin.js"));
    }

    #[test]
    fn test_entry_size() {
        let archive = MemoryArchive::new().with_entry("a.js", "12345");
        assert_eq!(archive.entry_size("a.js"), Some(5));
        assert_eq!(archive.entry_size("b.js"), None);
    }
}
