//! Error types for extension package verification.

use thiserror::Error;

/// Result type alias using `VerifyError`.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Errors that can occur while reading or verifying an extension package.
///
/// Inside the verification pipeline these are never returned to the caller.
/// They are recorded in-band on the
/// [`VerificationResult`](crate::VerificationResult) instead.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Package is not a readable ZIP/CRX container.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// No entry in the package ends with the manifest file name.
    #[error("{file_name} not found in archive")]
    ManifestNotFound {
        /// Manifest file name that was searched for.
        file_name: String,
    },

    /// Manifest content is not valid JSON or has the wrong shape.
    #[error("invalid {path}: {source}")]
    ManifestFormat {
        /// Archive path of the manifest entry.
        path: String,
        /// Underlying parser diagnostic.
        #[source]
        source: serde_json::Error,
    },

    /// Entry content is not valid UTF-8 text.
    #[error("entry is not valid UTF-8 text: {path}")]
    InvalidEncoding {
        /// Archive path of the entry.
        path: String,
    },

    /// Requested entry does not exist in the package.
    #[error("entry not found in archive: {path}")]
    EntryNotFound {
        /// Archive path that was requested.
        path: String,
    },

    /// Package holds more entries than the configured limit.
    #[error("archive has too many entries ({entries} > {max})")]
    QuotaExceeded {
        /// Number of entries in the package.
        entries: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl VerifyError {
    /// Returns `true` if this error aborts the verification pipeline.
    ///
    /// Terminal errors concern the package as a whole (unreadable container,
    /// missing or malformed manifest). Per-entry errors such as
    /// [`VerifyError::InvalidEncoding`] only cause that entry to be skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use crxaudit_core::VerifyError;
    ///
    /// let err = VerifyError::ManifestNotFound {
    ///     file_name: "manifest.json".to_string(),
    /// };
    /// assert!(err.is_terminal());
    ///
    /// let err = VerifyError::InvalidEncoding {
    ///     path: "bin/blob.js".to_string(),
    /// };
    /// assert!(!err.is_terminal());
    /// ```
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::InvalidArchive(_)
                | Self::ManifestNotFound { .. }
                | Self::ManifestFormat { .. }
                | Self::QuotaExceeded { .. }
        )
    }

    /// Returns the archive path this error refers to, if any.
    #[must_use]
    pub fn entry_path(&self) -> Option<&str> {
        match self {
            Self::ManifestFormat { path, .. }
            | Self::InvalidEncoding { path }
            | Self::EntryNotFound { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_not_found_display() {
        let err = VerifyError::ManifestNotFound {
            file_name: "manifest.json".into(),
        };
        assert_eq!(err.to_string(), "manifest.json not found in archive");
    }

    #[test]
    fn test_manifest_format_carries_diagnostic() {
        let source = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
        let diagnostic = source.to_string();
        let err = VerifyError::ManifestFormat {
            path: "manifest.json".into(),
            source,
        };
        let display = err.to_string();
        assert!(display.contains("manifest.json"));
        assert!(display.contains(&diagnostic));
        assert_eq!(err.entry_path(), Some("manifest.json"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VerifyError = io_err.into();
        assert!(matches!(err, VerifyError::Io(_)));
        assert!(err.is_terminal());
    }

    #[test]
    fn test_entry_path() {
        let err = VerifyError::InvalidEncoding {
            path: "lib/blob.js".into(),
        };
        assert_eq!(err.entry_path(), Some("lib/blob.js"));
        assert_eq!(VerifyError::InvalidArchive("bad".into()).entry_path(), None);
        assert_eq!(VerifyError::QuotaExceeded { entries: 3, max: 2 }.entry_path(), None);
    }

    #[test]
    fn test_is_terminal() {
        assert!(VerifyError::InvalidArchive("bad".into()).is_terminal());
        assert!(VerifyError::QuotaExceeded { entries: 11, max: 10 }.is_terminal());
        assert!(!VerifyError::EntryNotFound { path: "a.js".into() }.is_terminal());
        assert!(!VerifyError::InvalidEncoding { path: "a.js".into() }.is_terminal());
    }

    #[test]
    fn test_quota_exceeded_display() {
        let err = VerifyError::QuotaExceeded {
            entries: 11,
            max: 10,
        };
        let display = err.to_string();
        assert!(display.contains("11"));
        assert!(display.contains("10"));
    }
}
