//! Error conversion utilities for CLI.
//!
//! Problems inside a package are reported on the verification result. The
//! only error that reaches the CLI is failing to read the package file, which
//! is converted here into a user-facing message (anyhow).

use anyhow::Result;
use anyhow::anyhow;
use crxaudit_core::VerifyError;
use std::io::ErrorKind;
use std::path::Path;

/// Converts `VerifyError` to user-friendly anyhow error with context
pub fn convert_verify_error(err: VerifyError, package: &Path) -> anyhow::Error {
    let VerifyError::Io(io_err) = err else {
        return anyhow::Error::from(err)
            .context(format!("Error processing package '{}'", package.display()));
    };

    match io_err.kind() {
        ErrorKind::NotFound => anyhow!(
            "Package not found: '{}'\n\
             HINT: Check the path to the .zip or .crx file.",
            package.display()
        ),
        ErrorKind::PermissionDenied => anyhow!(
            "Permission denied reading '{}'\n\
             HINT: Check the file permissions.",
            package.display()
        ),
        _ => anyhow!(
            "I/O error while reading '{}': {}",
            package.display(),
            io_err
        ),
    }
}

/// Adds context to a core result about package operations
pub fn add_package_context<T>(result: Result<T, VerifyError>, package: &Path) -> Result<T> {
    result.map_err(|e| convert_verify_error(e, package))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn io_error(kind: io::ErrorKind) -> VerifyError {
        VerifyError::Io(io::Error::new(kind, "os error"))
    }

    #[test]
    fn test_convert_not_found() {
        let converted = convert_verify_error(io_error(ErrorKind::NotFound), Path::new("missing.crx"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Package not found"));
        assert!(msg.contains("missing.crx"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_permission_denied() {
        let converted =
            convert_verify_error(io_error(ErrorKind::PermissionDenied), Path::new("locked.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Permission denied"));
        assert!(msg.contains("locked.zip"));
    }

    #[test]
    fn test_convert_other_io_error() {
        let converted = convert_verify_error(io_error(ErrorKind::InvalidData), Path::new("ext.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("os error"));
    }
}
