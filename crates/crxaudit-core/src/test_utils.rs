//! Test utilities for building extension packages in memory.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from `(path, text)` pairs.
///
/// Entries are deflate-compressed and written in the given order.
///
/// # Examples
///
/// ```
/// use crxaudit_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("manifest.json", "{}"), ("js/app.js", "run();")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (path, text)| {
            builder.add_file(path, text.as_bytes())
        })
        .build()
}

/// Creates an in-memory CRX3 package wrapping a ZIP of `(path, text)` pairs.
///
/// The envelope header is filler bytes; nothing in the pipeline verifies
/// CRX signatures.
#[must_use]
pub fn create_test_crx3(entries: &[(&str, &str)]) -> Vec<u8> {
    wrap_crx3(&create_test_zip(entries))
}

/// Wraps ZIP bytes in a CRX3 envelope with a filler header.
#[must_use]
pub fn wrap_crx3(zip: &[u8]) -> Vec<u8> {
    let header = [0x0Au8; 24];
    let mut data = b"Cr24".to_vec();
    data.extend_from_slice(&3u32.to_le_bytes());
    data.extend_from_slice(&u32::try_from(header.len()).unwrap().to_le_bytes());
    data.extend_from_slice(&header);
    data.extend_from_slice(zip);
    data
}

/// Builder for ZIP test packages with files and directory entries.
///
/// # Examples
///
/// ```
/// use crxaudit_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("js/")
///     .add_file("js/app.js", b"run();")
///     .add_stored_file("manifest.json", b"{}")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.write_file(path, data, options)
    }

    /// Adds an uncompressed file.
    #[must_use]
    pub fn add_stored_file(self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        self.write_file(path, data, options)
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    fn write_file(mut self, path: &str, data: &[u8], options: SimpleFileOptions) -> Self {
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
