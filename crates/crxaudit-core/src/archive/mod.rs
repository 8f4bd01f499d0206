//! Read-only access to package entries.
//!
//! The verification pipeline only needs three things from a package: how
//! many entries it holds, their paths in enumeration order, and the decoded
//! text of a given entry. [`ExtensionArchive`] captures exactly that, so the
//! pipeline can run over a real ZIP/CRX file ([`ZipPackage`]) or over entries
//! already held in memory ([`MemoryArchive`]).

mod memory;
mod package;

pub use self::memory::MemoryArchive;
pub use self::package::ZipPackage;

use crate::Result;

/// Read-only view of the entries in an extension package.
///
/// Implementations never mutate package data. Entry paths use `/` as the
/// separator, exactly as stored in the archive.
pub trait ExtensionArchive {
    /// Total number of entries, directories included.
    fn len(&self) -> usize;

    /// Returns `true` if the package has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry paths in enumeration order.
    fn paths(&self) -> &[String];

    /// Uncompressed size of the entry at `path`, if it exists.
    fn entry_size(&self, path: &str) -> Option<u64>;

    /// Reads and decodes the entry at `path` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::EntryNotFound`](crate::VerifyError::EntryNotFound)
    /// if no entry has this path, or
    /// [`VerifyError::InvalidEncoding`](crate::VerifyError::InvalidEncoding)
    /// if the content is not UTF-8.
    fn read_text(&mut self, path: &str) -> Result<String>;
}

pub(crate) fn decode_utf8(path: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| crate::VerifyError::InvalidEncoding {
        path: path.to_string(),
    })
}
