//! ZIP/CRX package reader.

use std::collections::HashMap;
use std::io::Cursor;
use std::io::Read;

use tracing::debug;

use super::ExtensionArchive;
use super::decode_utf8;
use crate::Result;
use crate::VerifyConfig;
use crate::VerifyError;
use crate::formats::PackageFormat;
use crate::formats::has_zip_signature;
use crate::formats::zip_payload;

/// Extension package backed by a ZIP archive held in memory.
///
/// Accepts plain ZIP files as well as CRX2/CRX3 packages; the CRX envelope
/// is skipped and only the embedded ZIP is read. The package borrows the
/// input buffer and decompresses entries lazily in [`read_text`].
///
/// [`read_text`]: ExtensionArchive::read_text
///
/// # Examples
///
/// ```no_run
/// use crxaudit_core::VerifyConfig;
/// use crxaudit_core::archive::ExtensionArchive;
/// use crxaudit_core::archive::ZipPackage;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("extension.crx")?;
/// let mut package = ZipPackage::open(&bytes, &VerifyConfig::default())?;
/// println!("{} entries", package.len());
/// let manifest = package.read_text("manifest.json")?;
/// # Ok(())
/// # }
/// ```
pub struct ZipPackage<'a> {
    archive: ::zip::ZipArchive<Cursor<&'a [u8]>>,
    format: PackageFormat,
    paths: Vec<String>,
    sizes: Vec<u64>,
    index: HashMap<String, usize>,
}

impl<'a> ZipPackage<'a> {
    /// Opens a package from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidArchive`] if the bytes are not a
    /// readable ZIP or CRX package, or [`VerifyError::QuotaExceeded`] if the
    /// package holds more than `config.max_entry_count` entries.
    pub fn open(data: &'a [u8], config: &VerifyConfig) -> Result<Self> {
        let (format, payload) = zip_payload(data)?;
        if !has_zip_signature(payload) {
            debug!(%format, "payload does not start with a ZIP signature");
        }

        let mut archive = ::zip::ZipArchive::new(Cursor::new(payload))
            .map_err(|e| VerifyError::InvalidArchive(format!("failed to open ZIP archive: {e}")))?;

        if archive.len() > config.max_entry_count {
            return Err(VerifyError::QuotaExceeded {
                entries: archive.len(),
                max: config.max_entry_count,
            });
        }

        let mut paths = Vec::with_capacity(archive.len());
        let mut sizes = Vec::with_capacity(archive.len());
        let mut index = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i).map_err(|e| {
                VerifyError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
            })?;
            let name = entry.name().to_string();
            sizes.push(entry.size());
            index.entry(name.clone()).or_insert(i);
            paths.push(name);
        }

        debug!(%format, entries = paths.len(), "opened package");

        Ok(Self {
            archive,
            format,
            paths,
            sizes,
            index,
        })
    }

    /// Container format the package was read from.
    #[must_use]
    pub const fn format(&self) -> PackageFormat {
        self.format
    }
}

impl ExtensionArchive for ZipPackage<'_> {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn paths(&self) -> &[String] {
        &self.paths
    }

    fn entry_size(&self, path: &str) -> Option<u64> {
        self.index.get(path).map(|&i| self.sizes[i])
    }

    fn read_text(&mut self, path: &str) -> Result<String> {
        let &i = self
            .index
            .get(path)
            .ok_or_else(|| VerifyError::EntryNotFound {
                path: path.to_string(),
            })?;

        let mut entry = self.archive.by_index(i).map_err(|e| {
            VerifyError::InvalidArchive(format!("failed to read ZIP entry {path}: {e}"))
        })?;

        let capacity = usize::try_from(entry.size()).unwrap_or(0);
        let mut bytes = Vec::with_capacity(capacity.min(1024 * 1024));
        entry.read_to_end(&mut bytes)?;

        decode_utf8(path, bytes)
    }
}
