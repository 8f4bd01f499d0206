//! Package container detection.
//!
//! Store packages are ZIP archives, optionally wrapped in a signed CRX
//! envelope. The envelope is stripped here so the ZIP reader only ever sees
//! the archive payload.

use crate::Result;
use crate::VerifyError;

/// CRX envelope magic (`Cr24`).
const CRX_MAGIC: [u8; 4] = *b"Cr24";

/// ZIP local file header signature (`PK\x03\x04`).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// ZIP end-of-central-directory signature, the first bytes of an empty ZIP.
const ZIP_EMPTY_MAGIC: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// Supported package containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFormat {
    /// Plain ZIP archive.
    Zip,
    /// CRX version 2 envelope (public key + signature header).
    Crx2,
    /// CRX version 3 envelope (protobuf header).
    Crx3,
}

impl PackageFormat {
    /// Short name used in logs and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Crx2 => "crx2",
            Self::Crx3 => "crx3",
        }
    }
}

impl std::fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the container format from leading magic bytes.
///
/// Input that is neither a CRX envelope nor starts with a ZIP signature is
/// reported as [`PackageFormat::Zip`] and left to the ZIP reader to reject;
/// ZIP readers locate the central directory from the end of the buffer, so
/// prefixed data is tolerated there.
///
/// # Errors
///
/// Returns [`VerifyError::InvalidArchive`] for a CRX envelope with an
/// unknown version or a truncated header.
pub fn detect_format(data: &[u8]) -> Result<PackageFormat> {
    if data.len() < 4 || data[..4] != CRX_MAGIC {
        return Ok(PackageFormat::Zip);
    }

    match read_u32_le(data, 4)? {
        2 => Ok(PackageFormat::Crx2),
        3 => Ok(PackageFormat::Crx3),
        version => Err(VerifyError::InvalidArchive(format!(
            "unsupported CRX version: {version}"
        ))),
    }
}

/// Returns `true` if `data` starts with a ZIP signature.
#[must_use]
pub fn has_zip_signature(data: &[u8]) -> bool {
    data.len() >= 4 && (data[..4] == ZIP_MAGIC || data[..4] == ZIP_EMPTY_MAGIC)
}

/// Returns the ZIP payload of a package, stripping any CRX envelope.
///
/// # Errors
///
/// Returns [`VerifyError::InvalidArchive`] if the envelope header is
/// truncated or its declared lengths run past the end of the input.
///
/// # Examples
///
/// ```
/// use crxaudit_core::formats::PackageFormat;
/// use crxaudit_core::formats::zip_payload;
///
/// let mut crx = b"Cr24".to_vec();
/// crx.extend_from_slice(&3u32.to_le_bytes());
/// crx.extend_from_slice(&2u32.to_le_bytes());
/// crx.extend_from_slice(&[0xAA, 0xBB]);
/// crx.extend_from_slice(b"PK\x05\x06");
///
/// let (format, payload) = zip_payload(&crx).unwrap();
/// assert_eq!(format, PackageFormat::Crx3);
/// assert_eq!(payload, b"PK\x05\x06");
/// ```
pub fn zip_payload(data: &[u8]) -> Result<(PackageFormat, &[u8])> {
    let format = detect_format(data)?;
    let offset = match format {
        PackageFormat::Zip => 0,
        PackageFormat::Crx2 => {
            let key_len = read_u32_le(data, 8)?;
            let sig_len = read_u32_le(data, 12)?;
            16usize
                .checked_add(key_len)
                .and_then(|n| n.checked_add(sig_len))
                .ok_or_else(|| truncated(format))?
        }
        PackageFormat::Crx3 => {
            let header_len = read_u32_le(data, 8)?;
            12usize
                .checked_add(header_len)
                .ok_or_else(|| truncated(format))?
        }
    };

    data.get(offset..)
        .map(|payload| (format, payload))
        .ok_or_else(|| truncated(format))
}

fn read_u32_le(data: &[u8], at: usize) -> Result<usize> {
    let bytes: [u8; 4] = data
        .get(at..at + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| VerifyError::InvalidArchive("truncated CRX header".to_string()))?;
    usize::try_from(u32::from_le_bytes(bytes))
        .map_err(|_| VerifyError::InvalidArchive("CRX header length overflow".to_string()))
}

fn truncated(format: PackageFormat) -> VerifyError {
    VerifyError::InvalidArchive(format!("{format} header extends past end of package"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn crx3(header: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut data = CRX_MAGIC.to_vec();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&u32::try_from(header.len()).unwrap().to_le_bytes());
        data.extend_from_slice(header);
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_detect_plain_zip() {
        assert_eq!(detect_format(b"PK\x03\x04rest").unwrap(), PackageFormat::Zip);
        assert_eq!(detect_format(b"").unwrap(), PackageFormat::Zip);
    }

    #[test]
    fn test_detect_crx3() {
        let data = crx3(&[1, 2, 3], b"PK\x03\x04");
        assert_eq!(detect_format(&data).unwrap(), PackageFormat::Crx3);
    }

    #[test]
    fn test_detect_unknown_crx_version() {
        let mut data = CRX_MAGIC.to_vec();
        data.extend_from_slice(&9u32.to_le_bytes());
        let err = detect_format(&data).unwrap_err();
        assert!(err.to_string().contains("unsupported CRX version: 9"));
    }

    #[test]
    fn test_detect_truncated_version() {
        let err = detect_format(b"Cr24\x03").unwrap_err();
        assert!(matches!(err, VerifyError::InvalidArchive(_)));
    }

    #[test]
    fn test_crx3_payload_stripped() {
        let data = crx3(&[0u8; 32], b"PK\x03\x04zip");
        let (format, payload) = zip_payload(&data).unwrap();
        assert_eq!(format, PackageFormat::Crx3);
        assert_eq!(payload, b"PK\x03\x04zip");
    }

    #[test]
    fn test_crx2_payload_stripped() {
        let mut data = CRX_MAGIC.to_vec();
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(b"keysg");
        data.extend_from_slice(b"PK\x03\x04");
        let (format, payload) = zip_payload(&data).unwrap();
        assert_eq!(format, PackageFormat::Crx2);
        assert_eq!(payload, b"PK\x03\x04");
    }

    #[test]
    fn test_crx3_header_past_end() {
        let mut data = CRX_MAGIC.to_vec();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(b"short");
        let err = zip_payload(&data).unwrap_err();
        assert!(err.to_string().contains("crx3 header extends past end"));
    }

    #[test]
    fn test_has_zip_signature() {
        assert!(has_zip_signature(b"PK\x03\x04"));
        assert!(has_zip_signature(b"PK\x05\x06"));
        assert!(!has_zip_signature(b"Cr24"));
        assert!(!has_zip_signature(b"PK"));
    }
}
