//! Manifest location and parsing.

use std::fmt;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::VerifyConfig;
use crate::VerifyError;
use crate::archive::ExtensionArchive;

/// Description substituted when the manifest has none.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Parsed extension manifest.
///
/// Only the fields the policy checks consult are modelled. Missing fields,
/// and fields of an unexpected JSON type, are replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Declared manifest format version.
    pub manifest_version: ManifestVersion,
    /// Extension name, if declared as a string.
    pub name: Option<String>,
    /// Extension version string, if declared as a string.
    pub version: Option<String>,
    /// Store description, or [`DEFAULT_DESCRIPTION`].
    pub description: String,
    /// API permissions in declaration order.
    pub permissions: Vec<String>,
    /// Host match patterns in declaration order.
    pub host_permissions: Vec<String>,
    /// Custom content security policy, if declared.
    pub content_security_policy: Option<ContentSecurityPolicy>,
}

/// Declared `manifest_version`.
///
/// A missing version reads as `Integer(0)`. Anything that is not a JSON
/// integer is kept verbatim so it can be quoted back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ManifestVersion {
    /// An integer version.
    Integer(i64),
    /// Any other JSON value, such as `"3"` or `3.0`.
    Other(Value),
}

impl ManifestVersion {
    /// The version as an integer, if it was declared as one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Other(_) => None,
        }
    }
}

impl Default for ManifestVersion {
    fn default() -> Self {
        Self::Integer(0)
    }
}

impl PartialEq<i64> for ManifestVersion {
    fn eq(&self, other: &i64) -> bool {
        self.as_integer() == Some(*other)
    }
}

impl fmt::Display for ManifestVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Declared content security policy, kept exactly as written.
///
/// Manifest v2 used a single policy string; manifest v3 uses an object keyed
/// by page type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentSecurityPolicy(Value);

impl ContentSecurityPolicy {
    /// Wraps a raw policy value.
    #[must_use]
    pub const fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The policy as declared.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// The `extension_pages` policy string, if present and a string.
    #[must_use]
    pub fn extension_pages(&self) -> Option<&str> {
        self.0.get("extension_pages").and_then(Value::as_str)
    }

    /// The policy rendered as compact JSON, keys in declaration order.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let value = present(fields, key)?;
    let text = value.as_str().map(str::to_owned);
    if text.is_none() {
        debug!(field = key, "ignoring non-string manifest field");
    }
    text
}

// Non-string entries (legacy object permissions) are kept as their JSON text.
fn permission_strings(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(value) = present(fields, key) else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        debug!(field = key, "ignoring non-array permission list");
        return Vec::new();
    };
    entries
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

impl From<&Map<String, Value>> for Manifest {
    fn from(fields: &Map<String, Value>) -> Self {
        let manifest_version = present(fields, "manifest_version").map_or_else(
            ManifestVersion::default,
            |v| {
                v.as_i64()
                    .map_or_else(|| ManifestVersion::Other(v.clone()), ManifestVersion::Integer)
            },
        );

        Self {
            manifest_version,
            name: string_field(fields, "name"),
            version: string_field(fields, "version"),
            description: string_field(fields, "description")
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            permissions: permission_strings(fields, "permissions"),
            host_permissions: permission_strings(fields, "host_permissions"),
            content_security_policy: present(fields, "content_security_policy")
                .cloned()
                .map(ContentSecurityPolicy::new),
        }
    }
}

/// Finds the manifest entry among the package paths.
///
/// Matches by path suffix, so a manifest nested in a subdirectory is found.
/// When several entries match, the first in enumeration order wins.
///
/// # Errors
///
/// Returns [`VerifyError::ManifestNotFound`] if no entry matches.
pub fn locate_manifest<'a, A>(archive: &'a A, config: &VerifyConfig) -> Result<&'a str>
where
    A: ExtensionArchive + ?Sized,
{
    archive
        .paths()
        .iter()
        .find(|p| config.is_manifest_path(p))
        .map(String::as_str)
        .ok_or_else(|| VerifyError::ManifestNotFound {
            file_name: config.manifest_file_name.clone(),
        })
}

/// Parses manifest text read from `path`.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// Returns [`VerifyError::ManifestFormat`] with the parser diagnostic if the
/// text is not a JSON object. Fields of an unexpected type never fail the
/// parse; they fall back to their defaults.
///
/// # Examples
///
/// ```
/// use crxaudit_core::manifest::DEFAULT_DESCRIPTION;
/// use crxaudit_core::manifest::parse_manifest;
///
/// let manifest = parse_manifest("manifest.json", r#"{"manifest_version": 3}"#).unwrap();
/// assert_eq!(manifest.manifest_version, 3);
/// assert_eq!(manifest.description, DEFAULT_DESCRIPTION);
/// assert!(manifest.permissions.is_empty());
/// ```
pub fn parse_manifest(path: &str, text: &str) -> Result<Manifest> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let fields: Map<String, Value> =
        serde_json::from_str(text).map_err(|source| VerifyError::ManifestFormat {
            path: path.to_string(),
            source,
        })?;
    Ok(Manifest::from(&fields))
}

/// Locates, reads and parses the manifest of a package.
///
/// Returns the manifest path alongside the parsed record.
///
/// # Errors
///
/// Returns [`VerifyError::ManifestNotFound`] if there is no manifest entry,
/// the read error if the entry cannot be decoded, or
/// [`VerifyError::ManifestFormat`] if the content is malformed.
pub fn load_manifest<A>(archive: &mut A, config: &VerifyConfig) -> Result<(String, Manifest)>
where
    A: ExtensionArchive + ?Sized,
{
    let path = locate_manifest(archive, config)?.to_string();
    debug!(%path, "located manifest");
    let text = archive.read_text(&path)?;
    let manifest = parse_manifest(&path, &text)?;
    Ok((path, manifest))
}
