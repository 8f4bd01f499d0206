//! Verification configuration.

/// Policy thresholds and capacity limits for a verification run.
///
/// Pass by reference (`&VerifyConfig`); the struct holds heap-allocated
/// strings and is never mutated by the pipeline.
///
/// # Examples
///
/// ```
/// use crxaudit_core::VerifyConfig;
///
/// // Store policy defaults
/// let config = VerifyConfig::default();
/// assert_eq!(config.required_manifest_version, 3);
///
/// // Raise the capacity limits for a large package
/// let custom = VerifyConfig {
///     max_entry_count: 50_000,
///     max_script_size: 64 * 1024 * 1024,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// File name of the manifest, matched as a path suffix.
    pub manifest_file_name: String,

    /// Path suffix that selects entries for the script scan.
    pub script_extension: String,

    /// Manifest version the store requires.
    pub required_manifest_version: i64,

    /// Longest description (in characters) accepted without a warning.
    pub max_description_length: usize,

    /// Maximum number of entries a package may contain.
    pub max_entry_count: usize,

    /// Script entries larger than this (uncompressed bytes) are not scanned.
    pub max_script_size: u64,
}

impl Default for VerifyConfig {
    /// Creates a `VerifyConfig` matching the store policy.
    ///
    /// Default values:
    /// - `manifest_file_name`: `manifest.json`
    /// - `script_extension`: `.js`
    /// - `required_manifest_version`: 3
    /// - `max_description_length`: 150
    /// - `max_entry_count`: 10,000
    /// - `max_script_size`: 10 MB
    fn default() -> Self {
        Self {
            manifest_file_name: "manifest.json".to_string(),
            script_extension: ".js".to_string(),
            required_manifest_version: 3,
            max_description_length: 150,
            max_entry_count: 10_000,
            max_script_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl VerifyConfig {
    /// Returns `true` if `path` names the manifest (suffix match).
    #[must_use]
    pub fn is_manifest_path(&self, path: &str) -> bool {
        path.ends_with(&self.manifest_file_name)
    }

    /// Returns `true` if `path` names a script entry (suffix match).
    #[must_use]
    pub fn is_script_path(&self, path: &str) -> bool {
        path.ends_with(&self.script_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifyConfig::default();
        assert_eq!(config.manifest_file_name, "manifest.json");
        assert_eq!(config.script_extension, ".js");
        assert_eq!(config.required_manifest_version, 3);
        assert_eq!(config.max_description_length, 150);
        assert_eq!(config.max_entry_count, 10_000);
        assert_eq!(config.max_script_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_manifest_path_suffix_match() {
        let config = VerifyConfig::default();
        assert!(config.is_manifest_path("manifest.json"));
        assert!(config.is_manifest_path("dist/manifest.json"));
        assert!(config.is_manifest_path("a/b/c/manifest.json"));
        assert!(!config.is_manifest_path("manifest.json.bak"));
        assert!(!config.is_manifest_path("package.json"));
    }

    #[test]
    fn test_script_path_suffix_match() {
        let config = VerifyConfig::default();
        assert!(config.is_script_path("background.js"));
        assert!(config.is_script_path("vendor/lib/jquery.min.js"));
        assert!(!config.is_script_path("manifest.json"));
        assert!(!config.is_script_path("module.mjs"));
        assert!(!config.is_script_path("js/"));
    }
}
