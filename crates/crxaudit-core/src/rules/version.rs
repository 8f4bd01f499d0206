//! Manifest version policy.

use super::CheckOutcome;
use crate::VerifyConfig;
use crate::manifest::Manifest;

/// Warns unless the manifest declares the required version.
#[must_use]
pub fn check_manifest_version(manifest: &Manifest, config: &VerifyConfig) -> CheckOutcome {
    if manifest.manifest_version == config.required_manifest_version {
        CheckOutcome::success()
    } else {
        CheckOutcome::warning(format!(
            "Manifest version is {}, but version {} is required",
            manifest.manifest_version, config.required_manifest_version
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DEFAULT_DESCRIPTION;
    use crate::manifest::ManifestVersion;
    use crate::report::CheckStatus;
    use serde_json::Value;

    fn manifest(version: i64) -> Manifest {
        with_version(ManifestVersion::Integer(version))
    }

    fn with_version(manifest_version: ManifestVersion) -> Manifest {
        Manifest {
            manifest_version,
            name: None,
            version: None,
            description: DEFAULT_DESCRIPTION.to_string(),
            permissions: Vec::new(),
            host_permissions: Vec::new(),
            content_security_policy: None,
        }
    }

    #[test]
    fn test_version_three_passes() {
        let outcome = check_manifest_version(&manifest(3), &VerifyConfig::default());
        assert_eq!(outcome, CheckOutcome::success());
    }

    #[test]
    fn test_other_versions_warn_with_value() {
        for version in [0, 1, 2, 4, -3] {
            let outcome = check_manifest_version(&manifest(version), &VerifyConfig::default());
            assert_eq!(outcome.status, CheckStatus::Warning);
            assert_eq!(outcome.warnings.len(), 1);
            assert!(outcome.warnings[0].contains(&format!("is {version},")));
        }
    }

    #[test]
    fn test_non_integer_version_quoted_verbatim() {
        let declared = ManifestVersion::Other(Value::String("3".into()));
        let outcome = check_manifest_version(&with_version(declared), &VerifyConfig::default());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(
            outcome.warnings,
            [r#"Manifest version is "3", but version 3 is required"#]
        );
    }
}
