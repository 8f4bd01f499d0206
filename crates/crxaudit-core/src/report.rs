//! Verification result model.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// The seven checks every report lists, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckName {
    /// Opening the package container.
    ExtractArchive,
    /// Locating and parsing the manifest.
    ParseManifest,
    /// Manifest version policy.
    ManifestVersion,
    /// Description length policy.
    DescriptionLength,
    /// Script pattern scan.
    ScriptAnalysis,
    /// Content security policy review.
    ContentSecurityPolicy,
    /// Permission and host permission review.
    Permissions,
}

impl CheckName {
    /// All checks in report order.
    pub const ALL: [Self; 7] = [
        Self::ExtractArchive,
        Self::ParseManifest,
        Self::ManifestVersion,
        Self::DescriptionLength,
        Self::ScriptAnalysis,
        Self::ContentSecurityPolicy,
        Self::Permissions,
    ];

    /// Human-readable check name shown in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtractArchive => "Extract archive",
            Self::ParseManifest => "Parse manifest.json",
            Self::ManifestVersion => "Check manifest version",
            Self::DescriptionLength => "Check description length",
            Self::ScriptAnalysis => "Analyze JavaScript files",
            Self::ContentSecurityPolicy => "Check content security policy",
            Self::Permissions => "Review permissions",
        }
    }

    /// Position of this check in the report.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of one check.
///
/// A check starts `Pending` and moves to exactly one final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Not run (yet, or because an earlier stage aborted).
    #[default]
    Pending,
    /// Passed.
    Success,
    /// Ran and produced findings.
    Warning,
    /// Failed fatally.
    Error,
}

impl CheckStatus {
    /// Returns `true` once the check has left `Pending`.
    #[must_use]
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One row of the check list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckEntry {
    /// Which check this row reports.
    #[serde(skip)]
    pub check: CheckName,
    /// Display name.
    pub name: &'static str,
    /// Current status.
    pub status: CheckStatus,
    /// Number of offending files, for checks that count them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_with_issues: Option<usize>,
}

impl CheckEntry {
    fn pending(check: CheckName) -> Self {
        Self {
            check,
            name: check.label(),
            status: CheckStatus::Pending,
            files_with_issues: None,
        }
    }
}

/// Overall verdict derived from the check statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every check that ran succeeded.
    Pass,
    /// At least one check produced warnings, none failed.
    Warning,
    /// At least one check failed.
    Fail,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Compliance report for one extension package.
///
/// Built incrementally by the pipeline and handed to the caller as a
/// finished value. `warnings` and `errors` only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Number of entries in the package, directories included.
    pub total_files: usize,
    /// The seven checks in fixed order.
    pub checks: Vec<CheckEntry>,
    /// Non-fatal findings in the order they were produced.
    pub warnings: Vec<String>,
    /// Fatal errors in the order they were produced.
    pub errors: Vec<String>,
    /// Declared manifest version (0 until the manifest is parsed).
    pub manifest_version: i64,
    /// Manifest description (empty until the manifest is parsed).
    pub description: String,
    /// Requested API permissions.
    pub permissions: Vec<String>,
    /// Requested host permissions.
    pub host_permissions: Vec<String>,
    /// Extension name, if the manifest declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_name: Option<String>,
    /// Extension version, if the manifest declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_version: Option<String>,
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationResult {
    /// Creates a report with every check pending and all fields defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_files: 0,
            checks: CheckName::ALL.into_iter().map(CheckEntry::pending).collect(),
            warnings: Vec::new(),
            errors: Vec::new(),
            manifest_version: 0,
            description: String::new(),
            permissions: Vec::new(),
            host_permissions: Vec::new(),
            extension_name: None,
            extension_version: None,
        }
    }

    /// Returns the entry for `check`.
    #[must_use]
    pub fn check(&self, check: CheckName) -> &CheckEntry {
        &self.checks[check.index()]
    }

    /// Returns the status of `check`.
    #[must_use]
    pub fn status(&self, check: CheckName) -> CheckStatus {
        self.check(check).status
    }

    /// Moves `check` out of `Pending`.
    ///
    /// Transitions from a final state are ignored.
    pub(crate) fn finish(
        &mut self,
        check: CheckName,
        status: CheckStatus,
        files_with_issues: Option<usize>,
    ) {
        let entry = &mut self.checks[check.index()];
        if entry.status.is_final() {
            debug!(check = %check, from = %entry.status, to = %status, "ignoring repeated transition");
            return;
        }
        entry.status = status;
        entry.files_with_issues = files_with_issues;
    }

    /// Appends a warning message.
    pub(crate) fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Appends an error message.
    pub(crate) fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Returns whether any warnings were produced.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns whether any errors were produced.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Overall verdict: `Fail` if any check errored, else `Warning` if any
    /// check warned, else `Pass`.
    #[must_use]
    pub fn overall_status(&self) -> OverallStatus {
        let statuses = || self.checks.iter().map(|c| c.status);
        if statuses().any(|s| s == CheckStatus::Error) {
            OverallStatus::Fail
        } else if statuses().any(|s| s == CheckStatus::Warning) {
            OverallStatus::Warning
        } else {
            OverallStatus::Pass
        }
    }

    /// Returns `true` if every check ran and none produced findings.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.checks.iter().all(|c| c.status == CheckStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_all_pending_in_order() {
        let result = VerificationResult::new();
        assert_eq!(result.checks.len(), 7);
        for (entry, name) in result.checks.iter().zip(CheckName::ALL) {
            assert_eq!(entry.check, name);
            assert_eq!(entry.name, name.label());
            assert_eq!(entry.status, CheckStatus::Pending);
            assert_eq!(entry.files_with_issues, None);
        }
        assert_eq!(result.checks[1].name, "Parse manifest.json");
        assert_eq!(result.checks[2].name, "Check manifest version");
    }

    #[test]
    fn test_finish_is_single_transition() {
        let mut result = VerificationResult::new();
        result.finish(CheckName::Permissions, CheckStatus::Warning, Some(1));
        result.finish(CheckName::Permissions, CheckStatus::Success, None);
        let entry = result.check(CheckName::Permissions);
        assert_eq!(entry.status, CheckStatus::Warning);
        assert_eq!(entry.files_with_issues, Some(1));
    }

    #[test]
    fn test_overall_status() {
        let mut result = VerificationResult::new();
        assert_eq!(result.overall_status(), OverallStatus::Pass);
        assert!(!result.is_compliant());

        result.finish(CheckName::ManifestVersion, CheckStatus::Warning, None);
        assert_eq!(result.overall_status(), OverallStatus::Warning);

        result.finish(CheckName::ParseManifest, CheckStatus::Error, None);
        assert_eq!(result.overall_status(), OverallStatus::Fail);
    }

    #[test]
    fn test_is_compliant_requires_all_success() {
        let mut result = VerificationResult::new();
        for name in CheckName::ALL {
            result.finish(name, CheckStatus::Success, None);
        }
        assert!(result.is_compliant());
        assert_eq!(result.overall_status(), OverallStatus::Pass);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CheckStatus::Pending.to_string(), "pending");
        assert_eq!(CheckStatus::Error.to_string(), "error");
        assert_eq!(OverallStatus::Fail.to_string(), "FAIL");
        assert_eq!(CheckName::ScriptAnalysis.to_string(), "Analyze JavaScript files");
    }

    #[test]
    fn test_serialize_camel_case() {
        let mut result = VerificationResult::new();
        result.finish(CheckName::ScriptAnalysis, CheckStatus::Warning, Some(2));
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["totalFiles"], 0);
        assert_eq!(json["manifestVersion"], 0);
        assert!(json["hostPermissions"].is_array());
        assert_eq!(json["checks"][4]["status"], "warning");
        assert_eq!(json["checks"][4]["filesWithIssues"], 2);
        assert!(json["checks"][0].get("filesWithIssues").is_none());
        assert!(json.get("extensionName").is_none());
    }
}
