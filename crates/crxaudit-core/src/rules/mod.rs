//! Store policy checks.
//!
//! Each check is a plain function from the parsed manifest (and, for the
//! script scan, the package) to a [`CheckOutcome`]. Checks never fail: a
//! problem with one input is a warning or a logged skip, so the pipeline
//! always runs every check once the manifest has been parsed.

pub mod csp;
pub mod description;
pub mod permissions;
pub mod scripts;
pub mod version;

pub use csp::check_content_security_policy;
pub use description::check_description_length;
pub use permissions::HOST_PERMISSIONS_WARNING;
pub use permissions::check_permissions;
pub use scripts::check_scripts;
pub use version::check_manifest_version;

use crate::report::CheckStatus;

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Final status, `Success` or `Warning`.
    pub status: CheckStatus,
    /// Messages to append to the report, in order.
    pub warnings: Vec<String>,
    /// Offending file count, for checks that count files.
    pub files_with_issues: Option<usize>,
}

impl CheckOutcome {
    /// A passing outcome with no messages.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: CheckStatus::Success,
            warnings: Vec::new(),
            files_with_issues: None,
        }
    }

    /// A warning outcome with one message.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            warnings: vec![message.into()],
            files_with_issues: None,
        }
    }

    /// Sets the offending file count.
    #[must_use]
    pub fn with_files_with_issues(mut self, count: usize) -> Self {
        self.files_with_issues = Some(count);
        self
    }

    /// Appends another message.
    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }
}
