//! Permission review.

use super::CheckOutcome;

/// Warning issued when host permissions are requested.
pub const HOST_PERMISSIONS_WARNING: &str = "Host permissions requested: the extension will be \
                                            subject to an extended review before publication";

/// Reviews requested permissions.
///
/// Host permissions take precedence: when both lists are non-empty only the
/// host permission warning is issued. Either warning counts as one file with
/// issues (the manifest).
#[must_use]
pub fn check_permissions(permissions: &[String], host_permissions: &[String]) -> CheckOutcome {
    if !host_permissions.is_empty() {
        CheckOutcome::warning(HOST_PERMISSIONS_WARNING).with_files_with_issues(1)
    } else if !permissions.is_empty() {
        CheckOutcome::warning(format!(
            "Permissions requested: {}",
            permissions.join(", ")
        ))
        .with_files_with_issues(1)
    } else {
        CheckOutcome::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_no_permissions() {
        assert_eq!(check_permissions(&[], &[]), CheckOutcome::success());
    }

    #[test]
    fn test_host_permissions_only() {
        let outcome = check_permissions(&[], &strings(&["https://*/*"]));
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.files_with_issues, Some(1));
        assert_eq!(outcome.warnings, [HOST_PERMISSIONS_WARNING]);
    }

    #[test]
    fn test_host_permissions_take_precedence() {
        let outcome = check_permissions(&strings(&["tabs"]), &strings(&["<all_urls>"]));
        assert_eq!(outcome.warnings, [HOST_PERMISSIONS_WARNING]);
        assert_eq!(outcome.files_with_issues, Some(1));
    }

    #[test]
    fn test_permissions_listed() {
        let outcome = check_permissions(&strings(&["tabs", "storage", "cookies"]), &[]);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.files_with_issues, Some(1));
        assert_eq!(outcome.warnings, ["Permissions requested: tabs, storage, cookies"]);
    }
}
