//! Description length policy.

use super::CheckOutcome;
use crate::VerifyConfig;

/// Warns when the description is longer than the configured limit.
///
/// Length is counted in characters, not bytes. The default description
/// substituted for a missing field is measured like any other.
#[must_use]
pub fn check_description_length(description: &str, config: &VerifyConfig) -> CheckOutcome {
    let length = description.chars().count();
    if length > config.max_description_length {
        CheckOutcome::warning(format!(
            "Description is {length} characters long, exceeding the {} character limit",
            config.max_description_length
        ))
    } else {
        CheckOutcome::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DEFAULT_DESCRIPTION;
    use crate::report::CheckStatus;

    #[test]
    fn test_boundary() {
        let config = VerifyConfig::default();
        let at_limit = "a".repeat(150);
        let over_limit = "a".repeat(151);

        assert_eq!(check_description_length(&at_limit, &config).status, CheckStatus::Success);

        let outcome = check_description_length(&over_limit, &config);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("151"));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let config = VerifyConfig::default();
        // 150 two-byte characters: 300 bytes, still within the limit
        let text = "é".repeat(150);
        assert_eq!(text.len(), 300);
        assert_eq!(check_description_length(&text, &config).status, CheckStatus::Success);
    }

    #[test]
    fn test_default_and_empty_descriptions() {
        let config = VerifyConfig::default();
        assert_eq!(
            check_description_length(DEFAULT_DESCRIPTION, &config).status,
            CheckStatus::Success
        );
        assert_eq!(check_description_length("", &config).status, CheckStatus::Success);
    }
}
