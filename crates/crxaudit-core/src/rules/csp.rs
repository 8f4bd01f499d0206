//! Content security policy review.

use std::sync::LazyLock;

use regex::Regex;

use super::CheckOutcome;
use crate::manifest::ContentSecurityPolicy;

/// Directives whose sources are inspected in `extension_pages`.
pub const INSPECTED_DIRECTIVES: [&str; 3] = ["script-src", "object-src", "worker-src"];

/// Source tokens that make an inspected directive acceptable.
pub const PERMITTED_SOURCES: [&str; 3] = ["'self'", "'none'", "'wasm-unsafe-eval'"];

static DIRECTIVE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    INSPECTED_DIRECTIVES
        .iter()
        .filter_map(|&name| {
            let pattern = format!(r"(?:^|[;\s]){}\s+([^;]+)", regex::escape(name));
            match Regex::new(&pattern) {
                Ok(regex) => Some((name, regex)),
                Err(e) => {
                    tracing::error!(directive = name, error = %e, "directive pattern failed to compile");
                    None
                }
            }
        })
        .collect()
});

/// Reviews a custom content security policy.
///
/// Any declared policy is a warning, reported verbatim. For a manifest v3
/// `extension_pages` policy, each inspected directive whose value contains
/// none of [`PERMITTED_SOURCES`] is listed in one extra warning. The token
/// test is a plain substring match.
#[must_use]
pub fn check_content_security_policy(csp: Option<&ContentSecurityPolicy>) -> CheckOutcome {
    let Some(csp) = csp else {
        return CheckOutcome::success();
    };

    let mut outcome = CheckOutcome::warning(format!(
        "Custom content security policy detected: {}",
        csp.to_json()
    ));

    if let Some(policy) = csp.extension_pages() {
        let disallowed = disallowed_directives(policy);
        if !disallowed.is_empty() {
            outcome = outcome.with_warning(format!(
                "Content security policy allows disallowed sources in: {}",
                disallowed.join(", ")
            ));
        }
    }

    outcome
}

/// Returns the inspected directives in `policy` that permit none of the
/// allowed sources, in inspection order.
#[must_use]
pub fn disallowed_directives(policy: &str) -> Vec<&'static str> {
    DIRECTIVE_PATTERNS
        .iter()
        .filter(|(_, regex)| {
            regex
                .captures(policy)
                .and_then(|c| c.get(1))
                .is_some_and(|value| {
                    !PERMITTED_SOURCES
                        .iter()
                        .any(|token| value.as_str().contains(token))
                })
        })
        .map(|&(name, _)| name)
        .collect()
}
