//! Line-oriented script scanner.
//!
//! Each script line (trimmed) is matched against a fixed table of regular
//! expressions. Matching is purely lexical: obfuscated code slips through
//! and comments or string literals that mention a pattern are reported.
//! Adding a rule means adding a row to [`DETECTORS`]; nothing else changes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// One row of the detector table.
#[derive(Debug, Clone, Copy)]
pub struct DetectorRule {
    /// Stable rule identifier.
    pub name: &'static str,
    /// Regular expression matched against each trimmed line.
    pub pattern: &'static str,
    /// Label placed in front of the matched text in findings.
    pub label: &'static str,
}

/// Detector rules, applied to every line in this order.
pub const DETECTORS: &[DetectorRule] = &[
    DetectorRule {
        name: "arbitrary-code-execution",
        pattern: r"\beval\s*\(|\bnew\s+Function\s*\(",
        label: "Arbitrary code execution",
    },
    DetectorRule {
        name: "script-injection",
        pattern: r"\b(?:chrome|browser)\.(?:scripting|tabs)\.executeScript\s*\(",
        label: "Script injection API",
    },
    DetectorRule {
        name: "remote-module-load",
        pattern: r#"\b(?:import|require|importScripts)\s*\(\s*["'`]https?://[^"'`]*["'`]"#,
        label: "Remote code loading",
    },
    DetectorRule {
        name: "service-worker-registration",
        pattern: r"\bnavigator\.serviceWorker\.register\s*\(",
        label: "Service worker registration (potential remote code channel)",
    },
    DetectorRule {
        name: "remote-script-load",
        pattern: r#"\bloadScript\s*\(\s*["'`][^"'`]*["'`]|\.src\s*=\s*["'`]https?://[^"'`]*["'`]"#,
        label: "Remote script loading",
    },
];

struct CompiledDetector {
    rule: &'static DetectorRule,
    regex: Regex,
}

static COMPILED: LazyLock<Vec<CompiledDetector>> = LazyLock::new(|| {
    DETECTORS
        .iter()
        .filter_map(|rule| match Regex::new(rule.pattern) {
            Ok(regex) => Some(CompiledDetector { rule, regex }),
            Err(e) => {
                tracing::error!(rule = rule.name, error = %e, "detector pattern failed to compile");
                None
            }
        })
        .collect()
});

/// One line-level match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationFinding {
    /// 1-based line number.
    pub line_number: usize,
    /// Rule that matched.
    pub rule: &'static str,
    /// Human-readable message quoting the matched text.
    pub message: String,
}

impl fmt::Display for ViolationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.message)
    }
}

/// Scans script text and returns findings in line order.
///
/// Every detector is tried on every line, so one line can yield several
/// findings; each detector reports at most its first match per line.
///
/// # Examples
///
/// ```
/// use crxaudit_core::scanner::scan_script;
///
/// let findings = scan_script("const x = 1;\neval(userInput);\n");
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].line_number, 2);
/// assert!(findings[0].message.contains("eval("));
/// ```
#[must_use]
pub fn scan_script(text: &str) -> Vec<ViolationFinding> {
    let mut findings = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        for detector in COMPILED.iter() {
            if let Some(m) = detector.regex.find(line) {
                findings.push(ViolationFinding {
                    line_number: i + 1,
                    rule: detector.rule.name,
                    message: format!("{}: \"{}\"", detector.rule.label, m.as_str()),
                });
            }
        }
    }

    findings
}

/// Joins the findings for one file into a single multi-line warning.
///
/// Returns `None` when there are no findings.
#[must_use]
pub fn format_file_warning(path: &str, findings: &[ViolationFinding]) -> Option<String> {
    if findings.is_empty() {
        return None;
    }

    let mut message = format!("Potential policy violations in {path}:");
    for finding in findings {
        message.push_str("\n  ");
        message.push_str(&finding.to_string());
    }
    Some(message)
}
