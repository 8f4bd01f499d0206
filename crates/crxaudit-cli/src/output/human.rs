//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::StyledObject;
use console::Term;
use console::style;
use crxaudit_core::CheckEntry;
use crxaudit_core::CheckName;
use crxaudit_core::CheckStatus;
use crxaudit_core::OverallStatus;
use crxaudit_core::VerificationResult;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    const fn status_symbol(status: CheckStatus) -> &'static str {
        match status {
            CheckStatus::Pending => "-",
            CheckStatus::Success => "✓",
            CheckStatus::Warning => "⚠",
            CheckStatus::Error => "✗",
        }
    }

    fn styled_symbol(status: CheckStatus) -> StyledObject<&'static str> {
        let symbol = style(Self::status_symbol(status));
        match status {
            CheckStatus::Pending => symbol.dim(),
            CheckStatus::Success => symbol.green().bold(),
            CheckStatus::Warning => symbol.yellow().bold(),
            CheckStatus::Error => symbol.red().bold(),
        }
    }

    fn check_line(&self, entry: &CheckEntry) -> String {
        let symbol = if self.use_colors {
            Self::styled_symbol(entry.status).to_string()
        } else {
            format!("[{}]", Self::status_symbol(entry.status))
        };

        match entry.files_with_issues {
            Some(count) if count > 0 => format!(
                "  {symbol} {} ({} with issues)",
                entry.name,
                Self::format_number(count)
            ),
            _ => format!("  {symbol} {}", entry.name),
        }
    }

    // Only the entry quota rejects a package after its entries are counted.
    fn hint(result: &VerificationResult) -> Option<&'static str> {
        (result.status(CheckName::ExtractArchive) == CheckStatus::Error && result.total_files > 0)
            .then_some("HINT: Use --max-entries to raise the entry limit.")
    }

    fn write_section(&self, title: &str, lines: &[String], colored: StyledObject<&str>) {
        if lines.is_empty() {
            return;
        }

        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self.term.write_line(&format!("{colored}"));
        } else {
            let _ = self.term.write_line(title);
        }
        for line in lines {
            for (i, part) in line.lines().enumerate() {
                let prefix = if i == 0 { "  - " } else { "    " };
                let _ = self.term.write_line(&format!("{prefix}{part}"));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_verification_result(
        &self,
        package: &Path,
        result: &VerificationResult,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let status = result.overall_status();
        if self.use_colors {
            let status_str = match status {
                OverallStatus::Pass => style("PASSED").green().bold(),
                OverallStatus::Warning => style("WARNING").yellow().bold(),
                OverallStatus::Fail => style("FAILED").red().bold(),
            };
            let _ = self.term.write_line(&format!(
                "Extension verification: {status_str} ({})",
                package.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Extension verification: {status} ({})",
                package.display()
            ));
        }

        if let Some(name) = &result.extension_name {
            let version = result.extension_version.as_deref().unwrap_or("?");
            let _ = self
                .term
                .write_line(&format!("  Extension: {name} {version}"));
        }
        let _ = self.term.write_line(&format!(
            "  Total files: {}",
            Self::format_number(result.total_files)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Manifest version: {}", result.manifest_version));
            if !result.description.is_empty() {
                let _ = self
                    .term
                    .write_line(&format!("  Description: {}", result.description));
            }
            if !result.permissions.is_empty() {
                let _ = self.term.write_line(&format!(
                    "  Permissions: {}",
                    result.permissions.join(", ")
                ));
            }
            if !result.host_permissions.is_empty() {
                let _ = self.term.write_line(&format!(
                    "  Host permissions: {}",
                    result.host_permissions.join(", ")
                ));
            }
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line("Checks:");
        for entry in &result.checks {
            let _ = self.term.write_line(&self.check_line(entry));
        }

        self.write_section(
            "Warnings:",
            &result.warnings,
            style("Warnings:").yellow().bold(),
        );
        self.write_section("Errors:", &result.errors, style("Errors:").red().bold());
        if let Some(hint) = Self::hint(result) {
            let _ = self.term.write_line(hint);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crxaudit_core::VerifyConfig;
    use crxaudit_core::test_utils::create_test_zip;
    use crxaudit_core::verify_extension;

    fn plain() -> HumanFormatter {
        HumanFormatter {
            verbose: false,
            quiet: false,
            use_colors: false,
            term: Term::stdout(),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_check_line_plain() {
        let entry = CheckEntry {
            check: CheckName::ScriptAnalysis,
            name: CheckName::ScriptAnalysis.label(),
            status: CheckStatus::Warning,
            files_with_issues: Some(2),
        };
        assert_eq!(
            plain().check_line(&entry),
            "  [⚠] Analyze JavaScript files (2 with issues)"
        );
    }

    #[test]
    fn test_check_line_hides_zero_count() {
        let entry = CheckEntry {
            check: CheckName::ScriptAnalysis,
            name: CheckName::ScriptAnalysis.label(),
            status: CheckStatus::Success,
            files_with_issues: Some(0),
        };
        assert_eq!(plain().check_line(&entry), "  [✓] Analyze JavaScript files");
    }

    #[test]
    fn test_quota_hint() {
        let zip = create_test_zip(&[("manifest.json", "{}"), ("a.js", ""), ("b.js", "")]);
        let limited = VerifyConfig {
            max_entry_count: 2,
            ..VerifyConfig::default()
        };
        let result = verify_extension(&zip, &limited);
        assert_eq!(
            HumanFormatter::hint(&result),
            Some("HINT: Use --max-entries to raise the entry limit.")
        );

        let corrupt = verify_extension(b"not a package", &VerifyConfig::default());
        assert_eq!(HumanFormatter::hint(&corrupt), None);
    }
}
