//! Script analysis check.

use tracing::debug;
use tracing::warn;

use super::CheckOutcome;
use crate::VerifyConfig;
use crate::archive::ExtensionArchive;
use crate::report::CheckStatus;
use crate::scanner::format_file_warning;
use crate::scanner::scan_script;

/// Scans every script entry and reports one warning per offending file.
///
/// Files are scanned in enumeration order. An entry that cannot be read or
/// decoded as UTF-8, or that exceeds `config.max_script_size`, is skipped
/// and logged; the remaining files are still scanned.
pub fn check_scripts<A>(archive: &mut A, config: &VerifyConfig) -> CheckOutcome
where
    A: ExtensionArchive + ?Sized,
{
    let scripts: Vec<String> = archive
        .paths()
        .iter()
        .filter(|p| config.is_script_path(p))
        .cloned()
        .collect();

    let mut warnings = Vec::new();
    let mut skipped = 0usize;

    for path in &scripts {
        if let Some(size) = archive.entry_size(path)
            && size > config.max_script_size
        {
            warn!(%path, size, max = config.max_script_size, "skipping oversized script");
            skipped += 1;
            continue;
        }

        let text = match archive.read_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(%path, error = %e, "skipping unreadable script");
                skipped += 1;
                continue;
            }
        };

        let findings = scan_script(&text);
        debug!(%path, findings = findings.len(), "scanned script");
        if let Some(message) = format_file_warning(path, &findings) {
            warnings.push(message);
        }
    }

    debug!(
        scanned = scripts.len() - skipped,
        skipped,
        offending = warnings.len(),
        "script analysis complete"
    );

    let files_with_issues = warnings.len();
    let status = if warnings.is_empty() {
        CheckStatus::Success
    } else {
        CheckStatus::Warning
    };

    CheckOutcome {
        status,
        warnings,
        files_with_issues: Some(files_with_issues),
    }
}
