//! Verification pipeline.

use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::info_span;

use crate::Result;
use crate::VerifyConfig;
use crate::VerifyError;
use crate::archive::ExtensionArchive;
use crate::archive::ZipPackage;
use crate::manifest::load_manifest;
use crate::report::CheckName;
use crate::report::CheckStatus;
use crate::report::VerificationResult;
use crate::rules::CheckOutcome;
use crate::rules::check_content_security_policy;
use crate::rules::check_description_length;
use crate::rules::check_manifest_version;
use crate::rules::check_permissions;
use crate::rules::check_scripts;

/// Verifies an extension package given as raw bytes.
///
/// Accepts plain ZIP files and CRX2/CRX3 packages. Runs, in order:
/// - archive extraction
/// - manifest location and parsing
/// - manifest version, description length, script analysis, content
///   security policy and permission checks
///
/// Never fails: an unreadable archive or a missing/malformed manifest is
/// recorded as an error on the returned result, the failing check is set to
/// [`CheckStatus::Error`] and every later check stays
/// [`CheckStatus::Pending`]. Every check after manifest parsing always runs.
///
/// # Examples
///
/// ```no_run
/// use crxaudit_core::OverallStatus;
/// use crxaudit_core::VerifyConfig;
/// use crxaudit_core::verify_extension;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("extension.zip")?;
/// let result = verify_extension(&bytes, &VerifyConfig::default());
///
/// if result.overall_status() == OverallStatus::Pass {
///     println!("Extension complies with store policy");
/// } else {
///     for warning in &result.warnings {
///         eprintln!("warning: {warning}");
///     }
///     for error in &result.errors {
///         eprintln!("error: {error}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn verify_extension(data: &[u8], config: &VerifyConfig) -> VerificationResult {
    let mut package = match ZipPackage::open(data, config) {
        Ok(package) => package,
        Err(e) => {
            let mut result = VerificationResult::new();
            // The central directory was read before the quota rejected it.
            if let VerifyError::QuotaExceeded { entries, .. } = &e {
                result.total_files = *entries;
            }
            abort(&mut result, CheckName::ExtractArchive, &e);
            return result;
        }
    };

    verify_archive(&mut package, config)
}

/// Reads a package from disk and verifies it.
///
/// # Errors
///
/// Returns [`VerifyError::Io`] only if the file cannot be read. All
/// verification problems are reported on the returned result.
pub fn verify_extension_file<P: AsRef<Path>>(
    path: P,
    config: &VerifyConfig,
) -> Result<VerificationResult> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading package");
    let data = std::fs::read(path)?;
    Ok(verify_extension(&data, config))
}

/// Verifies an already opened package.
///
/// The extraction check is recorded as successful and `total_files` is set
/// from the package before the manifest is read.
pub fn verify_archive<A>(archive: &mut A, config: &VerifyConfig) -> VerificationResult
where
    A: ExtensionArchive + ?Sized,
{
    let _span = info_span!("verify", entries = archive.len()).entered();

    let mut result = VerificationResult::new();
    result.total_files = archive.len();
    result.finish(CheckName::ExtractArchive, CheckStatus::Success, None);

    let manifest = match load_manifest(archive, config) {
        Ok((_, manifest)) => manifest,
        Err(e) => {
            abort(&mut result, CheckName::ParseManifest, &e);
            return result;
        }
    };
    result.finish(CheckName::ParseManifest, CheckStatus::Success, None);
    result.manifest_version = manifest.manifest_version.as_integer().unwrap_or(0);
    result.description.clone_from(&manifest.description);
    result.extension_name.clone_from(&manifest.name);
    result.extension_version.clone_from(&manifest.version);

    apply(
        &mut result,
        CheckName::ManifestVersion,
        check_manifest_version(&manifest, config),
    );
    apply(
        &mut result,
        CheckName::DescriptionLength,
        check_description_length(&manifest.description, config),
    );
    apply(
        &mut result,
        CheckName::ScriptAnalysis,
        check_scripts(archive, config),
    );
    apply(
        &mut result,
        CheckName::ContentSecurityPolicy,
        check_content_security_policy(manifest.content_security_policy.as_ref()),
    );

    result.permissions.clone_from(&manifest.permissions);
    result.host_permissions.clone_from(&manifest.host_permissions);
    apply(
        &mut result,
        CheckName::Permissions,
        check_permissions(&manifest.permissions, &manifest.host_permissions),
    );

    info!(
        status = %result.overall_status(),
        warnings = result.warnings.len(),
        "verification complete"
    );

    result
}

fn apply(result: &mut VerificationResult, check: CheckName, outcome: CheckOutcome) {
    debug!(check = %check, status = %outcome.status, "check finished");
    result.finish(check, outcome.status, outcome.files_with_issues);
    for warning in outcome.warnings {
        result.add_warning(warning);
    }
}

fn abort(result: &mut VerificationResult, check: CheckName, error: &VerifyError) {
    tracing::warn!(
        check = %check,
        path = error.entry_path(),
        terminal = error.is_terminal(),
        error = %error,
        "verification aborted"
    );
    result.finish(check, CheckStatus::Error, None);
    result.add_error(error.to_string());
}
