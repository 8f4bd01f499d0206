//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use crxaudit_core::OverallStatus;
use crxaudit_core::VerifyConfig;
use crxaudit_core::verify_extension_file;
use tracing::debug;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let defaults = VerifyConfig::default();
    let config = VerifyConfig {
        max_entry_count: args.max_entries,
        max_script_size: args.max_script_size.unwrap_or(defaults.max_script_size),
        max_description_length: args.max_description_length,
        ..defaults
    };
    debug!(package = %args.package.display(), strict = args.strict, "verifying package");

    let result = add_package_context(verify_extension_file(&args.package, &config), &args.package)?;

    formatter.format_verification_result(&args.package, &result)?;

    match result.overall_status() {
        OverallStatus::Pass => Ok(()),
        OverallStatus::Warning if !args.strict => Ok(()),
        OverallStatus::Warning => bail!("Package verification produced warnings (strict mode)"),
        OverallStatus::Fail => bail!("Package verification failed"),
    }
}
