//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use crxaudit_core::OverallStatus;
use crxaudit_core::VerificationResult;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationOutput<'a> {
    package: String,
    overall_status: OverallStatus,
    #[serde(flatten)]
    result: &'a VerificationResult,
}

impl OutputFormatter for JsonFormatter {
    fn format_verification_result(
        &self,
        package: &Path,
        result: &VerificationResult,
    ) -> Result<()> {
        let data = VerificationOutput {
            package: package.display().to_string(),
            overall_status: result.overall_status(),
            result,
        };

        let output = JsonOutput::success("verify", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("verify", format!("{error:?}"));
        let _ = Self::output(&output);
    }
}
