//! Browser extension package verification against store policy.
//!
//! `crxaudit-core` inspects a packaged extension (ZIP or CRX) and produces a
//! compliance report: manifest v3 rules, description length, permission and
//! host permission review, content security policy inspection, and a
//! line-oriented scan of script files for disallowed code patterns.
//!
//! Detection is pattern based. It is not a static analyzer and will produce
//! both false positives and false negatives.
//!
//! # Examples
//!
//! ```no_run
//! use crxaudit_core::VerifyConfig;
//! use crxaudit_core::verify_extension_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VerifyConfig::default();
//! let result = verify_extension_file("extension.crx", &config)?;
//! println!("{}: {} warnings", result.overall_status(), result.warnings.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod formats;
pub mod inspection;
pub mod manifest;
pub mod report;
pub mod rules;
pub mod scanner;
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use config::VerifyConfig;
pub use error::Result;
pub use error::VerifyError;
pub use inspection::verify_archive;
pub use inspection::verify_extension;
pub use inspection::verify_extension_file;
pub use manifest::Manifest;
pub use report::CheckEntry;
pub use report::CheckName;
pub use report::CheckStatus;
pub use report::OverallStatus;
pub use report::VerificationResult;
pub use scanner::ViolationFinding;
