//! Extension package inspection.
//!
//! This module runs the store policy pipeline over a package without
//! extracting anything to disk.
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
//! println!("Package contains {} entries", result.total_files);
//! for check in &result.checks {
//!     println!("{}: {}", check.name, check.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod verify;

pub use verify::verify_archive;
pub use verify::verify_extension;
pub use verify::verify_extension_file;
