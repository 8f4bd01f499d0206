//! Package container formats.

pub mod detect;

pub use detect::PackageFormat;
pub use detect::detect_format;
pub use detect::has_zip_signature;
pub use detect::zip_payload;
