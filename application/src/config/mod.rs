//! Application-level configuration.
//!
//! - [`ScanDefaults`]: workspace root and default caps for the scanner

pub mod scan_defaults;

pub use scan_defaults::{DEFAULT_MAX_FILE_SIZE, ScanDefaults};
