//! Infrastructure layer for mage-scan
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the local filesystem scanner, the tool
//! executor, and configuration file loading.

pub mod config;
pub mod scanner;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig};
pub use scanner::LocalPathScanner;
pub use tools::{JsonSchemaToolConverter, LocalToolExecutor, default_tool_spec};
