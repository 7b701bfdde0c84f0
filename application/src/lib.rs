//! Application layer for mage-scan
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_MAX_FILE_SIZE, ScanDefaults};
pub use ports::{
    path_scanner::PathScannerPort, tool_executor::ToolExecutorPort, tool_schema::ToolSchemaPort,
};
pub use use_cases::run_tool::RunToolUseCase;
