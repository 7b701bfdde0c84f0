//! Domain layer for mage-scan
//!
//! Core entities and value objects with no I/O: the tool vocabulary the
//! host speaks (definitions, calls, results) and the path scanning model
//! (requests, matches, validation errors).

pub mod scan;
pub mod tool;

pub use scan::{
    GlobMatch, GlobOutcome, GlobRequest, GrepOutcome, GrepRequest, LineMatch, RenderOptions,
    ScanError, ScanStop,
};
pub use tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
