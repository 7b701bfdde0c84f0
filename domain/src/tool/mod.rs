//! Tool domain module
//!
//! Defines how the host invokes tools: every tool is described by a
//! [`ToolDefinition`] (name, parameters, risk level), invoked via a
//! [`ToolCall`], and answers with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "GrepTool" → "grep_search"
//!        └─ tools:   "grep_search" → ToolDefinition
//! ```
//!
//! The host historically called the scanner as `GlobTool` / `GrepTool`.
//! Those names are kept as aliases in [`ToolSpec`] so old call sites
//! resolve to the canonical tools without extra configuration.

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
