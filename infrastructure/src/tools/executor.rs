//! Local tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! [`LocalToolExecutor`] bridges host tool calls to the local filesystem
//! scanner. Every call is checked against its [`ToolDefinition`] before
//! it is routed:
//!
//! ```text
//! ToolExecutorPort::execute() / execute_sync()
//!   ├─ unknown tool          → NOT_FOUND
//!   ├─ invalid arguments     → INVALID_ARGUMENT
//!   ├─ glob_search           → search::execute_glob_search()
//!   └─ grep_search           → search::execute_grep_search()
//! ```
//!
//! Scans are synchronous; the async path runs them inline.

use async_trait::async_trait;
use mage_scan_application::{ScanDefaults, ToolExecutorPort};
use mage_scan_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};

use super::search;
use crate::scanner::LocalPathScanner;

/// Executor that runs scan tools on the local machine.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    /// Available tools
    tool_spec: ToolSpec,
    /// Filesystem scanner shared by both tools
    scanner: LocalPathScanner,
    /// Caps used when a call leaves them out
    defaults: ScanDefaults,
}

impl LocalToolExecutor {
    /// Create an executor with the default tool spec and scan defaults.
    pub fn new(defaults: ScanDefaults) -> Self {
        Self::with_tools(super::default_tool_spec(), defaults)
    }

    /// Create an executor with a custom tool spec
    pub fn with_tools(tool_spec: ToolSpec, defaults: ScanDefaults) -> Self {
        Self {
            tool_spec,
            scanner: LocalPathScanner::new(&defaults),
            defaults,
        }
    }

    pub fn scanner(&self) -> &LocalPathScanner {
        &self.scanner
    }

    fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        let definition = match self.tool_spec.get(&call.tool_name) {
            Some(d) => d,
            None => {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::not_found(format!("Unknown tool: {}", call.tool_name)),
                );
            }
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        match call.tool_name.as_str() {
            search::GLOB_SEARCH => search::execute_glob_search(&self.scanner, &self.defaults, call),
            search::GREP_SEARCH => search::execute_grep_search(&self.scanner, &self.defaults, call),
            _ => ToolResult::failure(
                &call.tool_name,
                ToolError::execution_failed(format!(
                    "Tool '{}' is not implemented",
                    call.tool_name
                )),
            ),
        }
    }
}

impl Default for LocalToolExecutor {
    fn default() -> Self {
        Self::new(ScanDefaults::default())
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }

    fn execute_sync(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }
}
