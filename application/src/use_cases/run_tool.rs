//! Run Tool use case
//!
//! Resolves the host's tool name (canonical or alias), executes the call
//! and logs the outcome.

use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use mage_scan_domain::tool::{entities::ToolCall, value_objects::ToolResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Use case for executing a single host tool call
pub struct RunToolUseCase<E: ToolExecutorPort + 'static> {
    executor: Arc<E>,
}

impl<E: ToolExecutorPort + 'static> RunToolUseCase<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Rewrite an aliased tool name (e.g. `GrepTool`) to its canonical name.
    /// Unknown names pass through so the executor can report them.
    pub fn resolve_tool_call(&self, mut call: ToolCall) -> ToolCall {
        if let Some(canonical) = self.executor.tool_spec().resolve_alias(&call.tool_name)
            && !self.executor.has_tool(&call.tool_name)
        {
            debug!(alias = %call.tool_name, canonical, "Resolved tool alias");
            call.tool_name = canonical.to_string();
        }
        call
    }

    pub async fn execute(&self, call: ToolCall) -> ToolResult {
        let call = self.resolve_tool_call(call);
        let preview = tool_args_preview(&call);
        let start = Instant::now();

        let result = self.executor.execute(&call).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result.error() {
            None => info!(
                tool = %call.tool_name,
                args = %preview,
                matches = result.metadata.match_count.unwrap_or(0),
                elapsed_ms,
                "Tool succeeded"
            ),
            Some(err) => warn!(
                tool = %call.tool_name,
                args = %preview,
                code = %err.code,
                error = %err.message,
                "Tool failed"
            ),
        }

        result
    }
}
