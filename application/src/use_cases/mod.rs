//! Use cases (application services)

pub mod run_tool;
pub(crate) mod tool_helpers;
