//! Console output formatter for tool results

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use mage_scan_domain::{ToolError, ToolResult};

/// Formats tool results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable colored output globally.
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format a result for stdout.
    ///
    /// Text mode prints the tool output as-is (empty for no matches), JSON
    /// mode prints the whole result including metadata and errors.
    pub fn format(result: &ToolResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => result.output().unwrap_or_default().to_string(),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format as JSON
    pub fn format_json(result: &ToolResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a tool error for stderr
    pub fn format_error(error: &ToolError) -> String {
        let mut output = format!(
            "{} {}",
            format!("Error [{}]:", error.code).red().bold(),
            error.message
        );
        if let Some(details) = &error.details {
            output.push('\n');
            output.push_str(&Self::indent(details, "  ").dimmed().to_string());
        }
        output
    }

    /// One-line summary of a result's metadata, for stderr.
    ///
    /// Returns `None` unless the result was cut short by a limit.
    pub fn format_truncation_note(result: &ToolResult) -> Option<String> {
        let meta = &result.metadata;
        if !meta.truncated {
            return None;
        }

        let mut note = format!("results truncated after {} matches", meta.match_count.unwrap_or(0));
        if let Some(files) = meta.files_scanned {
            note.push_str(&format!(" ({} files scanned)", files));
        }
        Some(note.yellow().to_string())
    }

    /// Tool schemas as a JSON array
    pub fn format_schemas(schemas: &[serde_json::Value]) -> String {
        serde_json::to_string_pretty(schemas).unwrap_or_else(|_| "[]".to_string())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
