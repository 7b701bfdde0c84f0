//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use mage_scan_domain::ToolCall;
use std::path::PathBuf;

/// Output format for tool results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain tool output, one entry per line
    Text,
    /// The full tool result as JSON
    Json,
}

/// CLI arguments for mage-scan
#[derive(Parser, Debug)]
#[command(name = "mage-scan")]
#[command(author, version, about = "Workspace path and content search tools")]
#[command(long_about = r#"
mage-scan finds files by glob pattern and lines by regular expression
inside a workspace directory.

Glob results are ordered by modification time, newest first.
Content results are ordered by path, then line number.

Configuration is merged from (highest priority first):
1. MAGE_SCAN_* environment variables ("__" separates sections)
2. MAGE_WORKSPACE_PATH  Workspace root set by the host
3. --config <path>      Explicit config file
4. ./mage-scan.toml or ./.mage-scan.toml   Project-level config
5. ~/.config/mage-scan/config.toml         Global config
6. Built-in defaults

Example:
  mage-scan glob "**/*.rs" --max-results 20
  mage-scan grep "^def " --include "*.py" --path src
  mage-scan --output json grep "TODO" -i --content
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workspace root that relative search paths resolve against
    #[arg(long, value_name = "DIR", global = true)]
    pub workspace: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find files whose paths match a glob pattern
    Glob(GlobArgs),
    /// Find lines matching a regular expression
    Grep(GrepArgs),
    /// Print the JSON Schema of every tool
    Tools,
}

#[derive(Args, Debug)]
pub struct GlobArgs {
    /// Glob pattern, e.g. "**/*.rs"
    pub pattern: String,

    /// Directory to search (defaults to the workspace root)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Maximum number of paths to return
    #[arg(long, value_name = "N")]
    pub max_results: Option<usize>,

    /// Print absolute paths instead of root-relative ones
    #[arg(long)]
    pub absolute: bool,
}

#[derive(Args, Debug)]
pub struct GrepArgs {
    /// Regular expression to search for
    pub pattern: String,

    /// Only scan files matching this glob, e.g. "*.py"
    #[arg(long, value_name = "GLOB")]
    pub include: Option<String>,

    /// Directory or file to search (defaults to the workspace root)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Maximum number of matching lines to return
    #[arg(long, value_name = "N")]
    pub max_results: Option<usize>,

    /// Maximum number of files to scan
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Match case-insensitively
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Include the matched line text in the output
    #[arg(long)]
    pub content: bool,

    /// Print absolute paths instead of root-relative ones
    #[arg(long)]
    pub absolute: bool,
}

impl Command {
    /// Build the tool call this command stands for.
    ///
    /// Calls use the short aliases (`glob`, `grep`), the same way a host
    /// passes its own tool names. Returns `None` for `tools`.
    pub fn to_tool_call(&self) -> Option<ToolCall> {
        match self {
            Command::Glob(args) => Some(args.to_tool_call()),
            Command::Grep(args) => Some(args.to_tool_call()),
            Command::Tools => None,
        }
    }
}

impl GlobArgs {
    pub fn to_tool_call(&self) -> ToolCall {
        let mut call = ToolCall::new("glob").with_arg("pattern", self.pattern.as_str());
        if let Some(path) = &self.path {
            call = call.with_arg("path", path.to_string_lossy().into_owned());
        }
        if let Some(max) = self.max_results {
            call = call.with_arg("max_results", max);
        }
        if self.absolute {
            call = call.with_arg("absolute_paths", true);
        }
        call
    }
}

impl GrepArgs {
    pub fn to_tool_call(&self) -> ToolCall {
        let mut call = ToolCall::new("grep").with_arg("pattern", self.pattern.as_str());
        if let Some(include) = &self.include {
            call = call.with_arg("include", include.as_str());
        }
        if let Some(path) = &self.path {
            call = call.with_arg("path", path.to_string_lossy().into_owned());
        }
        if let Some(max) = self.max_results {
            call = call.with_arg("max_results", max);
        }
        if let Some(max) = self.max_files {
            call = call.with_arg("max_files", max);
        }
        if self.ignore_case {
            call = call.with_arg("case_insensitive", true);
        }
        if self.content {
            call = call.with_arg("show_content", true);
        }
        if self.absolute {
            call = call.with_arg("absolute_paths", true);
        }
        call
    }
}
