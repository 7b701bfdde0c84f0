//! CLI entrypoint for mage-scan
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow};
use clap::Parser;
use mage_scan_application::{RunToolUseCase, ToolExecutorPort, ToolSchemaPort};
use mage_scan_infrastructure::{ConfigLoader, JsonSchemaToolConverter, LocalToolExecutor};
use mage_scan_presentation::{Cli, ConsoleFormatter, OutputFormat};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; stdout is reserved for results
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    for issue in config.validate() {
        warn!(field = %issue.field, "{}", issue.message);
    }

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let mut defaults = config.to_scan_defaults();
    if let Some(workspace) = &cli.workspace {
        defaults = defaults.with_workspace_root(workspace);
    }
    debug!(workspace = %defaults.workspace_root.display(), "Scan defaults resolved");

    // === Dependency Injection ===
    let executor = Arc::new(LocalToolExecutor::new(defaults));

    let Some(call) = cli.command.to_tool_call() else {
        let schemas = JsonSchemaToolConverter.all_tools_schema(executor.tool_spec());
        println!("{}", ConsoleFormatter::format_schemas(&schemas));
        return Ok(ExitCode::SUCCESS);
    };

    let use_case = RunToolUseCase::new(executor);
    let result = use_case.execute(call).await;

    if let Some(error) = result.error() {
        if cli.output == OutputFormat::Json {
            println!("{}", ConsoleFormatter::format_json(&result));
        } else {
            eprintln!("{}", ConsoleFormatter::format_error(error));
        }
        return Ok(ExitCode::FAILURE);
    }

    let output = ConsoleFormatter::format(&result, cli.output);
    if !output.is_empty() {
        println!("{}", output);
    }

    if cli.output == OutputFormat::Text
        && let Some(note) = ConsoleFormatter::format_truncation_note(&result)
    {
        eprintln!("{}", note);
    }

    Ok(ExitCode::SUCCESS)
}
