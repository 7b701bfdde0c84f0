//! Search tools: glob_search, grep_search
//!
//! Adapters between host tool calls and the [`PathScannerPort`]. They turn
//! loosely typed arguments into validated requests, run the scan and
//! render the outcome as newline-separated text.

use mage_scan_application::{PathScannerPort, ScanDefaults};
use mage_scan_domain::scan::{GlobRequest, GrepRequest, RenderOptions, render_glob, render_grep};
use mage_scan_domain::tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use std::path::PathBuf;
use std::time::Instant;

/// Tool name constants
pub const GLOB_SEARCH: &str = "glob_search";
pub const GREP_SEARCH: &str = "grep_search";

/// Names the host used before the tools were renamed
pub const SEARCH_ALIASES: [(&str, &str); 4] = [
    ("GlobTool", GLOB_SEARCH),
    ("GrepTool", GREP_SEARCH),
    ("glob", GLOB_SEARCH),
    ("grep", GREP_SEARCH),
];

/// Get the tool definition for glob_search
pub fn glob_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        GLOB_SEARCH,
        "Find files matching a glob pattern (e.g., '*.txt', '**/*.py'). \
         Results are sorted by modification time, newest first.",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("pattern", "Glob pattern to match files", true).with_type("string"),
    )
    .with_parameter(
        ToolParameter::new(
            "path",
            "Directory to search in (default: workspace root)",
            false,
        )
        .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new(
            "max_results",
            "Maximum number of paths to return (default: 1000)",
            false,
        )
        .with_type("integer"),
    )
    .with_parameter(
        ToolParameter::new(
            "absolute_paths",
            "Return absolute paths instead of paths relative to the search root",
            false,
        )
        .with_type("boolean"),
    )
}

/// Get the tool definition for grep_search
pub fn grep_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP_SEARCH,
        "Search file contents using a regular expression. Returns 'path:line' entries.",
        RiskLevel::Low,
    )
    .with_parameter(
        ToolParameter::new("pattern", "Regular expression to search for", true)
            .with_type("string"),
    )
    .with_parameter(
        ToolParameter::new(
            "include",
            "Glob for files to include (e.g., '*.py'); all files if omitted",
            false,
        )
        .with_type("string"),
    )
    .with_parameter(
        ToolParameter::new(
            "path",
            "Directory to search in (default: workspace root)",
            false,
        )
        .with_type("path"),
    )
    .with_parameter(
        ToolParameter::new(
            "max_results",
            "Maximum number of matching lines to return (default: 1000)",
            false,
        )
        .with_type("integer"),
    )
    .with_parameter(
        ToolParameter::new(
            "max_files",
            "Maximum number of files to scan (default: unlimited)",
            false,
        )
        .with_type("integer"),
    )
    .with_parameter(
        ToolParameter::new("case_insensitive", "Perform case-insensitive search", false)
            .with_type("boolean"),
    )
    .with_parameter(
        ToolParameter::new(
            "show_content",
            "Append the matching line text to each entry",
            false,
        )
        .with_type("boolean"),
    )
    .with_parameter(
        ToolParameter::new(
            "absolute_paths",
            "Return absolute paths instead of paths relative to the search root",
            false,
        )
        .with_type("boolean"),
    )
}

fn invalid(message: String) -> ToolError {
    ToolError::invalid_argument(message)
}

fn render_options(call: &ToolCall) -> Result<RenderOptions, ToolError> {
    Ok(RenderOptions {
        absolute_paths: call.get_opt_bool("absolute_paths").map_err(invalid)?.unwrap_or(false),
        show_content: call.get_opt_bool("show_content").map_err(invalid)?.unwrap_or(false),
    })
}

fn glob_request(call: &ToolCall, defaults: &ScanDefaults) -> Result<GlobRequest, ToolError> {
    let pattern = call.require_string("pattern").map_err(invalid)?;
    let max_results = call
        .get_usize("max_results")
        .map_err(invalid)?
        .unwrap_or(defaults.max_results);

    let mut request = GlobRequest::new(pattern)?.with_max_results(max_results)?;
    if let Some(path) = call.get_opt_string("path").map_err(invalid)?.filter(|p| !p.is_empty()) {
        request = request.with_root(path);
    }
    Ok(request)
}

fn grep_request(call: &ToolCall, defaults: &ScanDefaults) -> Result<GrepRequest, ToolError> {
    let pattern = call.require_string("pattern").map_err(invalid)?;
    let max_results = call
        .get_usize("max_results")
        .map_err(invalid)?
        .unwrap_or(defaults.max_results);
    let max_files = call.get_usize("max_files").map_err(invalid)?.or(defaults.max_files);
    let case_insensitive = call.get_opt_bool("case_insensitive").map_err(invalid)?;

    let mut request = GrepRequest::new(pattern)?
        .with_max_results(max_results)?
        .with_case_insensitive(case_insensitive.unwrap_or(false));
    if let Some(max_files) = max_files {
        request = request.with_max_files(max_files)?;
    }
    if let Some(include) = call.get_opt_string("include").map_err(invalid)? {
        request = request.with_include(include);
    }
    if let Some(path) = call.get_opt_string("path").map_err(invalid)?.filter(|p| !p.is_empty()) {
        request = request.with_root(path);
    }
    Ok(request)
}

/// Execute the glob_search tool
pub fn execute_glob_search(
    scanner: &dyn PathScannerPort,
    defaults: &ScanDefaults,
    call: &ToolCall,
) -> ToolResult {
    let start = Instant::now();

    let (request, opts) = match (glob_request(call, defaults), render_options(call)) {
        (Ok(request), Ok(opts)) => (request, opts),
        (Err(e), _) | (_, Err(e)) => return ToolResult::failure(GLOB_SEARCH, e),
    };
    let root = scanner.resolve_root(request.root().map(PathBuf::as_path));

    let outcome = match scanner.glob(&request) {
        Ok(o) => o,
        Err(e) => return ToolResult::failure(GLOB_SEARCH, e.into()),
    };

    let output = render_glob(&outcome, &root, opts);

    ToolResult::success(GLOB_SEARCH, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        path: Some(root.display().to_string()),
        match_count: Some(outcome.matches.len()),
        files_scanned: None,
        truncated: outcome.is_truncated(),
    })
}

/// Execute the grep_search tool
pub fn execute_grep_search(
    scanner: &dyn PathScannerPort,
    defaults: &ScanDefaults,
    call: &ToolCall,
) -> ToolResult {
    let start = Instant::now();

    let (request, opts) = match (grep_request(call, defaults), render_options(call)) {
        (Ok(request), Ok(opts)) => (request, opts),
        (Err(e), _) | (_, Err(e)) => return ToolResult::failure(GREP_SEARCH, e),
    };
    let root = scanner.resolve_root(request.root().map(PathBuf::as_path));

    let outcome = match scanner.grep(&request) {
        Ok(o) => o,
        Err(e) => return ToolResult::failure(GREP_SEARCH, e.into()),
    };

    let output = render_grep(&outcome, &root, opts);

    ToolResult::success(GREP_SEARCH, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        path: Some(root.display().to_string()),
        match_count: Some(outcome.matches.len()),
        files_scanned: Some(outcome.files_scanned),
        truncated: outcome.is_truncated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::LocalPathScanner;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn scanner_at(root: &Path) -> (LocalPathScanner, ScanDefaults) {
        let defaults = ScanDefaults::default().with_workspace_root(root);
        (LocalPathScanner::new(&defaults), defaults)
    }

    #[test]
    fn test_glob_search_basic() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("test1.txt"), "content1").unwrap();
        fs::write(temp_dir.path().join("test2.txt"), "content2").unwrap();
        fs::write(temp_dir.path().join("other.md"), "other").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH).with_arg("pattern", "*.txt");
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        let output = result.output().unwrap();
        let mut lines: Vec<&str> = output.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["test1.txt", "test2.txt"]);
        assert_eq!(result.metadata.match_count, Some(2));
        assert!(!result.metadata.truncated);
    }

    #[test]
    fn test_glob_search_absolute_paths() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH)
            .with_arg("pattern", "*.txt")
            .with_arg("absolute_paths", true);
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert_eq!(
            result.output().unwrap(),
            temp_dir.path().join("a.txt").display().to_string()
        );
    }

    #[test]
    fn test_glob_search_cap_from_string_argument() {
        let temp_dir = tempdir().unwrap();
        for i in 0..4 {
            fs::write(temp_dir.path().join(format!("{i}.txt")), "").unwrap();
        }
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH)
            .with_arg("pattern", "*.txt")
            .with_arg("max_results", "2");
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        assert_eq!(result.output().unwrap().lines().count(), 2);
        assert!(result.metadata.truncated);
    }

    #[test]
    fn test_glob_search_no_matches_is_empty() {
        let temp_dir = tempdir().unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH).with_arg("pattern", "*.xyz");
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        assert_eq!(result.output(), Some(""));
        assert_eq!(result.metadata.match_count, Some(0));
    }

    #[test]
    fn test_glob_search_missing_root_is_empty() {
        let temp_dir = tempdir().unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH)
            .with_arg("pattern", "*")
            .with_arg("path", "does/not/exist");
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        assert_eq!(result.output(), Some(""));
    }

    #[test]
    fn test_glob_search_zero_cap_rejected() {
        let temp_dir = tempdir().unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GLOB_SEARCH)
            .with_arg("pattern", "*")
            .with_arg("max_results", 0);
        let result = execute_glob_search(&scanner, &defaults, &call);

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_grep_search_python_example() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join("a.py"),
            "import sys\n\ndef main():\n    pass\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("b.txt"), "def nope\n").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "^def ")
            .with_arg("include", "*.py");
        let result = execute_grep_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        assert_eq!(result.output(), Some("a.py:3"));
        assert_eq!(result.metadata.files_scanned, Some(1));
    }

    #[test]
    fn test_grep_search_show_content() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "one\ntwo with pattern\n").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "pattern")
            .with_arg("show_content", true);
        let result = execute_grep_search(&scanner, &defaults, &call);

        assert_eq!(result.output(), Some("notes.txt:2: two with pattern"));
    }

    #[test]
    fn test_grep_search_budgets() {
        let temp_dir = tempdir().unwrap();
        for i in 0..4 {
            fs::write(temp_dir.path().join(format!("{i}.txt")), "hit\nhit\n").unwrap();
        }
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "hit")
            .with_arg("max_results", 3);
        let result = execute_grep_search(&scanner, &defaults, &call);
        assert_eq!(result.output(), Some("0.txt:1\n0.txt:2\n1.txt:1"));
        assert!(result.metadata.truncated);

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "hit")
            .with_arg("max_files", 1);
        let result = execute_grep_search(&scanner, &defaults, &call);
        assert_eq!(result.output(), Some("0.txt:1\n0.txt:2"));
        assert_eq!(result.metadata.files_scanned, Some(1));
        assert!(result.metadata.truncated);
    }

    #[test]
    fn test_grep_search_default_file_budget() {
        let temp_dir = tempdir().unwrap();
        for i in 0..3 {
            fs::write(temp_dir.path().join(format!("{i}.txt")), "hit\n").unwrap();
        }
        let defaults = ScanDefaults::default()
            .with_workspace_root(temp_dir.path())
            .with_max_files(Some(2));
        let scanner = LocalPathScanner::new(&defaults);

        let call = ToolCall::new(GREP_SEARCH).with_arg("pattern", "hit");
        let result = execute_grep_search(&scanner, &defaults, &call);
        assert_eq!(result.metadata.files_scanned, Some(2));
    }

    #[test]
    fn test_grep_search_invalid_regex() {
        let temp_dir = tempdir().unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH).with_arg("pattern", "[invalid");
        let result = execute_grep_search(&scanner, &defaults, &call);

        assert!(!result.is_success());
        let err = result.error().unwrap();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.starts_with("Invalid regex pattern"));
    }

    #[test]
    fn test_grep_search_non_numeric_cap() {
        let temp_dir = tempdir().unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "x")
            .with_arg("max_files", "lots");
        let result = execute_grep_search(&scanner, &defaults, &call);

        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    fn assert_invalid(result: &ToolResult, key: &str) {
        assert!(!result.is_success(), "{key} should be rejected");
        let err = result.error().unwrap();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.contains(key), "{}", err.message);
    }

    #[test]
    fn test_grep_search_rejects_mistyped_arguments() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.py"), "hit\n").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "hit\n").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let bad_args = [
            ("include", serde_json::json!(["*.py"])),
            ("path", serde_json::json!(42)),
            ("case_insensitive", serde_json::json!("maybe")),
            ("show_content", serde_json::json!({ "on": true })),
            ("absolute_paths", serde_json::json!("yes")),
        ];
        for (key, value) in bad_args {
            let call = ToolCall::new(GREP_SEARCH)
                .with_arg("pattern", "hit")
                .with_arg(key, value);
            assert_invalid(&execute_grep_search(&scanner, &defaults, &call), key);
        }

        let call = ToolCall::new(GREP_SEARCH).with_arg("pattern", 5);
        assert_invalid(&execute_grep_search(&scanner, &defaults, &call), "pattern");
    }

    #[test]
    fn test_glob_search_rejects_mistyped_arguments() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let bad_args = [
            ("path", serde_json::json!(42)),
            ("absolute_paths", serde_json::json!("yes")),
        ];
        for (key, value) in bad_args {
            let call = ToolCall::new(GLOB_SEARCH)
                .with_arg("pattern", "*.txt")
                .with_arg(key, value);
            assert_invalid(&execute_glob_search(&scanner, &defaults, &call), key);
        }
    }

    #[test]
    fn test_null_arguments_count_as_absent() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("a.py"), "hit\n").unwrap();
        let (scanner, defaults) = scanner_at(temp_dir.path());

        let call = ToolCall::new(GREP_SEARCH)
            .with_arg("pattern", "hit")
            .with_arg("include", serde_json::Value::Null)
            .with_arg("path", serde_json::Value::Null)
            .with_arg("absolute_paths", serde_json::Value::Null);
        let result = execute_grep_search(&scanner, &defaults, &call);

        assert!(result.is_success());
        assert_eq!(result.output(), Some("a.py:1"));
    }
}
