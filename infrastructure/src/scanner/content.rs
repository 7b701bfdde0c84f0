//! Content mode: regex search over file lines with two budgets

use glob::{MatchOptions, Pattern};
use mage_scan_domain::scan::{GrepOutcome, GrepRequest, LineMatch, ScanError, ScanStop};
use regex::RegexBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use super::glob_mode::invalid_glob;
use super::paths::FileWalker;

/// Bytes inspected for a NUL when deciding whether a file is binary
const BINARY_SNIFF_LEN: usize = 8 * 1024;

const INCLUDE_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Include filter: a bare pattern matches file names, a pattern with `/`
/// matches the path relative to the search root.
struct IncludeFilter {
    pattern: Pattern,
    match_relative_path: bool,
}

impl IncludeFilter {
    fn new(raw: &str) -> Result<Self, ScanError> {
        Ok(Self {
            pattern: Pattern::new(raw).map_err(|e| invalid_glob(raw, e))?,
            match_relative_path: raw.contains('/'),
        })
    }

    fn matches(&self, root: &Path, path: &Path) -> bool {
        if self.match_relative_path {
            path.strip_prefix(root)
                .is_ok_and(|rel| self.pattern.matches_path_with(rel, INCLUDE_OPTIONS))
        } else {
            path.file_name()
                .is_some_and(|name| self.pattern.matches_with(&name.to_string_lossy(), INCLUDE_OPTIONS))
        }
    }
}

/// Read a file as text, or `None` when it should be skipped.
fn read_text(path: &Path, max_file_size: u64) -> Option<String> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_file_size => {
            trace!(path = %path.display(), size = meta.len(), "Skipping oversized file");
            return None;
        }
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Skipping unreadable file");
            return None;
        }
        Ok(_) => {}
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Skipping unreadable file");
            return None;
        }
    };

    if bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0) {
        trace!(path = %path.display(), "Skipping binary file");
        return None;
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Run a content search under an already resolved `root`.
///
/// The regex and include filter are compiled before the walk starts, so a
/// bad pattern never produces a partial scan.
pub(crate) fn grep_search(
    root: &Path,
    request: &GrepRequest,
    max_file_size: u64,
) -> Result<GrepOutcome, ScanError> {
    let regex = RegexBuilder::new(request.pattern())
        .case_insensitive(request.case_insensitive())
        .build()
        .map_err(|e| ScanError::InvalidRegex(e.to_string()))?;
    let include = request.include().map(IncludeFilter::new).transpose()?;

    let mut outcome = GrepOutcome::default();
    if !root.exists() {
        debug!(root = %root.display(), "Search root missing, returning no matches");
        return Ok(outcome);
    }

    debug!(
        root = %root.display(),
        pattern = %request.pattern(),
        include = ?request.include(),
        max_results = request.max_results(),
        max_files = ?request.max_files(),
        "Running content search"
    );

    let candidates = FileWalker::new(root)
        .filter(|path| include.as_ref().is_none_or(|f| f.matches(root, path)));

    'files: for path in candidates {
        if request
            .max_files()
            .is_some_and(|max| outcome.files_scanned >= max)
        {
            outcome.stop = ScanStop::FileLimit;
            break;
        }
        outcome.files_scanned += 1;

        let Some(text) = read_text(&path, max_file_size) else {
            continue;
        };

        for (idx, line) in text.lines().enumerate() {
            if !regex.is_match(line) {
                continue;
            }
            outcome.matches.push(LineMatch {
                path: path.clone(),
                line_number: idx + 1,
                line: line.to_string(),
            });
            if outcome.matches.len() >= request.max_results() {
                outcome.stop = ScanStop::MatchLimit;
                break 'files;
            }
        }
    }

    debug!(
        files_scanned = outcome.files_scanned,
        matches = outcome.matches.len(),
        stop = ?outcome.stop,
        "Content search finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const NO_SIZE_LIMIT: u64 = u64::MAX;

    fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_python_def_example() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "a.py", "import os\n\ndef main():\n    pass\n");
        write(root, "notes.txt", "def not_python\n");

        let request = GrepRequest::new("^def ").unwrap().with_include("*.py");
        let outcome = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].path, root.join("a.py"));
        assert_eq!(outcome.matches[0].line_number, 3);
        assert_eq!(outcome.matches[0].line, "def main():");
        assert_eq!(outcome.files_scanned, 1);
        assert_eq!(outcome.stop, ScanStop::Exhausted);
    }

    #[test]
    fn test_matches_come_in_path_then_line_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "b.txt", "hit\nmiss\nhit\n");
        write(root, "a/inner.txt", "hit\n");
        write(root, "a.txt", "hit\n");

        let outcome =
            grep_search(root, &GrepRequest::new("hit").unwrap(), NO_SIZE_LIMIT).unwrap();
        let got: Vec<(PathBuf, usize)> = outcome
            .matches
            .iter()
            .map(|m| (m.path.clone(), m.line_number))
            .collect();

        assert_eq!(
            got,
            vec![
                (root.join("a.txt"), 1),
                (root.join("a/inner.txt"), 1),
                (root.join("b.txt"), 1),
                (root.join("b.txt"), 3),
            ]
        );
    }

    #[test]
    fn test_match_budget_stops_scan() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "1.txt", "x\nx\nx\n");
        write(root, "2.txt", "x\n");

        let request = GrepRequest::new("x").unwrap().with_max_results(2).unwrap();
        let outcome = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.files_scanned, 1);
        assert_eq!(outcome.stop, ScanStop::MatchLimit);
    }

    #[test]
    fn test_file_budget_independent_of_matches() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for i in 0..5 {
            write(root, &format!("{i}.txt"), "nothing here\n");
        }
        write(root, "9.txt", "needle\n");

        let request = GrepRequest::new("needle").unwrap().with_max_files(3).unwrap();
        let outcome = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.files_scanned, 3);
        assert_eq!(outcome.stop, ScanStop::FileLimit);
    }

    #[test]
    fn test_file_budget_not_hit_when_exact() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "only.txt", "needle\n");

        let request = GrepRequest::new("needle").unwrap().with_max_files(1).unwrap();
        let outcome = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.stop, ScanStop::Exhausted);
    }

    #[test]
    fn test_include_filter_does_not_consume_budget() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "a.md", "needle\n");
        write(root, "b.md", "needle\n");
        write(root, "c.rs", "needle\n");

        let request = GrepRequest::new("needle")
            .unwrap()
            .with_include("*.rs")
            .with_max_files(1)
            .unwrap();
        let outcome = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].path, root.join("c.rs"));
    }

    #[test]
    fn test_include_with_slash_matches_relative_path() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "src/lib.rs", "needle\n");
        write(root, "src/bin/tool.rs", "needle\n");
        write(root, "tests/it.rs", "needle\n");

        let shallow = GrepRequest::new("needle").unwrap().with_include("src/*.rs");
        let outcome = grep_search(root, &shallow, NO_SIZE_LIMIT).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].path, root.join("src/lib.rs"));

        let deep = GrepRequest::new("needle").unwrap().with_include("src/**/*.rs");
        let outcome = grep_search(root, &deep, NO_SIZE_LIMIT).unwrap();
        assert_eq!(outcome.matches.len(), 2);
    }

    #[test]
    fn test_binary_and_oversized_files_are_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "blob.bin", b"needle\0\x01\x02");
        write(root, "big.txt", format!("needle\n{}", "y".repeat(100)));
        write(root, "small.txt", "needle\n");

        let outcome =
            grep_search(root, &GrepRequest::new("needle").unwrap(), 64).unwrap();

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].path, root.join("small.txt"));
        assert_eq!(outcome.files_scanned, 3);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "latin1.txt", b"caf\xe9 needle\n");

        let outcome =
            grep_search(root, &GrepRequest::new("needle").unwrap(), NO_SIZE_LIMIT).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert!(outcome.matches[0].line.starts_with("caf"));
    }

    #[test]
    fn test_crlf_lines() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "win.txt", "first\r\nend$\r\n");

        let outcome =
            grep_search(root, &GrepRequest::new(r"end\$$").unwrap(), NO_SIZE_LIMIT).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].line_number, 2);
        assert_eq!(outcome.matches[0].line, "end$");
    }

    #[test]
    fn test_case_insensitive() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(root, "greet.txt", "Hello World\nhello world\n");

        let sensitive =
            grep_search(root, &GrepRequest::new("HELLO").unwrap(), NO_SIZE_LIMIT).unwrap();
        assert!(sensitive.matches.is_empty());

        let request = GrepRequest::new("HELLO").unwrap().with_case_insensitive(true);
        let insensitive = grep_search(root, &request, NO_SIZE_LIMIT).unwrap();
        assert_eq!(insensitive.matches.len(), 2);
    }

    #[test]
    fn test_invalid_regex_error_shows_raw_pattern() {
        let dir = tempdir().unwrap();
        let request = GrepRequest::new("(unclosed").unwrap().with_case_insensitive(true);

        let message = match grep_search(dir.path(), &request, NO_SIZE_LIMIT) {
            Err(ScanError::InvalidRegex(message)) => message,
            other => panic!("expected InvalidRegex, got {other:?}"),
        };
        assert!(message.contains("(unclosed"));
        assert!(!message.contains("(?i)"));
    }

    #[test]
    fn test_invalid_regex_fails_before_scanning() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.txt", "anything\n");

        let err = grep_search(dir.path(), &GrepRequest::new("[invalid").unwrap(), NO_SIZE_LIMIT)
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidRegex(_)));
    }

    #[test]
    fn test_invalid_regex_reported_even_for_missing_root() {
        let dir = tempdir().unwrap();
        let err = grep_search(
            &dir.path().join("missing"),
            &GrepRequest::new("(unclosed").unwrap(),
            NO_SIZE_LIMIT,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::InvalidRegex(_)));
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let outcome = grep_search(
            &dir.path().join("missing"),
            &GrepRequest::new("x").unwrap(),
            NO_SIZE_LIMIT,
        )
        .unwrap();
        assert_eq!(outcome, GrepOutcome::default());
    }

    #[test]
    fn test_single_file_root() {
        let dir = tempdir().unwrap();
        let file = write(dir.path(), "one.txt", "a\nneedle\n");

        let outcome =
            grep_search(&file, &GrepRequest::new("needle").unwrap(), NO_SIZE_LIMIT).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].line_number, 2);
    }
}
