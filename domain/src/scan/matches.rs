//! Scan results and their text rendering

use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A path found by glob mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMatch {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl GlobMatch {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }
}

/// Glob-mode result: at most `max_results` paths, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobOutcome {
    pub matches: Vec<GlobMatch>,
    /// Number of paths that matched before the cap was applied
    pub total_found: usize,
}

impl GlobOutcome {
    /// Order newest first and keep the first `max_results`.
    ///
    /// Ties break by the path's byte string, so `a.txt` sorts before `a/x`.
    pub fn ranked(mut matches: Vec<GlobMatch>, max_results: usize) -> Self {
        let total_found = matches.len();
        matches.sort_by(|a, b| {
            Reverse(a.modified)
                .cmp(&Reverse(b.modified))
                .then_with(|| a.path.as_os_str().cmp(b.path.as_os_str()))
        });
        matches.truncate(max_results);
        Self {
            matches,
            total_found,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.total_found > self.matches.len()
    }
}

/// One matching line found by content mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    pub line: String,
}

/// Why a content scan ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStop {
    /// Every candidate file was scanned
    #[default]
    Exhausted,
    /// The file budget ran out
    FileLimit,
    /// The match budget ran out
    MatchLimit,
}

/// Content-mode result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrepOutcome {
    pub matches: Vec<LineMatch>,
    pub files_scanned: usize,
    pub stop: ScanStop,
}

impl GrepOutcome {
    pub fn is_truncated(&self) -> bool {
        self.stop != ScanStop::Exhausted
    }
}

/// How result paths are written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print absolute paths instead of root-relative ones
    pub absolute_paths: bool,
    /// Append the matched line text (grep only)
    pub show_content: bool,
}

/// Render `path` relative to `root` unless absolute output was requested.
/// Paths outside `root` are always printed in full.
pub fn display_path(path: &Path, root: &Path, absolute: bool) -> String {
    if absolute {
        return path.display().to_string();
    }
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Newline-separated path list
pub fn render_glob(outcome: &GlobOutcome, root: &Path, opts: RenderOptions) -> String {
    outcome
        .matches
        .iter()
        .map(|m| display_path(&m.path, root, opts.absolute_paths))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Newline-separated `path:line` list (`path:line: text` with `show_content`)
pub fn render_grep(outcome: &GrepOutcome, root: &Path, opts: RenderOptions) -> String {
    outcome
        .matches
        .iter()
        .map(|m| {
            let path = display_path(&m.path, root, opts.absolute_paths);
            if opts.show_content {
                format!("{}:{}: {}", path, m.line_number, m.line)
            } else {
                format!("{}:{}", path, m.line_number)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
