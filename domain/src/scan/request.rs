//! Validated scan requests
//!
//! Requests are built per call and checked on construction, so a scanner
//! never sees an empty pattern or a zero cap.

use std::path::PathBuf;

use super::error::ScanError;

/// Default cap for both glob results and grep line matches
pub const DEFAULT_MAX_RESULTS: usize = 1000;

/// Glob-mode request: which paths under `root` match `pattern`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobRequest {
    pattern: String,
    root: Option<PathBuf>,
    max_results: usize,
}

impl GlobRequest {
    pub fn new(pattern: impl Into<String>) -> Result<Self, ScanError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(ScanError::EmptyPattern);
        }
        Ok(Self {
            pattern,
            root: None,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Search under `root` instead of the workspace root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Result<Self, ScanError> {
        if max_results == 0 {
            return Err(ScanError::InvalidLimit {
                field: "max_results",
            });
        }
        self.max_results = max_results;
        Ok(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

/// Content-mode request: which lines of which files match `pattern`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepRequest {
    pattern: String,
    include: Option<String>,
    root: Option<PathBuf>,
    max_results: usize,
    max_files: Option<usize>,
    case_insensitive: bool,
}

impl GrepRequest {
    pub fn new(pattern: impl Into<String>) -> Result<Self, ScanError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(ScanError::EmptyPattern);
        }
        Ok(Self {
            pattern,
            include: None,
            root: None,
            max_results: DEFAULT_MAX_RESULTS,
            max_files: None,
            case_insensitive: false,
        })
    }

    /// Only scan files matching this glob (`*.py`, or `src/**/*.rs`).
    /// An empty filter means no filter.
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        let include = include.into();
        self.include = (!include.trim().is_empty()).then_some(include);
        self
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Result<Self, ScanError> {
        if max_results == 0 {
            return Err(ScanError::InvalidLimit {
                field: "max_results",
            });
        }
        self.max_results = max_results;
        Ok(self)
    }

    pub fn with_max_files(mut self, max_files: usize) -> Result<Self, ScanError> {
        if max_files == 0 {
            return Err(ScanError::InvalidLimit { field: "max_files" });
        }
        self.max_files = Some(max_files);
        Ok(self)
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn include(&self) -> Option<&str> {
        self.include.as_deref()
    }

    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn max_files(&self) -> Option<usize> {
        self.max_files
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}
