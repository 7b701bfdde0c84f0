//! Local filesystem path scanner
//!
//! [`LocalPathScanner`] implements [`PathScannerPort`] against the real
//! filesystem:
//!
//! ```text
//! PathScannerPort::glob()  → glob_mode::glob_search()   (glob crate, mtime ranking)
//! PathScannerPort::grep()  → content::grep_search()     (regex crate, sorted walk)
//! ```
//!
//! Both modes resolve the requested root the same way: no root means the
//! workspace root, `~` expands to the home directory, and relative roots
//! are joined onto the workspace root. A missing root is never an error.

mod content;
mod glob_mode;
mod paths;

pub(crate) use paths::expand_tilde;

use mage_scan_application::{PathScannerPort, ScanDefaults};
use mage_scan_domain::scan::{GlobOutcome, GlobRequest, GrepOutcome, GrepRequest, ScanError};
use std::path::{Path, PathBuf};

/// Scanner over the local filesystem
#[derive(Debug, Clone)]
pub struct LocalPathScanner {
    workspace_root: PathBuf,
    max_file_size: u64,
}

impl LocalPathScanner {
    pub fn new(defaults: &ScanDefaults) -> Self {
        let root = paths::expand_tilde(&defaults.workspace_root);
        let workspace_root = std::path::absolute(&root).unwrap_or(root);
        Self {
            workspace_root,
            max_file_size: defaults.max_file_size,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }
}

impl Default for LocalPathScanner {
    fn default() -> Self {
        Self::new(&ScanDefaults::default())
    }
}

impl PathScannerPort for LocalPathScanner {
    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn resolve_root(&self, requested: Option<&Path>) -> PathBuf {
        paths::resolve_against(&self.workspace_root, requested)
    }

    fn glob(&self, request: &GlobRequest) -> Result<GlobOutcome, ScanError> {
        let root = self.resolve_root(request.root().map(PathBuf::as_path));
        glob_mode::glob_search(&root, request)
    }

    fn grep(&self, request: &GrepRequest) -> Result<GrepOutcome, ScanError> {
        let root = self.resolve_root(request.root().map(PathBuf::as_path));
        content::grep_search(&root, request, self.max_file_size)
    }
}
