//! Path scanner port
//!
//! The filesystem-facing side of glob and content search. Scans are
//! synchronous and read-only; each call owns its traversal state.

use std::path::{Path, PathBuf};

use mage_scan_domain::scan::{GlobOutcome, GlobRequest, GrepOutcome, GrepRequest, ScanError};

/// Port for scanning a directory subtree
pub trait PathScannerPort: Send + Sync {
    /// Default base directory for searches and relative roots
    fn workspace_root(&self) -> &Path;

    /// Resolve the root a request will search.
    ///
    /// `None` means the workspace root. Relative paths are joined onto the
    /// workspace root.
    fn resolve_root(&self, requested: Option<&Path>) -> PathBuf;

    /// Paths matching a glob, newest first, capped at `max_results`.
    ///
    /// A missing root yields an empty outcome.
    fn glob(&self, request: &GlobRequest) -> Result<GlobOutcome, ScanError>;

    /// Lines matching a regex, in path order, bounded by both budgets.
    ///
    /// Pattern errors are reported before any file is opened.
    fn grep(&self, request: &GrepRequest) -> Result<GrepOutcome, ScanError>;
}
