//! Scan defaults: caps and limits applied when a call leaves them out.
//!
//! [`ScanDefaults`] is resolved once from configuration and handed to the
//! scanner and the tool adapters. Per-call arguments always win.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use mage_scan_domain::scan::DEFAULT_MAX_RESULTS;

/// Files larger than this are skipped by content search (5 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Default limits for path scanning.
///
/// | Field | Used by | Default |
/// |-------|---------|---------|
/// | `workspace_root` | both tools | current directory |
/// | `max_results` | both tools | 1000 |
/// | `max_files` | grep | unlimited |
/// | `max_file_size` | grep | 5 MB |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDefaults {
    /// Base directory for searches without an explicit path
    pub workspace_root: PathBuf,
    /// Result cap when the call does not give one
    pub max_results: usize,
    /// File budget when the call does not give one (`None` = unlimited)
    pub max_files: Option<usize>,
    /// Size ceiling for files read by content search
    pub max_file_size: u64,
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            max_results: DEFAULT_MAX_RESULTS,
            max_files: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ScanDefaults {
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_max_files(mut self, max: Option<usize>) -> Self {
        self.max_files = max;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}
