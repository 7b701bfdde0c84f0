//! Search configuration from TOML (`[search]` section)
//!
//! ```toml
//! [search]
//! max_results = 1000      # default cap for glob paths and grep lines
//! max_files = 0           # default grep file budget, 0 = unlimited
//! max_file_size = 5242880 # grep skips larger files
//! ```

use mage_scan_application::DEFAULT_MAX_FILE_SIZE;
use mage_scan_domain::scan::DEFAULT_MAX_RESULTS;
use serde::{Deserialize, Serialize};

/// Raw search configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Default result cap
    pub max_results: usize,
    /// Default file budget for content search (0 = unlimited)
    pub max_files: usize,
    /// Size ceiling in bytes for files read by content search
    pub max_file_size: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_files: 0,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileSearchConfig {
    /// Effective result cap; zero falls back to the built-in default
    pub fn effective_max_results(&self) -> usize {
        if self.max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            self.max_results
        }
    }

    pub fn effective_max_files(&self) -> Option<usize> {
        (self.max_files > 0).then_some(self.max_files)
    }

    pub fn effective_max_file_size(&self) -> u64 {
        if self.max_file_size == 0 {
            DEFAULT_MAX_FILE_SIZE
        } else {
            self.max_file_size
        }
    }
}
