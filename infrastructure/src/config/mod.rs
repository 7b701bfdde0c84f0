//! Configuration file loading for mage-scan
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MAGE_SCAN_*` environment variables (`__` separates sections)
//! 2. `MAGE_WORKSPACE_PATH`, the host's workspace variable
//! 3. `--config <path>` specified file
//! 4. Project root: `./mage-scan.toml` or `./.mage-scan.toml`
//! 5. Global: `$XDG_CONFIG_HOME/mage-scan/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileOutputConfig, FileSearchConfig, FileWorkspaceConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, HOST_WORKSPACE_VAR};
