//! Workspace configuration from TOML (`[workspace]` section)

use serde::{Deserialize, Serialize};

/// Raw workspace configuration from TOML
///
/// ```toml
/// [workspace]
/// root = "~/projects/site"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkspaceConfig {
    /// Default search root; the current directory when unset
    pub root: Option<String>,
}
