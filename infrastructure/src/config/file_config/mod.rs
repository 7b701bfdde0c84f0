//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod output;
mod search;
mod workspace;

pub use output::FileOutputConfig;
pub use search::FileSearchConfig;
pub use workspace::FileWorkspaceConfig;

use mage_scan_application::ScanDefaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A detected issue in the loaded configuration.
///
/// Issues are non-fatal: a fallback is always applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted key of the offending field (e.g. `search.max_results`)
    pub field: String,
    pub message: String,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Workspace settings
    pub workspace: FileWorkspaceConfig,
    /// Search caps and limits
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.search.max_results == 0 {
            issues.push(ConfigIssue {
                field: "search.max_results".to_string(),
                message: format!(
                    "search.max_results is 0, falling back to {}",
                    self.search.effective_max_results()
                ),
            });
        }

        if self.search.max_file_size == 0 {
            issues.push(ConfigIssue {
                field: "search.max_file_size".to_string(),
                message: format!(
                    "search.max_file_size is 0, falling back to {} bytes",
                    self.search.effective_max_file_size()
                ),
            });
        }

        if let Some(root) = &self.workspace.root {
            if root.trim().is_empty() {
                issues.push(ConfigIssue {
                    field: "workspace.root".to_string(),
                    message: "workspace.root is empty, using the current directory".to_string(),
                });
            } else {
                let resolved = self.workspace_root();
                if !resolved.is_dir() {
                    issues.push(ConfigIssue {
                        field: "workspace.root".to_string(),
                        message: format!(
                            "workspace.root '{}' is not a directory; searches will return nothing",
                            resolved.display()
                        ),
                    });
                }
            }
        }

        issues
    }

    /// Workspace root with `~` expanded; the current directory when unset.
    pub fn workspace_root(&self) -> PathBuf {
        match self.workspace.root.as_deref().map(str::trim) {
            Some(root) if !root.is_empty() => {
                crate::scanner::expand_tilde(std::path::Path::new(root))
            }
            _ => PathBuf::from("."),
        }
    }

    /// Resolve the scan defaults the tools run with.
    pub fn to_scan_defaults(&self) -> ScanDefaults {
        ScanDefaults::default()
            .with_workspace_root(self.workspace_root())
            .with_max_results(self.search.effective_max_results())
            .with_max_files(self.search.effective_max_files())
            .with_max_file_size(self.search.effective_max_file_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[workspace]
root = "/srv/mage"

[search]
max_results = 25
max_files = 100
max_file_size = 1024

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let defaults = config.to_scan_defaults();
        assert_eq!(defaults.workspace_root, PathBuf::from("/srv/mage"));
        assert_eq!(defaults.max_results, 25);
        assert_eq!(defaults.max_files, Some(100));
        assert_eq!(defaults.max_file_size, 1024);
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[search]\nmax_results = 10\n").unwrap();
        assert_eq!(config.search.max_results, 10);
        assert!(config.workspace.root.is_none());
        assert!(config.output.color);
        assert_eq!(config.to_scan_defaults().workspace_root, PathBuf::from("."));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_zero_caps() {
        let config: FileConfig =
            toml::from_str("[search]\nmax_results = 0\nmax_file_size = 0\n").unwrap();
        let fields: Vec<String> = config.validate().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["search.max_results", "search.max_file_size"]);
    }

    #[test]
    fn test_validate_missing_workspace_root() {
        let dir = tempdir().unwrap();
        let mut config = FileConfig::default();
        config.workspace.root = Some(dir.path().join("gone").display().to_string());

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "workspace.root");

        config.workspace.root = Some(dir.path().display().to_string());
        assert!(config.validate().is_empty());
    }
}
