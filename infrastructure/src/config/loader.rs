//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides (`MAGE_SCAN_SEARCH__MAX_RESULTS=50`)
pub const ENV_PREFIX: &str = "MAGE_SCAN_";

/// Workspace variable set by the host application
pub const HOST_WORKSPACE_VAR: &str = "MAGE_WORKSPACE_PATH";

const PROJECT_FILES: [&str; 2] = ["mage-scan.toml", ".mage-scan.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MAGE_SCAN_*` environment variables
    /// 2. `MAGE_WORKSPACE_PATH` (workspace root only)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./mage-scan.toml` or `./.mage-scan.toml`
    /// 5. Global: `$XDG_CONFIG_HOME/mage-scan/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path, Path::new("."))
            .extract()
            .map_err(Box::new)
    }

    /// Build the merged figment, looking for project files in `project_dir`.
    pub fn figment(config_path: Option<&PathBuf>, project_dir: &Path) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path_in(project_dir) {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&[HOST_WORKSPACE_VAR])
                    .map(|_| "workspace.root".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/mage-scan/config.toml if set,
    /// otherwise falls back to the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mage-scan").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn has_prefixed_env<K: AsRef<OsStr>>(keys: impl IntoIterator<Item = K>) -> bool {
        keys.into_iter().any(|key| {
            key.as_ref()
                .to_str()
                .is_some_and(|k| k.to_ascii_uppercase().starts_with(ENV_PREFIX))
        })
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        let env_marker = if Self::has_prefixed_env(std::env::vars_os().map(|(k, _)| k)) {
            "SET  "
        } else {
            "     "
        };
        println!("  [{}] Env:     {}*", env_marker, ENV_PREFIX);
        let host_marker = if std::env::var_os(HOST_WORKSPACE_VAR).is_some() {
            "SET  "
        } else {
            "     "
        };
        println!("  [{}] Host:    {}", host_marker, HOST_WORKSPACE_VAR);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./mage-scan.toml or ./.mage-scan.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
