//! Glob mode: paths matching a pattern, newest first

use glob::{MatchOptions, Pattern, glob_with};
use mage_scan_domain::scan::{GlobMatch, GlobOutcome, GlobRequest, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

/// Shell semantics: `*` and `?` never match a leading dot.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

pub(crate) fn invalid_glob(pattern: &str, err: glob::PatternError) -> ScanError {
    ScanError::InvalidGlob {
        pattern: pattern.to_string(),
        message: err.msg.to_string(),
    }
}

/// Leading components of an absolute pattern that contain no metacharacters.
fn literal_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| {
            !c.as_os_str()
                .to_string_lossy()
                .contains(['*', '?', '['])
        })
        .collect()
}

/// True when a directory between `base` and `path` is a symlink.
///
/// `**` follows symlinked directories, so a link back up the tree would
/// report the same file once per level.
fn under_symlinked_dir(base: &Path, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(base) else {
        return false;
    };
    let Some(parent) = rel.parent() else {
        return false;
    };

    let mut current = base.to_path_buf();
    parent.components().any(|component| {
        current.push(component);
        fs::symlink_metadata(&current).is_ok_and(|m| m.file_type().is_symlink())
    })
}

/// Run a glob search under an already resolved `root`.
pub(crate) fn glob_search(root: &Path, request: &GlobRequest) -> Result<GlobOutcome, ScanError> {
    let pattern = request.pattern();
    Pattern::new(pattern).map_err(|e| invalid_glob(pattern, e))?;

    let (full_pattern, base) = if Path::new(pattern).is_absolute() {
        (pattern.to_string(), literal_prefix(pattern))
    } else {
        if !root.is_dir() {
            debug!(root = %root.display(), "Search root missing, returning no paths");
            return Ok(GlobOutcome::default());
        }
        // Only the user's pattern is interpreted; the root is taken literally.
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let joined = Path::new(&escaped_root)
            .join(pattern)
            .to_string_lossy()
            .into_owned();
        (joined, root.to_path_buf())
    };

    debug!(pattern = %full_pattern, "Running glob search");
    let entries = glob_with(&full_pattern, GLOB_OPTIONS).map_err(|e| invalid_glob(pattern, e))?;

    let mut found = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if under_symlinked_dir(&base, &path) => {
                trace!(path = %path.display(), "Skipping path reached through a symlinked directory");
            }
            Ok(path) => {
                let modified = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                found.push(GlobMatch::new(path, modified));
            }
            Err(e) => trace!(path = %e.path().display(), "Skipping unreadable path"),
        }
    }

    Ok(GlobOutcome::ranked(found, request.max_results()))
}
