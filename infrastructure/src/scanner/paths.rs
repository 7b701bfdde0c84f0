//! Path helpers: root resolution and a deterministic file walker

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Expand a leading `~` to the home directory.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Resolve a requested root against the workspace root.
pub(crate) fn resolve_against(workspace_root: &Path, requested: Option<&Path>) -> PathBuf {
    match requested {
        None => workspace_root.to_path_buf(),
        Some(p) => {
            let expanded = expand_tilde(p);
            if expanded.is_absolute() {
                expanded
            } else {
                workspace_root.join(expanded)
            }
        }
    }
}

/// Depth-first walk over regular files under `root`.
///
/// Files come out in byte order of their full path strings: siblings are
/// sorted by name, with directories keyed as `name/` so that `a.txt`
/// precedes everything under `a/`. Symlinked directories are not descended
/// into; symlinks to files are yielded. Unreadable directories are skipped.
pub(crate) struct FileWalker {
    /// Pending entries of the directories currently open, innermost last
    stack: Vec<VecDeque<PathBuf>>,
}

impl FileWalker {
    pub(crate) fn new(root: &Path) -> Self {
        let mut walker = Self { stack: Vec::new() };
        if root.is_file() {
            walker.stack.push(VecDeque::from([root.to_path_buf()]));
        } else {
            walker.open_dir(root);
        }
        walker
    }

    fn open_dir(&mut self, dir: &Path) {
        match fs::read_dir(dir) {
            Ok(entries) => {
                let mut children: Vec<(Vec<u8>, PathBuf)> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| (sort_key(&e), e.path()))
                    .collect();
                children.sort_by(|a, b| a.0.cmp(&b.0));
                self.stack
                    .push(children.into_iter().map(|(_, path)| path).collect());
            }
            Err(e) => trace!(dir = %dir.display(), error = %e, "Skipping unreadable directory"),
        }
    }
}

fn sort_key(entry: &fs::DirEntry) -> Vec<u8> {
    let mut key = entry.file_name().as_encoded_bytes().to_vec();
    if entry.file_type().is_ok_and(|t| t.is_dir()) {
        key.push(b'/');
    }
    key
}

impl Iterator for FileWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let top = self.stack.last_mut()?;
            let Some(path) = top.pop_front() else {
                self.stack.pop();
                continue;
            };

            let Ok(link_meta) = fs::symlink_metadata(&path) else {
                continue;
            };
            if link_meta.is_dir() {
                self.open_dir(&path);
            } else if link_meta.is_file() {
                return Some(path);
            } else if link_meta.file_type().is_symlink() && path.is_file() {
                return Some(path);
            }
        }
    }
}
