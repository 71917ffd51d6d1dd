//! Repository root discovery
//!
//! Walks upward from a starting directory looking for the `.git` marker,
//! bounded by a maximum depth so symlink loops or very deep trees cannot
//! make the search run away.

use std::path::{Path, PathBuf};

/// Marks the top of a git working tree (directory, or file for worktrees/submodules)
pub const REPO_MARKER: &str = ".git";

/// Default number of directories inspected, the start directory included
pub const MAX_SEARCH_DEPTH: usize = 20;

/// Controls how far [find_repo_root] looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of directories inspected before giving up
    pub max_depth: usize,
    /// Walk up into parent directories; when false only the start directory is checked
    pub search_parents: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_depth: MAX_SEARCH_DEPTH,
            search_parents: true,
        }
    }
}

/// Finds the nearest directory at or above `start` containing [REPO_MARKER].
///
/// Stops with `None` when the depth limit is reached, the filesystem root
/// has been checked, or parent search is disabled and `start` itself has no
/// marker. Read-only; nothing on disk is touched.
pub fn find_repo_root(start: &Path, options: &SearchOptions) -> Option<PathBuf> {
    let mut current = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());
    let mut depth = 0;

    loop {
        if depth >= options.max_depth {
            tracing::debug!(
                "stopped searching for {} after {} directories",
                REPO_MARKER,
                depth
            );
            return None;
        }

        if current.join(REPO_MARKER).exists() {
            tracing::debug!("found repository root at {}", current.display());
            return Some(current);
        }

        if !options.search_parents {
            return None;
        }

        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }

        depth += 1;
    }
}
