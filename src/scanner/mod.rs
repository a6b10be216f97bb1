//! Filesystem scanner producing the directory-statistics tree.
//!
//! This module provides a single-threaded, depth-first scanner that
//! respects configuration for maximum depth, excluded directory names,
//! and symlink handling. Permission errors below the root are absorbed
//! into inaccessible nodes rather than aborting the scan.

use crate::models::{classify, default_category_rules, CategoryRule, DirectoryNode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Fatal scan failures. Everything below the root is absorbed into the
/// tree as inaccessible nodes instead of surfacing here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested root does not exist.
    #[error("scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    /// The requested root exists but is not a directory.
    #[error("scan root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// The root itself could not be listed.
    #[error("cannot read scan root {path}: {source}")]
    RootUnreadable {
        /// The root path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for directory scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum recursion depth (root = 0).
    pub max_depth: usize,
    /// Directory names skipped entirely during traversal.
    pub excludes: Vec<String>,
    /// Whether to follow directory symlinks (cycles are always skipped).
    pub follow_symlinks: bool,
    /// Ordered categorization rules applied to every visited directory.
    pub rules: Vec<CategoryRule>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            excludes: vec![
                ".git",
                ".cache",
                "node_modules",
                "__pycache__",
                ".pytest_cache",
                "venv",
                "env",
                ".env",
                ".venv",
                "Library",
                ".Trash",
                "Applications",
                "Pictures",
                "Movies",
                "Music",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            follow_symlinks: false,
            rules: default_category_rules(),
        }
    }
}

impl From<&crate::config::Config> for ScanConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            max_depth: config.scanner.max_depth,
            excludes: config.scanner.excludes.clone(),
            follow_symlinks: config.scanner.follow_symlinks,
            rules: config.categories.clone(),
        }
    }
}

/// Result of one completed scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Root of the directory tree.
    pub root: DirectoryNode,
    /// Number of directory nodes in the tree.
    pub directories_scanned: u64,
    /// Directories recorded as inaccessible.
    pub inaccessible_dirs: u64,
}

/// Running counters threaded through the traversal.
#[derive(Debug, Default)]
struct WalkStats {
    directories: u64,
    inaccessible: u64,
}

/// What a directory entry turned out to be after symlink resolution.
enum EntryKind {
    File(u64),
    Dir,
}

/// Directory scanner.
pub struct DirScanner {
    config: ScanConfig,
}

impl DirScanner {
    /// Create a new scanner.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan the tree rooted at `root`.
    ///
    /// Fails fast with a [`ScanError`] when the root is missing, not a
    /// directory, or unreadable; no partial tree is produced in that
    /// case. Every other error is local to its subtree.
    pub fn scan(&self, root: &Path) -> Result<ScanOutcome, ScanError> {
        let root = fs::canonicalize(root).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
            _ => ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source: err,
            },
        })?;

        let metadata = fs::metadata(&root).map_err(|err| ScanError::RootUnreadable {
            path: root.clone(),
            source: err,
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::RootNotADirectory(root));
        }

        // Probe readability up front so a locked root is a fatal error,
        // not an inaccessible single-node tree.
        fs::read_dir(&root).map_err(|err| ScanError::RootUnreadable {
            path: root.clone(),
            source: err,
        })?;

        let mut stats = WalkStats::default();
        let mut ancestors: Vec<PathBuf> = Vec::new();
        let tree = self.walk(&root, 0, &mut ancestors, &mut stats);

        Ok(ScanOutcome {
            root: tree,
            directories_scanned: stats.directories,
            inaccessible_dirs: stats.inaccessible,
        })
    }

    /// Visit one directory, pre-order, returning its fully populated node.
    fn walk(
        &self,
        path: &Path,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
        stats: &mut WalkStats,
    ) -> DirectoryNode {
        stats.directories += 1;

        let name = node_name(path);
        let category = classify(&name, &self.config.rules);

        // Drain the listing before any recursion so the directory
        // handle is released immediately, never held across children.
        let entries: Vec<fs::DirEntry> = match fs::read_dir(path) {
            Ok(reader) => reader
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        debug!("Skipping unreadable entry in {}: {}", path.display(), err);
                        None
                    }
                })
                .collect(),
            Err(err) => {
                warn!("Cannot read directory {}: {}", path.display(), err);
                stats.inaccessible += 1;
                return DirectoryNode::inaccessible(path.to_path_buf(), name, depth, category);
            }
        };

        let mut node = DirectoryNode::new(path.to_path_buf(), name, depth, category);

        // Track the resolved path of every directory on the current
        // traversal path so followed symlinks cannot loop.
        let guard = fs::canonicalize(path).ok();
        if let Some(resolved) = guard.clone() {
            ancestors.push(resolved);
        }

        for entry in entries {
            let entry_path = entry.path();

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    debug!("Cannot stat {}: {}", entry_path.display(), err);
                    continue;
                }
            };

            let kind = if file_type.is_symlink() {
                match self.resolve_symlink(&entry_path, ancestors) {
                    Some(kind) => kind,
                    None => continue,
                }
            } else if file_type.is_file() {
                match entry.metadata() {
                    Ok(metadata) => EntryKind::File(metadata.len()),
                    Err(err) => {
                        debug!("Cannot stat {}: {}", entry_path.display(), err);
                        continue;
                    }
                }
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                // Sockets, FIFOs, devices.
                continue;
            };

            match kind {
                EntryKind::File(size) => {
                    node.size_bytes += size;
                    node.file_count += 1;
                }
                EntryKind::Dir => {
                    let child_name = entry.file_name().to_string_lossy().to_string();
                    if self.config.excludes.iter().any(|e| *e == child_name) {
                        debug!("Excluded: {}", entry_path.display());
                        continue;
                    }
                    if depth + 1 > self.config.max_depth {
                        debug!("Depth limit reached at {}", entry_path.display());
                        continue;
                    }

                    let child = self.walk(&entry_path, depth + 1, ancestors, stats);
                    node.size_bytes += child.size_bytes;
                    node.file_count += child.file_count;
                    node.children.push(child);
                }
            }
        }

        if guard.is_some() {
            ancestors.pop();
        }

        // Listing order is OS-dependent; keep the tree deterministic.
        node.children.sort_by(|a, b| a.name.cmp(&b.name));

        node
    }

    /// Decide what to do with a symlink entry.
    ///
    /// Returns `None` when the link must be skipped: following is
    /// disabled, the link is broken, or it resolves to a directory
    /// already on the current traversal path.
    fn resolve_symlink(&self, entry_path: &Path, ancestors: &[PathBuf]) -> Option<EntryKind> {
        if !self.config.follow_symlinks {
            debug!("Not following symlink {}", entry_path.display());
            return None;
        }

        let metadata = match fs::metadata(entry_path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Broken symlink {}: {}", entry_path.display(), err);
                return None;
            }
        };

        if metadata.is_file() {
            return Some(EntryKind::File(metadata.len()));
        }

        if metadata.is_dir() {
            let resolved = match fs::canonicalize(entry_path) {
                Ok(resolved) => resolved,
                Err(err) => {
                    debug!("Cannot resolve symlink {}: {}", entry_path.display(), err);
                    return None;
                }
            };
            if ancestors.iter().any(|a| *a == resolved) {
                debug!("Skipping symlink cycle at {}", entry_path.display());
                return None;
            }
            return Some(EntryKind::Dir);
        }

        None
    }
}

/// Display name for a scanned directory: the final path component, or
/// the whole path for filesystem roots.
fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
