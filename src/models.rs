//! Data models for the system map pipeline.
//!
//! This module contains all the core data structures used throughout
//! the application: the scanned directory tree, the category taxonomy,
//! and the derived shapes handed to the report renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Semantic category of a directory, assigned by name-pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Project roots - apps, sites, client/server code.
    Projects,
    /// Documentation, wikis, notes, learning material.
    Knowledge,
    /// Tools, utilities, scripts, automation.
    Tools,
    /// Images, media, static resources.
    Assets,
    /// General development directories (src, code, dev).
    Development,
    /// Configuration and settings, including hidden directories.
    Config,
    /// Temporary data - caches, downloads, inboxes.
    Temp,
    /// No pattern matched.
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Projects => "projects",
            Category::Knowledge => "knowledge",
            Category::Tools => "tools",
            Category::Assets => "assets",
            Category::Development => "development",
            Category::Config => "config",
            Category::Temp => "temp",
            Category::Other => "other",
        };
        write!(f, "{}", name)
    }
}

impl Category {
    /// Display color used by every chart in the report.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Projects => "#F687B3",
            Category::Knowledge => "#63B3ED",
            Category::Tools => "#68D391",
            Category::Assets => "#F6E05E",
            Category::Development => "#B794F4",
            Category::Config => "#F6AD55",
            Category::Temp => "#FED7AA",
            Category::Other => "#718096",
        }
    }

    /// All categories, in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Projects,
            Category::Knowledge,
            Category::Tools,
            Category::Assets,
            Category::Development,
            Category::Config,
            Category::Temp,
            Category::Other,
        ]
    }
}

/// One entry in the ordered categorization table.
///
/// Rules are evaluated in sequence; the first rule with a
/// case-insensitive substring match against the directory name wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category this rule assigns.
    #[serde(rename = "name")]
    pub category: Category,
    /// Substring patterns matched against the lowercased directory name.
    pub patterns: Vec<String>,
}

impl CategoryRule {
    /// Create a rule from a pattern list.
    pub fn new(category: Category, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// The built-in categorization table, in evaluation order.
pub fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            Category::Projects,
            &["project", "app", "site", "client", "server"],
        ),
        CategoryRule::new(
            Category::Knowledge,
            &["knowledge", "docs", "wiki", "notes", "learning"],
        ),
        CategoryRule::new(Category::Tools, &["tools", "utils", "scripts", "automation"]),
        CategoryRule::new(Category::Assets, &["assets", "images", "media", "resources"]),
        CategoryRule::new(Category::Development, &["dev", "development", "code", "src"]),
        CategoryRule::new(Category::Config, &["config", "settings", "preferences"]),
        CategoryRule::new(
            Category::Temp,
            &["temp", "tmp", "cache", "inbox", "downloads"],
        ),
    ]
}

/// Determine the category for a directory name.
///
/// The ordered rule table is consulted first. Names that miss every
/// rule fall through to two fixed conventions: hidden names (leading
/// dot) are configuration, and the numeric prefixes used by PARA-style
/// home layouts map to their customary areas.
pub fn classify(name: &str, rules: &[CategoryRule]) -> Category {
    let lower = name.to_lowercase();

    for rule in rules {
        if rule
            .patterns
            .iter()
            .any(|p| lower.contains(p.to_lowercase().as_str()))
        {
            return rule.category;
        }
    }

    if name.starts_with('.') {
        return Category::Config;
    }

    match name.get(..2) {
        Some("01") => Category::Projects,
        Some("02") => Category::Knowledge,
        Some("03") | Some("04") => Category::Tools,
        Some("05") => Category::Assets,
        Some("99") => Category::Temp,
        _ => Category::Other,
    }
}

/// One scanned directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryNode {
    /// Absolute path - unique key within a scan.
    pub path: PathBuf,
    /// Final path component, used for display and categorization.
    pub name: String,
    /// Distance from the scan root (root = 0).
    pub depth: usize,
    /// Total bytes of regular files directly and transitively contained.
    pub size_bytes: u64,
    /// Total regular files directly and transitively contained.
    pub file_count: u64,
    /// Category assigned at scan time.
    pub category: Category,
    /// Immediate children actually visited.
    pub children: Vec<DirectoryNode>,
    /// False when the directory could not be listed. Such nodes
    /// contribute nothing but stay in the tree for visibility.
    pub accessible: bool,
}

impl DirectoryNode {
    /// Create an empty accessible node.
    pub fn new(path: PathBuf, name: String, depth: usize, category: Category) -> Self {
        Self {
            path,
            name,
            depth,
            size_bytes: 0,
            file_count: 0,
            category,
            children: Vec::new(),
            accessible: true,
        }
    }

    /// Create a node for a directory that could not be listed.
    pub fn inaccessible(path: PathBuf, name: String, depth: usize, category: Category) -> Self {
        Self {
            accessible: false,
            ..Self::new(path, name, depth, category)
        }
    }

    /// Bytes of files held directly in this directory, excluding
    /// everything accounted for by child nodes.
    pub fn direct_size_bytes(&self) -> u64 {
        let child_sum: u64 = self.children.iter().map(|c| c.size_bytes).sum();
        self.size_bytes - child_sum
    }

    /// Files held directly in this directory.
    pub fn direct_file_count(&self) -> u64 {
        let child_sum: u64 = self.children.iter().map(|c| c.file_count).sum();
        self.file_count - child_sum
    }
}

/// Aggregate totals for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    /// The category.
    pub category: Category,
    /// Total bytes attributed to this category.
    pub size_bytes: u64,
    /// Total files attributed to this category.
    pub file_count: u64,
    /// Display color for the renderer.
    pub color: &'static str,
}

/// One entry in the ranked largest-directories list.
#[derive(Debug, Clone, Serialize)]
pub struct TopDirectory {
    /// Absolute path.
    pub path: String,
    /// Display name.
    pub name: String,
    /// Aggregated size in bytes.
    pub size_bytes: u64,
    /// Aggregated file count.
    pub file_count: u64,
    /// Category of the directory.
    pub category: Category,
    /// Display color for the renderer.
    pub color: &'static str,
}

/// Recursive node of the treemap visualization.
#[derive(Debug, Clone, Serialize)]
pub struct TreemapNode {
    /// Display name.
    pub name: String,
    /// Weight of the rectangle - aggregated size in bytes.
    pub value: u64,
    /// Aggregated file count, used by the count-weighted view.
    pub count: u64,
    /// Category of the directory.
    pub category: Category,
    /// Display color for the renderer.
    pub color: &'static str,
    /// Nested children (zero-size and inaccessible nodes pruned).
    pub children: Vec<TreemapNode>,
}

/// One node of the relationship graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Stable identifier - the absolute path.
    pub id: String,
    /// Display label - the directory name.
    pub label: String,
    /// Aggregated size in bytes.
    pub size_bytes: u64,
    /// Category of the directory.
    pub category: Category,
    /// Display color for the renderer.
    pub color: &'static str,
    /// Depth from the scan root, used for graph layout.
    pub depth: usize,
}

/// One structural parent-to-child edge of the relationship graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    /// Parent node id.
    pub from: String,
    /// Child node id.
    pub to: String,
}

/// Node-link graph of the largest directories.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipGraph {
    /// Selected nodes, largest first.
    pub nodes: Vec<GraphNode>,
    /// Edges between selected nodes only.
    pub edges: Vec<GraphEdge>,
}

/// Summary statistics for one completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Root path that was scanned.
    pub root_path: String,
    /// When the scan ran.
    pub scanned_at: DateTime<Utc>,
    /// Total bytes under the root (excluded content not counted).
    pub total_size_bytes: u64,
    /// Total files under the root.
    pub total_files: u64,
    /// Number of directory nodes in the tree.
    pub directories_scanned: u64,
    /// Directories that could not be listed.
    pub inaccessible_dirs: u64,
}

/// Everything the report renderer consumes.
#[derive(Debug, Clone, Serialize)]
pub struct VisualizationData {
    /// Scan summary shown in the report header.
    pub summary: ScanSummary,
    /// Per-category aggregate totals.
    pub categories: Vec<CategoryTotal>,
    /// Ranked largest directories.
    pub top_directories: Vec<TopDirectory>,
    /// Hierarchical treemap data.
    pub treemap: TreemapNode,
    /// Node-link relationship graph.
    pub graph: RelationshipGraph,
}
