//! Scan-tree aggregation and statistics.
//!
//! This module derives the four visualization shapes from a scanned
//! [`DirectoryNode`] tree: per-category totals, the ranked
//! largest-directories list, the pruned treemap hierarchy, and the
//! relationship graph. Every function here is pure - feed it a
//! synthetic tree and it never touches the filesystem.

use crate::models::{
    Category, CategoryTotal, DirectoryNode, GraphEdge, GraphNode, RelationshipGraph, ScanSummary,
    TopDirectory, TreemapNode, VisualizationData,
};
use crate::scanner::ScanOutcome;
use chrono::Utc;
use std::collections::{HashMap, HashSet};

/// Tunables for the derived shapes.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Entries kept in the largest-directories list.
    pub top_dirs: usize,
    /// Maximum node depth considered for that ranking.
    pub rank_depth: usize,
    /// Node budget for the relationship graph.
    pub graph_nodes: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_dirs: 15,
            rank_depth: 2,
            graph_nodes: 50,
        }
    }
}

impl From<&crate::config::Config> for AggregateOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            top_dirs: config.report.top_dirs,
            rank_depth: config.report.rank_depth,
            graph_nodes: config.report.graph_nodes,
        }
    }
}

/// Aggregate sizes and file counts by category.
///
/// Each node contributes only its *direct* files - bytes already
/// attributed to a child stay in the child's bucket - so the bucket
/// totals sum exactly to the root's totals. Empty buckets are dropped.
pub fn category_totals(root: &DirectoryNode) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<Category, (u64, u64)> = HashMap::new();
    accumulate(root, &mut buckets);

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .filter(|(_, (size, count))| *size > 0 || *count > 0)
        .map(|(category, (size_bytes, file_count))| CategoryTotal {
            category,
            size_bytes,
            file_count,
            color: category.color(),
        })
        .collect();

    totals.sort_by(|a, b| {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.category.to_string().cmp(&b.category.to_string()))
    });
    totals
}

fn accumulate(node: &DirectoryNode, buckets: &mut HashMap<Category, (u64, u64)>) {
    let entry = buckets.entry(node.category).or_default();
    entry.0 += node.direct_size_bytes();
    entry.1 += node.direct_file_count();
    for child in &node.children {
        accumulate(child, buckets);
    }
}

/// Rank the largest directories.
///
/// All nodes with `1 <= depth <= rank_depth` compete (the root itself
/// always holds 100% of the bytes and is excluded). Sorted descending
/// by size with path order breaking ties, then truncated to `limit`.
pub fn top_directories(
    root: &DirectoryNode,
    limit: usize,
    rank_depth: usize,
) -> Vec<TopDirectory> {
    let mut candidates: Vec<&DirectoryNode> = Vec::new();
    collect_ranked(root, rank_depth, &mut candidates);

    candidates.sort_by(|a, b| {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.path.cmp(&b.path))
    });
    candidates.truncate(limit);

    candidates
        .into_iter()
        .map(|node| TopDirectory {
            path: node.path.to_string_lossy().to_string(),
            name: node.name.clone(),
            size_bytes: node.size_bytes,
            file_count: node.file_count,
            category: node.category,
            color: node.category.color(),
        })
        .collect()
}

fn collect_ranked<'a>(
    node: &'a DirectoryNode,
    rank_depth: usize,
    out: &mut Vec<&'a DirectoryNode>,
) {
    if node.depth >= 1 {
        out.push(node);
    }
    for child in &node.children {
        if child.depth <= rank_depth {
            collect_ranked(child, rank_depth, out);
        }
    }
}

/// Build the treemap hierarchy.
///
/// Mirrors the scan tree with zero-size and inaccessible nodes pruned.
/// The root is always kept so an empty scan still renders a frame.
pub fn treemap(root: &DirectoryNode) -> TreemapNode {
    TreemapNode {
        name: root.name.clone(),
        value: root.size_bytes,
        count: root.file_count,
        category: root.category,
        color: root.category.color(),
        children: root.children.iter().filter_map(treemap_node).collect(),
    }
}

fn treemap_node(node: &DirectoryNode) -> Option<TreemapNode> {
    if !node.accessible || node.size_bytes == 0 {
        return None;
    }
    Some(TreemapNode {
        name: node.name.clone(),
        value: node.size_bytes,
        count: node.file_count,
        category: node.category,
        color: node.category.color(),
        children: node.children.iter().filter_map(treemap_node).collect(),
    })
}

/// Build the node-link relationship graph.
///
/// Selects the `limit` largest nodes across the whole tree (same
/// deterministic ordering as the ranking) and connects each selected
/// node to its structural parent when the parent was also selected.
/// Nodes whose parent missed the cut become graph roots.
pub fn relationship_graph(root: &DirectoryNode, limit: usize) -> RelationshipGraph {
    let mut flat: Vec<(&DirectoryNode, Option<String>)> = Vec::new();
    collect_with_parent(root, None, &mut flat);

    flat.sort_by(|(a, _), (b, _)| {
        b.size_bytes
            .cmp(&a.size_bytes)
            .then_with(|| a.path.cmp(&b.path))
    });
    flat.truncate(limit);

    let selected: HashSet<String> = flat
        .iter()
        .map(|(node, _)| node.path.to_string_lossy().to_string())
        .collect();

    let mut nodes = Vec::with_capacity(flat.len());
    let mut edges = Vec::new();

    for (node, parent) in &flat {
        let id = node.path.to_string_lossy().to_string();
        nodes.push(GraphNode {
            id: id.clone(),
            label: node.name.clone(),
            size_bytes: node.size_bytes,
            category: node.category,
            color: node.category.color(),
            depth: node.depth,
        });
        if let Some(parent_id) = parent {
            if selected.contains(parent_id) {
                edges.push(GraphEdge {
                    from: parent_id.clone(),
                    to: id,
                });
            }
        }
    }

    RelationshipGraph { nodes, edges }
}

fn collect_with_parent<'a>(
    node: &'a DirectoryNode,
    parent: Option<String>,
    out: &mut Vec<(&'a DirectoryNode, Option<String>)>,
) {
    let id = node.path.to_string_lossy().to_string();
    out.push((node, parent));
    for child in &node.children {
        collect_with_parent(child, Some(id.clone()), out);
    }
}

/// Assemble the full renderer contract from a completed scan.
pub fn build_visualization(outcome: &ScanOutcome, options: &AggregateOptions) -> VisualizationData {
    let root = &outcome.root;

    let summary = ScanSummary {
        root_path: root.path.to_string_lossy().to_string(),
        scanned_at: Utc::now(),
        total_size_bytes: root.size_bytes,
        total_files: root.file_count,
        directories_scanned: outcome.directories_scanned,
        inaccessible_dirs: outcome.inaccessible_dirs,
    };

    VisualizationData {
        summary,
        categories: category_totals(root),
        top_directories: top_directories(root, options.top_dirs, options.rank_depth),
        treemap: treemap(root),
        graph: relationship_graph(root, options.graph_nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Synthetic node builder - the aggregator never needs a real
    /// filesystem.
    fn node(
        path: &str,
        depth: usize,
        category: Category,
        size: u64,
        files: u64,
        children: Vec<DirectoryNode>,
    ) -> DirectoryNode {
        let path = PathBuf::from(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        DirectoryNode {
            path,
            name,
            depth,
            size_bytes: size,
            file_count: files,
            category,
            children,
            accessible: true,
        }
    }

    /// Reference layout: projects/app (300 + 700 bytes) and
    /// knowledge/notes (100 bytes).
    fn sample_tree() -> DirectoryNode {
        let app = node("/home/projects/app", 2, Category::Projects, 1000, 2, vec![]);
        let projects = node("/home/projects", 1, Category::Projects, 1000, 2, vec![app]);
        let notes = node("/home/knowledge/notes", 2, Category::Knowledge, 100, 1, vec![]);
        let knowledge = node("/home/knowledge", 1, Category::Knowledge, 100, 1, vec![notes]);
        node(
            "/home",
            0,
            Category::Other,
            1100,
            3,
            vec![projects, knowledge],
        )
    }

    #[test]
    fn test_category_totals_sum_to_root() {
        let tree = sample_tree();
        let totals = category_totals(&tree);

        let size_sum: u64 = totals.iter().map(|t| t.size_bytes).sum();
        let file_sum: u64 = totals.iter().map(|t| t.file_count).sum();
        assert_eq!(size_sum, tree.size_bytes);
        assert_eq!(file_sum, tree.file_count);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, Category::Projects);
        assert_eq!(totals[0].size_bytes, 1000);
        assert_eq!(totals[1].category, Category::Knowledge);
        assert_eq!(totals[1].size_bytes, 100);
    }

    #[test]
    fn test_category_totals_no_double_counting() {
        // Parent and child share a category; bytes must be counted once.
        let child = node("/r/app/sub-app", 2, Category::Projects, 400, 4, vec![]);
        let parent = node("/r/app", 1, Category::Projects, 1000, 10, vec![child]);
        let root = node("/r", 0, Category::Other, 1000, 10, vec![parent]);

        let totals = category_totals(&root);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].size_bytes, 1000);
        assert_eq!(totals[0].file_count, 10);
    }

    #[test]
    fn test_top_directories_sorted_and_truncated() {
        let tree = sample_tree();
        let top = top_directories(&tree, 2, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "projects");
        assert_eq!(top[0].size_bytes, 1000);
        assert_eq!(top[1].name, "app");
        // Every kept entry is at least as large as the first excluded one.
        let all = top_directories(&tree, usize::MAX, 2);
        assert!(top.last().unwrap().size_bytes >= all[2].size_bytes);
    }

    #[test]
    fn test_top_directories_tie_break_is_path_order() {
        let a = node("/r/bb", 1, Category::Other, 500, 1, vec![]);
        let b = node("/r/aa", 1, Category::Other, 500, 1, vec![]);
        let root = node("/r", 0, Category::Other, 1000, 2, vec![a, b]);

        let top = top_directories(&root, 10, 2);
        assert_eq!(top[0].path, "/r/aa");
        assert_eq!(top[1].path, "/r/bb");
    }

    #[test]
    fn test_top_directories_respect_rank_depth_and_skip_root() {
        let deep = node("/r/a/b/c", 3, Category::Other, 900, 1, vec![]);
        let b = node("/r/a/b", 2, Category::Other, 900, 1, vec![deep]);
        let a = node("/r/a", 1, Category::Other, 900, 1, vec![b]);
        let root = node("/r", 0, Category::Other, 900, 1, vec![a]);

        let top = top_directories(&root, 10, 2);
        let paths: Vec<&str> = top.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, ["/r/a", "/r/a/b"]);
    }

    #[test]
    fn test_treemap_prunes_empty_and_inaccessible() {
        let empty = node("/r/empty", 1, Category::Other, 0, 0, vec![]);
        let mut locked = node("/r/locked", 1, Category::Other, 0, 0, vec![]);
        locked.accessible = false;
        let full = node("/r/full", 1, Category::Projects, 10, 1, vec![]);
        let root = node("/r", 0, Category::Other, 10, 1, vec![empty, locked, full]);

        let map = treemap(&root);
        assert_eq!(map.value, 10);
        assert_eq!(map.children.len(), 1);
        assert_eq!(map.children[0].name, "full");
        assert_eq!(map.children[0].color, Category::Projects.color());
    }

    #[test]
    fn test_treemap_keeps_empty_root() {
        let root = node("/r", 0, Category::Other, 0, 0, vec![]);
        let map = treemap(&root);
        assert_eq!(map.name, "r");
        assert_eq!(map.value, 0);
    }

    #[test]
    fn test_graph_edges_connect_selected_nodes_only() {
        let tree = sample_tree();
        let graph = relationship_graph(&tree, 3);

        // Top 3 by size: root (1100), projects (1000), app (1000).
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["/home", "/home/projects", "/home/projects/app"]);

        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].from, "/home");
        assert_eq!(graph.edges[0].to, "/home/projects");
        assert_eq!(graph.edges[1].from, "/home/projects");
        assert_eq!(graph.edges[1].to, "/home/projects/app");
    }

    #[test]
    fn test_graph_orphans_get_no_edge() {
        // A node can outrank its own parent (the aggregator takes any
        // tree). When the parent misses the cut the child becomes a
        // graph root with no edge.
        let big = node("/r/a/big", 2, Category::Other, 900, 1, vec![]);
        let a = node("/r/a", 1, Category::Other, 100, 1, vec![big]);
        let z = node("/r/z", 1, Category::Other, 900, 1, vec![]);
        let root = node("/r", 0, Category::Other, 1000, 2, vec![a, z]);

        let graph = relationship_graph(&root, 3);
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["/r", "/r/a/big", "/r/z"]);

        // Only /r/z has a selected parent.
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, "/r");
        assert_eq!(graph.edges[0].to, "/r/z");
    }

    #[test]
    fn test_build_visualization_summary() {
        let outcome = ScanOutcome {
            root: sample_tree(),
            directories_scanned: 5,
            inaccessible_dirs: 0,
        };
        let data = build_visualization(&outcome, &AggregateOptions::default());

        assert_eq!(data.summary.total_size_bytes, 1100);
        assert_eq!(data.summary.total_files, 3);
        assert_eq!(data.summary.directories_scanned, 5);
        assert_eq!(data.summary.root_path, "/home");
        assert_eq!(data.treemap.value, 1100);
        assert!(!data.categories.is_empty());
    }
}
