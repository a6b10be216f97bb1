//! HTML and JSON report generation.
//!
//! This module serializes the processed visualization data into a
//! single self-contained HTML document, or alternatively into JSON for
//! downstream tooling.

use super::template::REPORT_TEMPLATE;
use crate::models::VisualizationData;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate the complete HTML report.
pub fn generate_html_report(data: &VisualizationData) -> Result<String> {
    let summary = &data.summary;

    let inaccessible_note = if summary.inaccessible_dirs > 0 {
        format!("{} inaccessible directories", summary.inaccessible_dirs)
    } else {
        "all directories readable".to_string()
    };

    let html = REPORT_TEMPLATE
        .replace("__ROOT_PATH__", &escape_html(&summary.root_path))
        .replace("__INACCESSIBLE_NOTE__", &inaccessible_note)
        .replace("__TOTAL_SIZE__", &format_size(summary.total_size_bytes))
        .replace("__TOTAL_FILES__", &summary.total_files.to_string())
        .replace("__TOTAL_DIRS__", &summary.directories_scanned.to_string())
        .replace(
            "__SCAN_DATE__",
            &summary.scanned_at.format("%Y-%m-%d %H:%M").to_string(),
        )
        .replace("__CATEGORY_DATA__", &embed_json(&data.categories)?)
        .replace("__TOP_DIRS_DATA__", &embed_json(&data.top_directories)?)
        .replace("__TREE_DATA__", &embed_json(&data.treemap)?)
        .replace("__NETWORK_DATA__", &embed_json(&data.graph)?);

    Ok(html)
}

/// Generate a JSON report of the full renderer contract.
pub fn generate_json_report(data: &VisualizationData) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Into::into)
}

/// Write a rendered report to a file.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Serialize a value for embedding inside a `<script>` block.
///
/// `<` is escaped so path names can never smuggle a closing
/// `</script>` tag into the document.
fn embed_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Minimal HTML text escaping for values placed outside scripts.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a byte count for human consumption.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    const TIB: u64 = GIB * 1024;

    match bytes {
        b if b >= TIB => format!("{:.1} TB", b as f64 / TIB as f64),
        b if b >= GIB => format!("{:.1} GB", b as f64 / GIB as f64),
        b if b >= MIB => format!("{:.1} MB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KB", b as f64 / KIB as f64),
        b => format!("{} B", b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryTotal, GraphEdge, GraphNode, RelationshipGraph, ScanSummary,
        TopDirectory, TreemapNode, VisualizationData,
    };
    use chrono::Utc;

    fn create_test_data() -> VisualizationData {
        VisualizationData {
            summary: ScanSummary {
                root_path: "/home/user".to_string(),
                scanned_at: Utc::now(),
                total_size_bytes: 1100,
                total_files: 3,
                directories_scanned: 5,
                inaccessible_dirs: 1,
            },
            categories: vec![CategoryTotal {
                category: Category::Projects,
                size_bytes: 1000,
                file_count: 2,
                color: Category::Projects.color(),
            }],
            top_directories: vec![TopDirectory {
                path: "/home/user/projects".to_string(),
                name: "projects".to_string(),
                size_bytes: 1000,
                file_count: 2,
                category: Category::Projects,
                color: Category::Projects.color(),
            }],
            treemap: TreemapNode {
                name: "user".to_string(),
                value: 1100,
                count: 3,
                category: Category::Other,
                color: Category::Other.color(),
                children: vec![],
            },
            graph: RelationshipGraph {
                nodes: vec![GraphNode {
                    id: "/home/user".to_string(),
                    label: "user".to_string(),
                    size_bytes: 1100,
                    category: Category::Other,
                    color: Category::Other.color(),
                    depth: 0,
                }],
                edges: vec![GraphEdge {
                    from: "/home/user".to_string(),
                    to: "/home/user/projects".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_generate_html_report() {
        let data = create_test_data();
        let html = generate_html_report(&data).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("/home/user"));
        assert!(html.contains("1.1 KB"));
        assert!(html.contains("1 inaccessible directories"));
        assert!(html.contains("categoryChart"));
        assert!(html.contains("id=\"treemap\""));
        assert!(html.contains("id=\"network\""));
        assert!(html.contains("\"projects\""));
        // Every placeholder must have been replaced.
        assert!(!html.contains("__CATEGORY_DATA__"));
        assert!(!html.contains("__TREE_DATA__"));
        assert!(!html.contains("__SCAN_DATE__"));
    }

    #[test]
    fn test_html_report_escapes_script_closers() {
        let mut data = create_test_data();
        data.top_directories[0].name = "evil</script><script>".to_string();
        let html = generate_html_report(&data).unwrap();
        assert!(!html.contains("evil</script>"));
    }

    #[test]
    fn test_generate_json_report() {
        let data = create_test_data();
        let json = generate_json_report(&data).unwrap();

        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"top_directories\""));
        assert!(json.contains("\"treemap\""));
        assert!(json.contains("\"graph\""));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["total_size_bytes"], 1100);
        assert_eq!(parsed["categories"][0]["category"], "projects");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024 * 1024), "2.0 TB");
    }
}
