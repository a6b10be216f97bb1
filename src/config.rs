//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sysmap.toml` files.

use crate::models::{default_category_rules, CategoryRule};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Ordered categorization rules; first match wins.
    #[serde(default = "default_category_rules")]
    pub categories: Vec<CategoryRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scanner: ScannerConfig::default(),
            report: ReportConfig::default(),
            categories: default_category_rules(),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "system_map.html".to_string()
}

/// Filesystem scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum scan depth (root = 0).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Directory names skipped entirely.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Follow directory symlinks.
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            excludes: default_excludes(),
            follow_symlinks: false,
        }
    }
}

fn default_max_depth() -> usize {
    3
}

fn default_excludes() -> Vec<String> {
    vec![
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
    .collect()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Entries in the largest-directories list.
    #[serde(default = "default_top_dirs")]
    pub top_dirs: usize,

    /// Maximum node depth considered for that ranking.
    #[serde(default = "default_rank_depth")]
    pub rank_depth: usize,

    /// Node budget for the relationship graph.
    #[serde(default = "default_graph_nodes")]
    pub graph_nodes: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_dirs: default_top_dirs(),
            rank_depth: default_rank_depth(),
            graph_nodes: default_graph_nodes(),
        }
    }
}

fn default_top_dirs() -> usize {
    15
}

fn default_rank_depth() -> usize {
    2
}

fn default_graph_nodes() -> usize {
    50
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".sysmap.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings; optional
    /// arguments only override when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(depth) = args.depth {
            self.scanner.max_depth = depth;
        }
        if let Some(ref excludes) = args.exclude {
            self.scanner.excludes = excludes.clone();
        }
        if args.follow_symlinks {
            self.scanner.follow_symlinks = true;
        }
        if let Some(top) = args.top {
            self.report.top_dirs = top;
        }
        if let Some(rank_depth) = args.rank_depth {
            self.report.rank_depth = rank_depth;
        }
        if let Some(graph_nodes) = args.graph_nodes {
            self.report.graph_nodes = graph_nodes;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "system_map.html");
        assert_eq!(config.scanner.max_depth, 3);
        assert!(config.scanner.excludes.contains(&".git".to_string()));
        assert!(!config.scanner.follow_symlinks);
        assert_eq!(config.report.top_dirs, 15);
        assert_eq!(config.categories[0].category, Category::Projects);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_map.html"
verbose = true

[scanner]
max_depth = 5
excludes = [".git", "target"]

[report]
top_dirs = 8

[[categories]]
name = "tools"
patterns = ["bin"]

[[categories]]
name = "projects"
patterns = ["src"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_map.html");
        assert!(config.general.verbose);
        assert_eq!(config.scanner.max_depth, 5);
        assert_eq!(config.scanner.excludes, vec![".git", "target"]);
        assert_eq!(config.report.top_dirs, 8);
        // Partial sections fall back to defaults.
        assert_eq!(config.report.graph_nodes, 50);
        // Rule order is preserved.
        assert_eq!(config.categories[0].category, Category::Tools);
        assert_eq!(config.categories[1].category, Category::Projects);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[[categories]]"));

        // Round-trips through the parser.
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scanner.max_depth, 3);
        assert_eq!(parsed.categories.len(), 7);
    }
}
