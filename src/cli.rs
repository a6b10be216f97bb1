//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// sysmap - interactive file system map generator
///
/// Scan a directory tree, categorize what lives where, and generate a
/// single self-contained HTML report with charts, a zoomable treemap,
/// and a directory relationship graph.
///
/// Examples:
///   sysmap ~
///   sysmap ~/work --depth 4 --output ~/Desktop/work_map.html --open
///   sysmap / --exclude proc,sys,dev --format json
///   sysmap --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Root directory to scan
    ///
    /// Must exist and be a directory. Not required with --init-config.
    #[arg(value_name = "PATH", required_unless_present = "init_config")]
    pub path: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to system_map.html (or the config file's setting).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum directory depth to scan (root = 0)
    #[arg(short, long, value_name = "N", env = "SYSMAP_DEPTH")]
    pub depth: Option<usize>,

    /// Directory names to exclude (comma-separated)
    ///
    /// Replaces the default exclusion set.
    /// Example: --exclude .git,node_modules,target
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Follow directory symlinks
    ///
    /// Links resolving to a directory already on the traversal path are
    /// always skipped, so cycles cannot occur.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Number of entries in the top-directories chart
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Maximum depth considered when ranking top directories
    #[arg(long, value_name = "N")]
    pub rank_depth: Option<usize>,

    /// Node budget for the relationship graph
    #[arg(long, value_name = "COUNT")]
    pub graph_nodes: Option<usize>,

    /// Output format (html, json)
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sysmap.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .sysmap.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Scan and print a console summary without writing a report
    #[arg(long)]
    pub dry_run: bool,

    /// Open the generated report in the default browser
    #[arg(long)]
    pub open: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML report (default)
    #[default]
    Html,
    /// JSON dump of the processed data
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref path) = self.path {
            if !path.exists() {
                return Err(format!("Scan path does not exist: {}", path.display()));
            }
            if !path.is_dir() {
                return Err(format!("Scan path is not a directory: {}", path.display()));
            }
        }

        if self.depth == Some(0) {
            return Err("Depth must be at least 1".to_string());
        }

        if self.top == Some(0) {
            return Err("Top-directory count must be at least 1".to_string());
        }

        if self.graph_nodes == Some(0) {
            return Err("Graph node budget must be at least 1".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.open && self.dry_run {
            return Err("Cannot use --open with --dry-run (no report is written)".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            path: Some(PathBuf::from(".")),
            output: None,
            depth: None,
            exclude: None,
            follow_symlinks: false,
            top: None,
            rank_depth: None,
            graph_nodes: None,
            format: OutputFormat::Html,
            config: None,
            init_config: false,
            dry_run: false,
            open: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_path() {
        let mut args = make_args();
        args.path = Some(PathBuf::from("/definitely/not/here"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_depth() {
        let mut args = make_args();
        args.depth = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());

        let mut args = make_args();
        args.open = true;
        args.dry_run = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.init_config = true;
        args.depth = Some(0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
