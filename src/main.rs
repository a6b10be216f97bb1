//! sysmap - Interactive File System Map Generator
//!
//! A CLI tool that scans a directory tree, aggregates size and
//! file-count statistics per directory, categorizes directories by
//! name patterns, and generates a single self-contained HTML report
//! with charts, a zoomable treemap, and a relationship graph.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid root, unreadable root, write failure)

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysmap::analysis;
use sysmap::cli::{Args, OutputFormat};
use sysmap::config::Config;
use sysmap::models::VisualizationData;
use sysmap::report;
use sysmap::scanner;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("sysmap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the pipeline
    if let Err(e) = run_pipeline(args) {
        error!("Scan failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .sysmap.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".sysmap.toml");

    if path.exists() {
        anyhow::bail!(".sysmap.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .sysmap.toml")?;

    println!("✅ Created .sysmap.toml with default settings.");
    println!("   Edit it to customize depth, excludes, categories, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete scan -> aggregate -> render pipeline.
fn run_pipeline(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // The path is validated present unless --init-config was given.
    let scan_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    // Step 1: Scan the file system
    println!("🔍 Scanning: {}", scan_path.display());
    let scan_config = scanner::ScanConfig::from(&config);
    let dir_scanner = scanner::DirScanner::new(scan_config);

    let spinner = make_spinner(args.quiet);
    spinner.set_message("Walking directory tree...");
    let outcome = dir_scanner.scan(&scan_path)?;
    spinner.finish_and_clear();

    info!(
        "Scan complete: {} directories, {} inaccessible",
        outcome.directories_scanned, outcome.inaccessible_dirs
    );

    // Step 2: Derive the visualization shapes
    println!("📊 Processing scan data...");
    let options = analysis::AggregateOptions::from(&config);
    let data = analysis::build_visualization(&outcome, &options);

    // Handle --dry-run: summarize and stop before writing anything.
    if args.dry_run {
        print_summary(&data, start_time);
        println!("\n✅ Dry run complete. No report was written.");
        return Ok(());
    }

    // Step 3: Render and save the report
    println!("📝 Generating report...");
    let output_path = PathBuf::from(&config.general.output);
    let contents = match args.format {
        OutputFormat::Html => report::generate_html_report(&data)?,
        OutputFormat::Json => report::generate_json_report(&data)?,
    };
    report::write_report(&output_path, &contents)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    print_summary(&data, start_time);
    println!("\n✅ System map saved to: {}", output_path.display());

    if args.open {
        open_report(&output_path);
    }

    Ok(())
}

/// Build the scan spinner (hidden in quiet mode).
fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print the console summary of a completed scan.
fn print_summary(data: &VisualizationData, start_time: Instant) {
    let summary = &data.summary;

    println!("\n📊 Scan Summary:");
    println!(
        "   Total size: {}",
        report::format_size(summary.total_size_bytes)
    );
    println!(
        "   Files: {} across {} directories",
        summary.total_files, summary.directories_scanned
    );
    if summary.inaccessible_dirs > 0 {
        println!(
            "   ⚠️  Inaccessible directories: {}",
            summary.inaccessible_dirs
        );
    }

    if !data.categories.is_empty() {
        println!("   Largest categories:");
        for total in data.categories.iter().take(3) {
            println!(
                "   - {}: {} ({} files)",
                total.category,
                report::format_size(total.size_bytes),
                total.file_count
            );
        }
    }

    println!("   Duration: {:.1}s", start_time.elapsed().as_secs_f64());
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .sysmap.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Open the generated report with the platform opener.
fn open_report(path: &Path) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(all(unix, not(target_os = "macos")))]
    let opener = "xdg-open";

    match std::process::Command::new(opener).arg(path).spawn() {
        Ok(_) => println!("🌐 Opened in browser"),
        Err(e) => warn!("Failed to open {}: {}", path.display(), e),
    }
}
