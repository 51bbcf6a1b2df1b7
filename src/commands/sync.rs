//! Sync command implementation
//!
//! Loads the source registry, optionally filters it to one named source,
//! and runs the per-source pipeline. A failed source is reported and the
//! remaining sources still run; only a configuration load failure or an
//! unmatched `--source` filter exits non-zero.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use docsync::config::SyncConfig;
use docsync::output::{emoji, OutputConfig};
use docsync::pipeline;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the source registry
    #[arg(short, long, value_name = "PATH", env = "DOCSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Site root directory (defaults to current directory)
    #[arg(short, long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Only sync the source with this name
    #[arg(short, long, value_name = "NAME")]
    pub source: Option<String>,

    /// Show what would be done without cloning or writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, out: &OutputConfig) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from("sync-config.json"));
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    println!("{} docsync", emoji(out, "🔄", "[SYNC]"));
    println!("  config: {}", config_path.display());
    println!("  root:   {}", root.display());
    if args.dry_run {
        println!();
        println!("{} DRY RUN MODE - no changes will be made", emoji(out, "🔎", "[DRY]"));
    }

    let config = SyncConfig::from_file(&config_path)?;

    let mut sources: Vec<_> = config.sources.iter().collect();
    if let Some(name) = &args.source {
        sources.retain(|source| &source.name == name);
        if sources.is_empty() {
            anyhow::bail!("Source '{}' not found in configuration", name);
        }
    }
    println!("  sources: {}", sources.len());

    let mut failed = 0usize;
    for source in sources {
        println!();
        println!(
            "{} Syncing '{}' ({}@{})",
            emoji(out, "📥", "[GET]"),
            source.name,
            source.repo,
            source.branch
        );

        match pipeline::sync_source(source, &root, args.dry_run) {
            Ok(report) => println!(
                "{} {}: {} document(s)",
                emoji(out, "✅", "[OK]"),
                report.name,
                report.documents
            ),
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", emoji(out, "❌", "[FAIL]"), source.name, e);
            }
        }
    }

    println!();
    if failed > 0 {
        println!("Sync finished with {} failed source(s)", failed);
    } else {
        println!("Sync complete!");
    }
    Ok(())
}
