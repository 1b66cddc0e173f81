/// stylie: CSS class intelligence for style-aware completion
///
/// Scans a workspace's SCSS sources, indexes class names by variant key, and
/// answers completion queries against documents.
///
/// Commands:
/// - scan: full workspace scan, prints cache statistics or the variant map
/// - complete: classify an offset in a document and print the candidates
/// - watch: scan, then keep the cache live until interrupted
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stylie::CompletionEngine;
use stylie::context;
use tracing::info;

#[derive(Parser)]
#[command(name = "stylie")]
#[command(about = "CSS class intelligence with variant-grouped completion", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a workspace and print cache statistics
    Scan {
        /// Workspace root to scan recursively
        #[arg(short, long)]
        dir: PathBuf,

        /// Print the full variant map as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Optional log file path for debug logging
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Offer completions for an offset in a document
    Complete {
        /// Workspace root holding the style sources
        #[arg(short, long)]
        dir: PathBuf,

        /// Document to classify
        #[arg(long)]
        doc: PathBuf,

        /// Byte offset of the cursor within the document
        #[arg(short, long)]
        offset: usize,

        /// Language id override (defaults to the document extension)
        #[arg(long)]
        language: Option<String>,

        /// Optional log file path for debug logging
        #[arg(short, long)]
        log: Option<PathBuf>,
    },

    /// Scan, then watch style sources until Ctrl-C
    Watch {
        /// Workspace root to watch
        #[arg(short, long)]
        dir: PathBuf,

        /// Optional log file path for debug logging
        #[arg(short, long)]
        log: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.command {
        Commands::Scan { log, .. } => log.clone(),
        Commands::Complete { log, .. } => log.clone(),
        Commands::Watch { log, .. } => log.clone(),
    };
    init_logging(log_path.as_ref())?;

    match cli.command {
        Commands::Scan { dir, json, log: _ } => scan_workspace(dir, json),
        Commands::Complete {
            dir,
            doc,
            offset,
            language,
            log: _,
        } => complete_at(dir, doc, offset, language),
        Commands::Watch { dir, log: _ } => watch_workspace(dir).await,
    }
}

/// Initialize logging with optional file output
fn init_logging(log_path: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    if let Some(log_file) = log_path {
        // With log file: info+ to file, warn+ to stderr
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::never(
            log_file
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("stylie.log"),
        );

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender.and(std::io::stderr.with_max_level(tracing::Level::WARN)))
            .init();
    } else {
        // No log file: warn+ to stderr only (unless RUST_LOG overrides)
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn scan_workspace(dir: PathBuf, json: bool) -> Result<()> {
    let engine = CompletionEngine::new(dir);
    let scan_stats = engine.rescan();
    let cache_stats = engine.stats();

    if json {
        let cache = engine.cache();
        let cache_lock = cache
            .lock()
            .map_err(|_| anyhow::anyhow!("class cache mutex poisoned"))?;
        println!("{}", serde_json::to_string_pretty(cache_lock.variant_map())?);
    } else {
        println!(
            "Scanned {} style files ({} failed) in {}ms",
            scan_stats.files_processed, scan_stats.files_failed, scan_stats.processing_time_ms
        );
        println!(
            "{} classes in {} variant groups",
            cache_stats.classes, cache_stats.variant_groups
        );
    }

    Ok(())
}

fn complete_at(dir: PathBuf, doc: PathBuf, offset: usize, language: Option<String>) -> Result<()> {
    let engine = CompletionEngine::new(dir);
    engine.rescan();

    let text = std::fs::read_to_string(&doc)
        .with_context(|| format!("Failed to read document {}", doc.display()))?;

    let language_id = match language {
        Some(id) => id,
        None => context::language_id_for_path(&doc)
            .ok_or_else(|| {
                anyhow::anyhow!("Cannot infer a supported language for {}", doc.display())
            })?
            .to_string(),
    };

    match engine.provide_completions(&text, offset, &language_id) {
        Some(candidates) => {
            for candidate in candidates {
                println!("{}", serde_json::to_string(&candidate)?);
            }
        }
        None => {
            eprintln!("No suggestions: offset {} is not in a class context", offset);
        }
    }

    Ok(())
}

async fn watch_workspace(dir: PathBuf) -> Result<()> {
    let mut engine = CompletionEngine::new(dir);
    let scan_stats = engine.activate().await?;
    info!(
        "Initial scan: {} files processed, {} failed",
        scan_stats.files_processed, scan_stats.files_failed
    );

    println!("Watching for style changes (Ctrl-C to stop)...");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    engine.deactivate().await?;
    Ok(())
}
