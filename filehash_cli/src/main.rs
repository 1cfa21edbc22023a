use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use colored::*;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod output;
mod progress;

use crate::config::{ConfigManager, get_config};
use crate::output::{OutputFormat, OutputFormatter, create_formatter};
use crate::progress::provider::create_progress_infrastructure;
use crate::progress::renderer::render_progress;
use filehash_core::hashing::AlgorithmIdExt;
use filehash_core::progress::{NullProvider, ProgressProvider};
use filehash_core::{
    AlgorithmId, BatchCoordinator, BatchResult, CancelFlag, FileReport, FileSource, HashEngine,
    HashResult, ProcessingStatus, verify_digest,
};

#[derive(Parser)]
#[command(name = "filehash")]
#[command(author, version, about = "File hashing tool - streaming multi-digest calculation with batch processing", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate digest(s) for file(s)
    Hash {
        /// Files to hash (up to the configured batch limit)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Digest algorithms, comma separated (e.g. sha256,md5)
        #[arg(short, long, value_delimiter = ',', default_value = "sha256")]
        algorithms: Vec<String>,

        /// Output format (text, json, csv)
        #[arg(short, long)]
        format: Option<String>,

        /// Write results to a file instead of stdout; a directory gets a
        /// timestamped export name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also report a combined digest over all selected algorithms
        #[arg(long)]
        combined: bool,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,
    },

    /// Verify a file against an expected digest
    Verify {
        /// File to verify
        file: PathBuf,

        /// Digest algorithm the expected value was produced with
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,

        /// Expected hex digest
        #[arg(short, long)]
        expected: String,
    },

    /// List supported digest algorithms
    Algorithms,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the resolved configuration
    Show,

    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Hash {
            files,
            algorithms,
            format,
            output,
            combined,
            no_progress,
        } => run_hash(files, algorithms, format, output, combined, no_progress).await,

        Commands::Verify {
            file,
            algorithm,
            expected,
        } => run_verify(file, algorithm, expected).await,

        Commands::Algorithms => {
            run_algorithms();
            Ok(())
        }

        Commands::Config { command } => run_config(command),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "filehash", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn parse_algorithms(algorithms: &[String]) -> Result<Vec<AlgorithmId>> {
    algorithms
        .iter()
        .map(|s| {
            AlgorithmId::from_str(s).with_context(|| format!("unknown algorithm '{s}'"))
        })
        .collect()
}

async fn run_hash(
    files: Vec<PathBuf>,
    algorithms: Vec<String>,
    format: Option<String>,
    output: Option<PathBuf>,
    combined: bool,
    no_progress: bool,
) -> Result<()> {
    let app_config = get_config()?;
    let algorithms = parse_algorithms(&algorithms)?;
    log::debug!("hashing {} file(s) with {algorithms:?}", files.len());

    if files.len() > app_config.hasher.max_files {
        anyhow::bail!(
            "too many files: {} requested, limit is {}",
            files.len(),
            app_config.hasher.max_files
        );
    }

    // Resolve paths to sources; files that fail to stat become failed
    // reports instead of aborting the batch
    let mut sources = Vec::new();
    let mut stat_failures: Vec<(usize, String, String)> = Vec::new();
    for (index, path) in files.iter().enumerate() {
        match FileSource::from_path(path).await {
            Ok(source) => sources.push(source),
            Err(e) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                stat_failures.push((index, name, e.to_string()));
            }
        }
    }

    let show_progress = !no_progress
        && app_config.output.progress_enabled
        && std::io::stderr().is_terminal()
        && output.is_none();

    let (provider, renderer) = if show_progress {
        let (provider, rx) = create_progress_infrastructure();
        (provider, Some(tokio::spawn(render_progress(rx))))
    } else {
        (Arc::new(NullProvider) as Arc<dyn ProgressProvider>, None)
    };

    let mut result = if sources.is_empty() {
        BatchResult {
            total_files: 0,
            successful: 0,
            failed: 0,
            skipped: 0,
            total_time: Duration::ZERO,
            reports: Vec::new(),
        }
    } else {
        let coordinator = BatchCoordinator::new(app_config.hasher.clone());
        coordinator
            .run(sources, &algorithms, provider.clone(), &CancelFlag::new())
            .await?
    };

    provider.complete();
    if let Some(handle) = renderer {
        let _ = handle.await;
    }

    // Splice stat failures back in at their original positions
    for (index, name, error) in stat_failures {
        let hashes = algorithms
            .iter()
            .map(|&algorithm| {
                (
                    algorithm,
                    HashResult::failure(algorithm, &name, 0, Duration::ZERO, &error),
                )
            })
            .collect();
        let report = FileReport {
            file_name: name,
            file_size: 0,
            status: ProcessingStatus::Failed,
            hashes,
            processing_time: Duration::ZERO,
        };
        let position = index.min(result.reports.len());
        result.reports.insert(position, report);
        result.total_files += 1;
        result.failed += 1;
    }

    let format = OutputFormat::from_string(
        format
            .as_deref()
            .unwrap_or(&app_config.output.default_format),
    )?;
    let use_color =
        app_config.output.color_enabled && std::io::stdout().is_terminal() && output.is_none();
    let formatter = create_formatter(format, use_color, combined);
    let rendered = formatter.format_batch(&result)?;

    match output {
        None => print!("{rendered}"),
        Some(path) => {
            let target = if path.is_dir() {
                let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
                path.join(format!("hash_results_{timestamp}.{}", format.extension()))
            } else {
                path
            };
            std::fs::write(&target, &rendered)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Results written to {}", target.display());
        }
    }

    if result.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

async fn run_verify(file: PathBuf, algorithm: String, expected: String) -> Result<()> {
    let app_config = get_config()?;
    let algorithm = AlgorithmId::from_str(&algorithm)
        .with_context(|| format!("unknown algorithm '{algorithm}'"))?;

    let engine = HashEngine::new(app_config.hasher);
    let source = FileSource::from_path(&file).await?;
    let file_name = source.name().to_string();

    let results = engine.hash(source, &[algorithm]).await?;
    let result = &results[&algorithm];

    let Some(digest) = result.digest.as_deref() else {
        anyhow::bail!(
            "could not hash {file_name}: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    };

    if verify_digest(&expected, digest) {
        println!(
            "{} {}: {} digest matches",
            "✓".green(),
            file_name,
            algorithm.display_name()
        );
        Ok(())
    } else {
        println!(
            "{} {}: {} digest mismatch",
            "✗".red(),
            file_name,
            algorithm.display_name()
        );
        println!("  expected: {}", expected.trim().to_lowercase());
        println!("  actual:   {digest}");
        std::process::exit(1);
    }
}

fn run_algorithms() {
    println!("{}", "Supported algorithms:".bold());
    for algorithm in AlgorithmId::ALL {
        let algo_impl = algorithm.to_impl();
        println!(
            "  {:<10} {} ({} bits)",
            algorithm.to_string(),
            algo_impl.display_name(),
            algo_impl.output_size() * 8
        );
    }
}

fn run_config(command: ConfigCommand) -> Result<()> {
    let manager = ConfigManager::new();
    match command {
        ConfigCommand::Show => {
            print!("{}", manager.show()?);
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
            Ok(())
        }
    }
}
