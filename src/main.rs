use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use rayon::prelude::*;
use spellscan::cli::output::{self, JsonReport, OutputFormat, OverlayReporter, SpinnerProgress};
use spellscan::dict::manager::{self, CachedSource};
use spellscan::dict::{DictionarySource, FileSource, HttpSource};
use spellscan::document::FileDocument;
use spellscan::trigger::controller::Progress;
use spellscan::{checker, Config, Readiness, ScanController, ScanHandle, ScanResult};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "spellscan")]
#[command(version, about = "Scan documents for words missing from a word list", long_about = None)]
struct Cli {
    /// Files or directories to scan
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Keep scanning one file: Enter after an edit schedules a debounced
    /// rescan, `r` rescans immediately, `q` quits
    #[arg(short, long)]
    watch: bool,

    /// Local word list (one word per line) instead of the downloaded one
    #[arg(short, long, env = "SPELLSCAN_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Delay before an interaction-triggered rescan, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Always fetch the word list instead of using the cached copy
    #[arg(long)]
    no_cache: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if mistakes are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Word list management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List cached word lists
    List,
    /// Download the word list into the cache
    Download {
        /// Word list URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },
    /// Show word list info
    Info {
        /// Word list file (defaults to the cached copy)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spellscan=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellscan", &mut io::stdout());
        return Ok(());
    }

    if let Some(command) = cli.command {
        return handle_command(command).await;
    }

    let config = Config::load(cli.dictionary.clone(), cli.debounce_ms, cli.no_cache)?;

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let colored = !cli.no_color;
    let source = dictionary_source(&config)?;

    if cli.watch {
        let [path] = cli.files.as_slice() else {
            anyhow::bail!("--watch takes exactly one file");
        };
        if !path.is_file() {
            anyhow::bail!("File not found: {}", path.display());
        }
        return watch(path, source, &config, colored, cli.format).await;
    }

    let total_mistakes = scan_once(&cli.files, source.as_ref(), colored, cli.format).await;

    if total_mistakes > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn dictionary_source(config: &Config) -> Result<Box<dyn DictionarySource>> {
    if let Some(path) = &config.dictionary_path {
        return Ok(Box::new(FileSource::new(path)));
    }
    if config.use_cache() {
        return Ok(Box::new(CachedSource::new(
            config.dictionary_url.clone(),
            manager::cache_dir()?,
        )));
    }
    Ok(Box::new(HttpSource::new(config.dictionary_url.clone())))
}

/// Scan every document once and return the total number of mistakes.
async fn scan_once(
    inputs: &[PathBuf],
    source: &dyn DictionarySource,
    colored: bool,
    format: OutputFormat,
) -> usize {
    let mut progress = SpinnerProgress::default();
    progress.loading_started();
    let fetched = source.fetch_raw_text().await;
    progress.loading_finished();

    let readiness = Readiness::resolve(fetched);
    if let Readiness::Failed { error, .. } = &readiness {
        output::print_dictionary_warning(error, colored);
    }
    let Some(dictionary) = readiness.dictionary() else {
        return 0;
    };

    let documents = collect_documents(inputs);
    let results: Vec<(PathBuf, spellscan::error::Result<ScanResult>)> = documents
        .into_par_iter()
        .map(|path| {
            let result = FileDocument::new(&path)
                .read()
                .map(|text| checker::scan(&text, dictionary));
            (path, result)
        })
        .collect();

    let mut scanned = Vec::new();
    for (path, result) in &results {
        match result {
            Ok(result) => scanned.push((path.display().to_string(), result)),
            Err(e) => eprintln!("Error: {}: {}", path.display(), e),
        }
    }

    let total_mistakes = scanned.iter().map(|(_, result)| result.mistakes.total()).sum();

    match format {
        OutputFormat::Text => {
            for (label, result) in &scanned {
                output::print_report(label, result, colored, format);
            }
            output::print_scan_summary(total_mistakes, scanned.len(), colored);
        }
        OutputFormat::Json => {
            let reports: Vec<JsonReport> = scanned
                .iter()
                .map(|(label, result)| JsonReport {
                    document: label,
                    result,
                })
                .collect();
            output::print_json_reports(&reports);
        }
    }

    total_mistakes
}

fn collect_documents(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    for input in inputs {
        if input.is_dir() {
            documents.extend(
                WalkDir::new(input)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path()),
            );
        } else if input.exists() {
            documents.push(input.clone());
        } else {
            eprintln!("Error: File not found: {}", input.display());
        }
    }

    documents
}

async fn watch(
    path: &Path,
    source: Box<dyn DictionarySource>,
    config: &Config,
    colored: bool,
    format: OutputFormat,
) -> Result<()> {
    let (handle, events) = ScanHandle::channel();
    let reporter = OverlayReporter::new(path.display().to_string(), colored, format);
    let controller = ScanController::new(FileDocument::new(path), reporter, config.debounce())
        .with_progress(SpinnerProgress::default());
    let task = tokio::spawn(controller.run(source, events));

    eprintln!("Watching {} (Enter: rescan after edit, r: rescan now, q: quit)", path.display());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let delivered = match line.trim() {
            "q" | "quit" => break,
            "r" | "rescan" => handle.rescan().await,
            _ => handle.interact().await,
        };
        if !delivered {
            break;
        }
    }

    drop(handle);
    let scans = task.await?;
    info!("Performed {} scans of {}", scans, path.display());

    Ok(())
}

async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                manager::list_dictionaries()?;
            }
            DictCommands::Download { url } => {
                let url = match url {
                    Some(url) => url,
                    None => Config::load(None, None, false)?.dictionary_url,
                };
                let cache_path = manager::cache_file(&manager::cache_dir()?, &url);
                manager::download_dictionary(&url, &cache_path).await?;
            }
            DictCommands::Info { path } => {
                let path = match path {
                    Some(path) => path,
                    None => manager::cache_file(
                        &manager::cache_dir()?,
                        &Config::load(None, None, false)?.dictionary_url,
                    ),
                };
                manager::show_info(&path)?;
            }
        },
    }
    Ok(())
}
