use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clausemark::segmenter::DEFAULT_CHUNK_SIZE;
use clausemark::server::{self, AppState};
use clausemark::{AnalysisConfig, AnalysisPipeline, AnalysisRequest, AnalysisResult, AppConfig, PatternLibrary, ResultStore};

#[derive(Parser, Debug)]
#[command(name = "clausemark")]
#[command(about = "Flags policy passages that match known clause patterns")]
#[command(version)]
struct Args {
    /// Pattern library: JSON document with a top-level `patterns` list
    #[arg(long, global = true, env = "CLAUSEMARK_PATTERNS", default_value = "data/reference.json")]
    patterns: PathBuf,

    /// Directory holding stored results as {id}.json
    #[arg(long, global = true, env = "CLAUSEMARK_RESULTS_DIR", default_value = "data/results")]
    results_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a policy document and store the annotated result
    Analyze {
        /// Policy text file; `-` or omitted reads stdin
        input: Option<PathBuf>,

        /// Provenance label stored with the result
        #[arg(long)]
        source: String,

        /// Sentences per chunk
        #[arg(long, env = "CLAUSEMARK_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Skip writing the result to the results directory
        #[arg(long)]
        no_save: bool,

        /// Print the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print or save a stored result by id
    Download {
        id: String,

        /// Write to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate the pattern library and list its patterns
    Patterns,

    /// Run the HTTP server
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// Sentences per chunk
        #[arg(long, env = "CLAUSEMARK_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

impl Args {
    fn app_config(&self) -> AppConfig {
        let mut config = AppConfig {
            patterns_path: self.patterns.clone(),
            results_dir: self.results_dir.clone(),
            ..AppConfig::default()
        };
        match self.command {
            Command::Analyze { chunk_size, .. } => config.analysis = AnalysisConfig { chunk_size },
            Command::Serve { port, chunk_size } => {
                config.analysis = AnalysisConfig { chunk_size };
                config.port = port;
            }
            Command::Download { .. } | Command::Patterns => {}
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    // WHY: logs go to stderr as JSON so stdout stays clean for --json and download
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");
    let config = args.app_config();

    match args.command {
        Command::Analyze {
            input,
            source,
            no_save,
            json,
            ..
        } => run_analyze(&config, input.as_deref(), &source, no_save, json).await,
        Command::Download { id, out } => run_download(&config, &id, out.as_deref()).await,
        Command::Patterns => run_patterns(&config),
        Command::Serve { .. } => run_serve(&config).await,
    }
}

fn load_pipeline(config: &AppConfig) -> Result<AnalysisPipeline> {
    let library = PatternLibrary::load(&config.patterns_path)
        .with_context(|| format!("cannot start without a valid pattern library ({})", config.patterns_path.display()))?;
    let pipeline = AnalysisPipeline::new(Arc::new(library), &config.analysis).context("invalid analysis configuration")?;
    Ok(pipeline)
}

async fn read_policy(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read policy file {}", path.display())),
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read policy from stdin")?;
            Ok(text)
        }
    }
}

async fn run_analyze(config: &AppConfig, input: Option<&Path>, source: &str, no_save: bool, json: bool) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let policy = read_policy(input).await?;
    let request = AnalysisRequest::new(&policy, source)?;

    let result = pipeline.analyze(request);

    let saved = if no_save {
        None
    } else {
        let store = ResultStore::open(&config.results_dir).await?;
        Some(store.save(&result).await?)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
        if let Some(path) = saved {
            println!("Saved result {} to {}", result.id, path.display());
        }
    }

    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    println!("clausemark v{} - analysis complete", env!("CARGO_PKG_VERSION"));
    println!("Source: {}", result.source);
    println!(
        "Chunks: {}, flagged: {}, matches: {}",
        result.chunks.len(),
        result.flagged_chunks().count(),
        result.match_count()
    );

    for chunk in result.flagged_chunks() {
        println!("  [{}..{}] {}", chunk.start(), chunk.end(), chunk.text());
        for m in chunk.references() {
            println!(
                "    {} ({}, confidence {}, severity {}): {}",
                m.pattern_id, m.category, m.confidence, m.severity, m.description
            );
        }
    }
}

async fn run_download(config: &AppConfig, id: &str, out: Option<&Path>) -> Result<()> {
    let store = ResultStore::open(&config.results_dir).await?;
    let id = ResultStore::parse_id(id)?;
    let content = store.read_raw(id).await?;

    match out {
        Some(path) => {
            tokio::fs::write(path, &content)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote result {} to {}", id, path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn run_patterns(config: &AppConfig) -> Result<()> {
    let library = PatternLibrary::load(&config.patterns_path)?;

    println!("{} patterns in {}", library.len(), config.patterns_path.display());
    for pattern in library.patterns() {
        println!(
            "{}\t{}\t{}\t{} triggers",
            pattern.id(),
            pattern.category(),
            pattern.severity(),
            pattern.triggers().len()
        );
    }
    Ok(())
}

async fn run_serve(config: &AppConfig) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let store = ResultStore::open(&config.results_dir).await?;

    info!(
        patterns = pipeline.library().len(),
        chunk_size = pipeline.chunk_size(),
        results_dir = %store.dir().display(),
        "Starting server"
    );
    server::serve(AppState::new(pipeline, store), config.bind_addr()).await
}
