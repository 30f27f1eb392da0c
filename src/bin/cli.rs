//! meetmind CLI
//!
//! Remember meeting notes and ask questions about them.

use anyhow::Context;
use clap::{Parser, Subcommand};
use meetmind::agent::OpenRouterClient;
use meetmind::config::{load_config, load_config_from_path, LogConfig};
use meetmind::core::LlmProvider;
use meetmind::memory::{AnswerSynthesizer, SharedEmbedder};
use meetmind::tasks::{MeetingNotes, TaskExtractor};
use meetmind::{Config, MemoryStore, VERSION};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "meetmind",
    version = VERSION,
    about = "meetmind - Meeting memory with grounded answers",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to $MEETMIND_CONFIG or the user config dir)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remember a note as-is
    Add {
        /// Note text; speaker lines like "Riya: I'll ..." are attributed
        text: String,
    },

    /// Extract tasks from a transcript file and remember them
    Ingest {
        /// Transcript file
        file: PathBuf,
        /// Meeting summary stored with the tasks
        #[arg(long, short)]
        summary: Option<String>,
    },

    /// Ask a question about past meetings
    Ask {
        /// The question
        query: String,
        /// Nearest entries to consider
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
    },

    /// Forget every stored meeting
    Clear,

    /// Show where memory lives and how much it holds
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            dotenvy::dotenv().ok();
            load_config_from_path(path)
        }
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    init_logging(&config.log);
    config.validate()?;

    match cli.command {
        Commands::Add { text } => {
            let mut store = open_store(&config)?;
            store.add(&text).await?;
            println!("Remembered. {} entries stored.", store.len());
        }
        Commands::Ingest { file, summary } => ingest(&config, &file, summary).await?,
        Commands::Ask { query, top_k } => {
            let store = open_store(&config)?;
            let top_k = top_k.unwrap_or(config.memory.top_k);
            println!("{}", store.retrieve(&query, top_k).await);
        }
        Commands::Clear => {
            let mut store = open_store(&config)?;
            store.clear()?;
            println!("Memory cleared.");
        }
        Commands::Status => status(&config)?,
    }

    Ok(())
}

fn init_logging(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn provider(config: &Config) -> meetmind::Result<Arc<dyn LlmProvider>> {
    Ok(Arc::new(OpenRouterClient::new(config.openrouter.clone())?))
}

fn open_store(config: &Config) -> anyhow::Result<MemoryStore> {
    let embedder = SharedEmbedder::new(config.embedding.clone())?;

    let synthesis_config = config.clone();
    let synthesizer = AnswerSynthesizer::new(move || provider(&synthesis_config));

    Ok(MemoryStore::open(
        config.memory.clone(),
        Arc::new(embedder),
        synthesizer,
    ))
}

async fn ingest(config: &Config, file: &Path, summary: Option<String>) -> anyhow::Result<()> {
    let transcript = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let extractor = TaskExtractor::new(provider(config)?);
    let tasks = extractor.extract(&transcript).await?;
    let notes = MeetingNotes::new(summary, tasks);

    println!("Summary: {}", notes.summary);
    let Some(text) = notes.memory_text() else {
        warn!(file = %file.display(), "No tasks found, nothing remembered");
        println!("No tasks found.");
        return Ok(());
    };

    println!("Tasks:");
    for task in &notes.tasks {
        println!("  - {}", task.display_line());
    }

    let mut store = open_store(config)?;
    store.add(&text).await?;
    info!(entries = store.len(), "Ingested meeting");
    Ok(())
}

fn status(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let has_key = !config.openrouter.api_key.expose_secret().is_empty();

    println!("meetmind {}\n", VERSION);
    println!("Entries:   {}", store.len());
    println!("Vectors:   {} x {}", store.index_len(), config.memory.dimension);
    println!("Index:     {}", config.memory.index_path().display());
    println!("Texts:     {}", config.memory.texts_path().display());
    println!("Embedding: {}", config.embedding.model);
    println!("Model:     {}", config.openrouter.default_model);
    println!("API key:   {}", if has_key { "✅ set" } else { "❌ missing" });
    Ok(())
}
