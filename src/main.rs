// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use space_bio_chat::utils::logging::{self, format_error, format_info, format_warning};
use space_bio_chat::{ChatError, Config, Corpus, OpenAiClient, Scorer, Session};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const PREVIEW_CHARS: usize = 240;

#[derive(Parser)]
#[command(name = "space_bio_chat")]
#[command(version = "0.1.0")]
#[command(about = "Ask questions about a local space biology knowledge base", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Knowledge base file, overrides corpus.path
    #[arg(long, value_name = "FILE", env = "SPACE_BIO_CORPUS")]
    corpus: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive question/answer loop (default)
    Chat,

    /// Rank knowledge base documents for a query without calling the model
    Search {
        /// Search query text
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print knowledge base statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logger(cli.color, cli.verbose);
    logging::set_color(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let mut config =
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?;

    if let Some(corpus) = cli.corpus {
        config.corpus.path = corpus;
    }
    config.validate().context("Invalid configuration")?;

    let corpus = match Corpus::load(&config.corpus.path, &config.corpus.separator) {
        Ok(corpus) => corpus,
        Err(ChatError::CorpusNotFound { path }) => {
            eprintln!(
                "{}",
                format_error(&format!("Error: {} not found!", path.display()))
            );
            eprintln!("Please run the data preparation step first to create the knowledge base.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("Failed to load knowledge base"));
        }
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cmd_chat(&config, corpus).await?,
        Commands::Search { query, limit } => cmd_search(&config, &corpus, &query, limit)?,
        Commands::Stats => cmd_stats(&corpus)?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn cmd_chat(config: &Config, corpus: Corpus) -> Result<()> {
    let client = OpenAiClient::new(&config.completion, config.resolve_api_key())
        .context("Failed to create completion client")?;
    info!("Using model {} at {}", client.model(), client.endpoint());

    let mut session = Session::new(corpus, client, config);

    let mut stdout = std::io::stdout();
    session.print_banner(&mut stdout)?;

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session
        .run(&mut stdin, &mut stdout)
        .await
        .context("Console I/O failed")?;

    Ok(())
}

fn cmd_search(config: &Config, corpus: &Corpus, query: &str, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(config.retrieval.max_documents);
    let scorer = Scorer::new(config.retrieval.min_token_chars);
    let results = scorer.rank(query, corpus.documents(), limit);

    let mut out = std::io::stdout().lock();

    if results.is_empty() {
        writeln!(
            out,
            "\n{}",
            format_warning(&format!("No documents matched \"{}\"", query))
        )?;
        writeln!(
            out,
            "The chat would fall back to the first {} documents.",
            config.retrieval.fallback_documents
        )?;
        return Ok(());
    }

    writeln!(out, "\nSearch Results for: \"{}\"\n", query)?;
    writeln!(out, "Found {} result(s)\n", results.len())?;
    writeln!(out, "{}", "=".repeat(80))?;

    for (idx, result) in results.iter().enumerate() {
        writeln!(out, "\n{}. {}", idx + 1, result.format_summary(PREVIEW_CHARS))?;
    }

    writeln!(out, "{}", "=".repeat(80))?;
    Ok(())
}

fn cmd_stats(corpus: &Corpus) -> Result<()> {
    let stats = corpus.stats();
    let mut out = std::io::stdout().lock();

    if let Some(source) = corpus.source() {
        writeln!(out, "{}", format_info(&format!("Source: {}", source.display())))?;
    }
    writeln!(out, "{}", format_info(&format!("Characters: {}", stats.total_chars)))?;
    writeln!(out, "{}", format_info(&format!("Documents: {}", stats.documents)))?;
    writeln!(
        out,
        "{}",
        format_info(&format!(
            "Document length (chars): shortest {}, longest {}, average {}",
            stats.shortest, stats.longest, stats.average
        ))
    )?;

    Ok(())
}
