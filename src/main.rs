use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yti_comments::config::Config;
use yti_comments::localization::MessageCatalog;
use yti_comments::pipeline;
use yti_comments::{CommentsError, Result};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| CommentsError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let catalog = load_catalog(&config, cli.messages.as_deref())?;

    match cli.command {
        Command::Export(args) => {
            require_input(&args.dataset)?;
            pipeline::export_round_to_file(
                &args.dataset,
                &args.round,
                args.language.as_deref(),
                &args.output,
                catalog,
                config,
            )
        }
        Command::Results(args) => {
            require_input(&args.dataset)?;
            let (results, text) = pipeline::thread_results(
                &args.dataset,
                &args.thread,
                args.language.as_deref(),
                catalog,
                config,
            )?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            if !text.is_empty() {
                println!("{text}");
            }
            Ok(())
        }
        Command::Inspect(args) => {
            require_input(&args.input)?;
            for table in pipeline::inspect_workbook(&args.input)? {
                println!(
                    "{}: {} columns, {} rows",
                    table.sheet_name,
                    table.columns.len(),
                    table.rows.len()
                );
            }
            Ok(())
        }
    }
}

fn load_catalog(config: &Config, messages: Option<&Path>) -> Result<MessageCatalog> {
    let catalog = MessageCatalog::builtin(config.default_language.clone());
    match messages {
        Some(path) => {
            require_input(path)?;
            catalog.load_overrides(path)
        }
        None => Ok(catalog),
    }
}

fn require_input(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CommentsError::MissingInput(path.to_path_buf()))
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Comment round results and spreadsheet exports."
)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Optional JSON file with message catalog overrides.
    #[arg(long, global = true)]
    messages: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export a comment round as an xlsx workbook.
    Export(ExportArgs),
    /// Print the end status results of a comment thread.
    Results(ResultsArgs),
    /// Summarise the sheets of an exported workbook.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON dataset holding rounds and users.
    #[arg(long)]
    dataset: PathBuf,

    /// Identifier of the round to export.
    #[arg(long)]
    round: String,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    /// Export language; defaults to the configured default language.
    #[arg(long)]
    language: Option<String>,
}

#[derive(clap::Args)]
struct ResultsArgs {
    /// JSON dataset holding rounds and users.
    #[arg(long)]
    dataset: PathBuf,

    /// Identifier of the thread.
    #[arg(long)]
    thread: String,

    /// Language of the text summary.
    #[arg(long)]
    language: Option<String>,
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Workbook to read.
    #[arg(long)]
    input: PathBuf,
}
