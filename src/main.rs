use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codegenius::cli::commands;
use codegenius::cli::commands::config::ConfigFormat;
use codegenius::cli::commands::generate::GenerateOptions;
use codegenius::cli::commands::graph::GraphFormat;

#[derive(Parser)]
#[command(name = "codegenius")]
#[command(
    version,
    about = "Code entity graph and AI-annotated documentation for a repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Markdown documentation for a repository
    Generate {
        #[arg(help = "Repository checkout to analyze")]
        path: PathBuf,
        #[arg(long, help = "Repository label for the document header (e.g. its URL)")]
        source: Option<String>,
        #[arg(long, short, help = "Write the document to a file instead of stdout")]
        output: Option<PathBuf>,
        #[arg(long = "no-ai", help = "Skip AI enrichment")]
        no_ai: bool,
        #[arg(long, help = "LLM provider (gemini, openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
    },

    /// Print the code graph
    Graph {
        #[arg(help = "Repository checkout to analyze")]
        path: PathBuf,
        #[arg(
            short = 'f',
            long,
            value_enum,
            default_value_t = GraphFormat::Text,
            help = "Output format"
        )]
        format: GraphFormat,
    },

    /// Print the filtered file tree
    Tree {
        #[arg(help = "Repository checkout to walk")]
        path: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            value_enum,
            default_value_t = ConfigFormat::Toml,
            help = "Output format"
        )]
        format: ConfigFormat,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            path,
            source,
            output,
            no_ai,
            provider,
            model,
        } => {
            commands::generate::run(GenerateOptions {
                path,
                source,
                output,
                no_ai,
                provider,
                model,
            })?;
        }
        Commands::Graph { path, format } => {
            commands::graph::run(&path, format)?;
        }
        Commands::Tree { path } => {
            commands::tree::run(&path)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => commands::config::init(global, force)?,
        },
    }

    Ok(())
}
