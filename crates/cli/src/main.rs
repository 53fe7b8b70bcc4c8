//! reactloop CLI: the main entry point.
//!
//! Commands:
//! - `run`   : Solve a task with the reason-act-observe loop
//! - `ask`   : One plain completion, no tools
//! - `tools` : Show the tool catalog the model will see
//! - `config`: Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "reactloop",
    about = "reactloop: a reason-act-observe agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent loop on a task
    Run {
        /// The task for the agent
        #[arg(short, long)]
        message: String,

        /// Print the conversation history when the run ends
        #[arg(long)]
        transcript: bool,

        /// Override agent.max_iterations
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Override tools.catalog_path
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Ask the model a single question
    Ask {
        #[arg(short, long)]
        message: String,

        /// System prompt for this question
        #[arg(long, default_value = "You are a helpful assistant.")]
        system: String,
    },

    /// Show the rendered tool catalog
    Tools {
        /// Override tools.catalog_path
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print the built-in tools in catalog file format instead
        #[arg(long)]
        export: bool,
    },

    /// Show the effective configuration
    Config {
        /// Print the default configuration file instead
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            message,
            transcript,
            max_iterations,
            catalog,
        } => {
            commands::run::run(commands::run::RunArgs {
                message,
                transcript,
                max_iterations,
                catalog,
            })
            .await?
        }
        Commands::Ask { message, system } => commands::ask::run(message, system).await?,
        Commands::Tools { catalog, export } => commands::tools::run(catalog, export).await?,
        Commands::Config { default } => commands::config_cmd::run(default).await?,
    }

    Ok(())
}
