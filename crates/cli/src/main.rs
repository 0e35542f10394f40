//! Agentic Chat CLI — the main entry point.
//!
//! Commands:
//! - `onboard`      — Write a default config file
//! - `chat`         — Interactive chat or single-message mode
//! - `gateway`      — Start the HTTP server
//! - `status`       — Show configuration and responder status
//! - `suggestions`  — List conversation starters

use agentic_chat_config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "agentic-chat",
    about = "Agentic Chat — a rule-based conversational responder",
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
    /// Write the default configuration file
    Onboard,

    /// Chat with the responder
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show configuration and responder status
    Status,

    /// List conversation starters
    Suggestions,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config problems are reported by the command itself; logging just
    // falls back to defaults.
    let logging = AppConfig::load()
        .map(|config| config.logging)
        .unwrap_or_default();

    let filter = if cli.verbose {
        "debug"
    } else {
        logging.level.as_str()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(logging.with_target)
        .with_writer(std::io::stderr);
    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Suggestions => commands::suggestions::run().await?,
    }

    Ok(())
}
