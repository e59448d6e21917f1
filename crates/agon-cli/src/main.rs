//! Agon CLI - run and inspect scored multi-agent debates
//!
//! # Usage
//!
//! ```bash
//! # Run a two-sided debate against a local Ollama model
//! agon debate --topic "Cities should ban cars"
//!
//! # Offline run with the built-in mock debater, exported as JSON
//! agon debate --topic "Cities should ban cars" --provider mock --seed 7 --json
//!
//! # Check a speech-act sequence against a dialogue protocol
//! agon protocol --dialogue-type persuasion --moves claim,challenge,argue,concede
//!
//! # Show version and configuration
//! agon info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::{debate, info, protocol};

/// Agon - structured adversarial debate between AI agents
#[derive(Parser)]
#[command(
    name = "agon",
    version,
    about = "Agon CLI - scored multi-agent debates",
    long_about = "Agon runs phase-based debates between LLM-backed agents.\n\n\
                  Every argument is scored on eight metrics, a simulated\n\
                  audience votes, and a winner is declared at the close."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a debate and print the verdict
    #[command(name = "debate")]
    Debate(debate::DebateArgs),

    /// Validate a speech-act sequence against a dialogue protocol
    #[command(name = "protocol")]
    Protocol(protocol::ProtocolArgs),

    /// Show version and configuration
    #[command(name = "info")]
    Info(info::InfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Debate(args) => debate::run(args).await,
        Commands::Protocol(args) => protocol::run(args),
        Commands::Info(args) => info::run(args),
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print a success message with a checkmark
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message with an X
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}

/// Print an info message
pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}
