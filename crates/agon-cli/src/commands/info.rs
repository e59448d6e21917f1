//! Info command - Show version and configuration
//!
//! Usage:
//! ```bash
//! agon info
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use agon_core::DebatePhase;
use agon_dialogue::DialogueType;
use agon_llm::LlmConfig;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs;

/// Run the info command
pub fn run(_args: InfoArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    println!("{}", "Agon - Structured Adversarial Debate".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    println!("{}", "Version Information:".bold());
    println!("  {} {}", "CLI Version:".dimmed(), version.green());
    println!();

    println!("{}", "Debate Format:".bold());
    for phase in DebatePhase::ACTIVE {
        let kinds: Vec<&str> = phase.argument_cycle().iter().map(|t| t.label()).collect();
        println!(
            "  {} {:<15} {} turns  ({})",
            "•".cyan(),
            phase.label(),
            phase.turn_budget(),
            kinds.join(" / ")
        );
    }
    println!(
        "  {} {} turns in total",
        "Σ".cyan(),
        DebatePhase::total_turns()
    );
    println!();

    println!("{}", "Dialogue Protocols:".bold());
    for dialogue_type in DialogueType::ALL {
        println!("  {} {}", "•".cyan(), dialogue_type.as_str().green());
    }
    println!();

    println!("{}", "Configuration:".bold());
    match LlmConfig::from_env() {
        Ok(config) => {
            println!("  {} {}", "Provider:".dimmed(), config.provider.to_string().green());
            println!("  {} {}", "Model:".dimmed(), config.model);
            println!("  {} {}", "Ollama URL:".dimmed(), config.ollama_url);
            println!("  {} {}s", "Timeout:".dimmed(), config.timeout_secs);
        }
        Err(e) => crate::print_warning(&format!("Invalid environment: {}", e)),
    }
    crate::print_info(
        "Set AGON_PROVIDER, AGON_MODEL, OLLAMA_URL or AGON_GENERATION_TIMEOUT_SECS to change these",
    );
    println!();

    Ok(())
}
