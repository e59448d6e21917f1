//! Debate command - Run a full debate and print the verdict
//!
//! Usage:
//! ```bash
//! agon debate --topic "Cities should ban cars"
//! agon debate --topic "Cities should ban cars" --agent ada:for --agent ben:against --agent cy:for
//! agon debate --topic "Cities should ban cars" --provider mock --json --output debate.json
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use std::path::PathBuf;
use std::time::Duration;

use agon_core::{DebateState, Position};
use agon_llm::{LlmConfig, ProviderKind};
use agon_runtime::{AgentConfig, DebateOrchestrator, OrchestratorConfig, FALLBACK_PERSUASIVENESS};

/// Arguments for the debate command
#[derive(Args)]
pub struct DebateArgs {
    /// Motion to debate
    #[arg(long, short = 't')]
    topic: String,

    /// Debater as NAME:for or NAME:against (repeatable; defaults to pro:for and con:against)
    #[arg(long = "agent", short = 'a', value_name = "NAME:SIDE", value_parser = parse_agent)]
    agents: Vec<(String, Position)>,

    /// Text-generation provider (mock, ollama, offline); overrides AGON_PROVIDER
    #[arg(long, short = 'p')]
    provider: Option<ProviderKind>,

    /// Model name; overrides AGON_MODEL
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Seed for the audience simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Per-turn generation timeout in seconds; overrides AGON_GENERATION_TIMEOUT_SECS
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print every argument as it was scored
    #[arg(long)]
    transcript: bool,

    /// Print the final debate state as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also write the final debate state as JSON to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Parse `NAME:SIDE`
fn parse_agent(raw: &str) -> Result<(String, Position), String> {
    let (name, side) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:for or NAME:against, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("agent name is empty".to_string());
    }
    Ok((name.to_string(), side.parse()?))
}

/// Run the debate command
pub async fn run(args: DebateArgs) -> Result<()> {
    let mut llm_config = LlmConfig::from_env().context("Invalid LLM configuration")?;
    if let Some(provider) = args.provider {
        llm_config.provider = provider;
    }
    if let Some(model) = args.model {
        llm_config.model = model;
    }
    if let Some(secs) = args.timeout {
        anyhow::ensure!(secs > 0, "--timeout must be positive");
        llm_config.timeout_secs = secs;
    }

    let llm = llm_config.build_provider();
    if !args.json && !llm.is_available().await {
        crate::print_warning(&format!(
            "Provider '{}' is not reachable; every turn will use fallback arguments",
            llm.name()
        ));
    }

    let config = OrchestratorConfig {
        seed: args.seed,
        agent: AgentConfig {
            generation_timeout: Duration::from_secs(llm_config.timeout_secs),
            ..Default::default()
        },
        ..Default::default()
    };

    let agents = if args.agents.is_empty() {
        vec![
            ("pro".to_string(), Position::For),
            ("con".to_string(), Position::Against),
        ]
    } else {
        args.agents
    };

    let mut orchestrator = DebateOrchestrator::new(llm, config);
    for (name, position) in &agents {
        orchestrator.add_agent(name, *position)?;
    }

    if !args.json {
        println!("{}", "⚔ Agon Debate".bold().cyan());
        println!("{}", "═".repeat(50).cyan());
        println!("  {} {}", "Motion:".dimmed(), args.topic.bold());
        for (name, position) in &agents {
            println!("  {} {} ({})", "Debater:".dimmed(), name.green(), position);
        }
        println!("  {} {} / {}", "Provider:".dimmed(), llm_config.provider, llm_config.model);
        println!();
    }

    let state = orchestrator
        .run(&args.topic)
        .await
        .context("Debate failed")?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&state)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write debate to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    if args.transcript {
        print_transcript(&state);
    }
    print_verdict(&state);

    if let Some(path) = &args.output {
        crate::print_success(&format!("Debate written to {}", path.display()));
    }
    Ok(())
}

fn print_transcript(state: &DebateState) {
    println!("{}", "Transcript:".bold());
    let mut phase = None;
    for (i, arg) in state.arguments().iter().enumerate() {
        if phase != Some(arg.phase) {
            phase = Some(arg.phase);
            println!();
            println!("  {}", arg.phase.label().to_uppercase().yellow().bold());
        }
        println!(
            "  {}. {} [{}] {}",
            i + 1,
            arg.agent.green(),
            arg.argument_type.label(),
            format!("p={:.2}", arg.metrics.persuasiveness).dimmed()
        );
        println!("     {}", arg.content);
    }
    println!();
}

fn print_verdict(state: &DebateState) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Agent").fg(Color::Cyan),
            Cell::new("Logic").fg(Color::Cyan),
            Cell::new("Evidence").fg(Color::Cyan),
            Cell::new("Persuasion").fg(Color::Cyan),
            Cell::new("Consistency").fg(Color::Cyan),
            Cell::new("Audience").fg(Color::Cyan),
            Cell::new("Overall").fg(Color::Cyan),
        ]);

    for (rank, (name, summary)) in state.standings().into_iter().enumerate() {
        let name_cell = if state.winner() == Some(name) {
            Cell::new(name).fg(Color::Green)
        } else {
            Cell::new(name)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            name_cell,
            Cell::new(format!("{:.3}", summary.logical_coherence)),
            Cell::new(format!("{:.3}", summary.evidence_quality)),
            Cell::new(format!("{:.3}", summary.persuasiveness)),
            Cell::new(format!("{:.3}", summary.consistency)),
            Cell::new(summary.audience_votes),
            Cell::new(format!("{:.3}", summary.overall)).fg(Color::Yellow),
        ]);
    }

    println!("{table}");
    println!();

    let fallbacks = state
        .arguments()
        .iter()
        .filter(|a| a.metrics.persuasiveness == FALLBACK_PERSUASIVENESS)
        .count();
    if fallbacks > 0 {
        crate::print_warning(&format!(
            "{} of {} arguments were fallback restatements",
            fallbacks,
            state.arguments().len()
        ));
    }

    match state.winner() {
        Some(winner) => crate::print_success(&format!("Winner: {}", winner.bold())),
        None => crate::print_error("No winner declared"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_agent() {
        assert_eq!(
            parse_agent("ada:for").unwrap(),
            ("ada".to_string(), Position::For)
        );
        assert_eq!(
            parse_agent("Dr. Who:CON").unwrap(),
            ("Dr. Who".to_string(), Position::Against)
        );
        assert!(parse_agent("ada").is_err());
        assert!(parse_agent(":for").is_err());
        assert!(parse_agent("ada:maybe").is_err());
    }
}
