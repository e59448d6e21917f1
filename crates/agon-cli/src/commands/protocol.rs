//! Protocol command - Check speech-act sequences against dialogue protocols
//!
//! Usage:
//! ```bash
//! agon protocol --dialogue-type persuasion --moves claim,challenge,argue,concede
//! agon protocol --dialogue-type inquiry --table
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

use agon_dialogue::{Dialogue, DialogueMove, DialogueType, MoveContent, Protocol, SpeechAct};

/// Arguments for the protocol command
#[derive(Args)]
pub struct ProtocolArgs {
    /// Dialogue type (information_seeking, inquiry, persuasion, negotiation, deliberation, eristic)
    #[arg(long, short = 'd', default_value = "persuasion")]
    dialogue_type: String,

    /// Comma-separated speech acts, played alternately by two speakers
    #[arg(long, short = 'm', value_delimiter = ',')]
    moves: Vec<String>,

    /// Print the full transition table and termination rules
    #[arg(long)]
    table: bool,
}

/// Run the protocol command
pub fn run(args: ProtocolArgs) -> Result<()> {
    let dialogue_type: DialogueType = args
        .dialogue_type
        .parse()
        .context("Unknown dialogue type")?;
    let acts = args
        .moves
        .iter()
        .filter(|m| !m.trim().is_empty())
        .map(|m| m.parse::<SpeechAct>())
        .collect::<Result<Vec<_>, _>>()
        .context("Unknown speech act")?;

    let protocol = Protocol::new(dialogue_type);

    println!(
        "{} {}",
        "📜 Dialogue protocol:".bold().cyan(),
        dialogue_type.as_str().bold()
    );
    println!("{}", "═".repeat(40).cyan());
    println!();

    if args.table || acts.is_empty() {
        print_table(&protocol);
    }
    if acts.is_empty() {
        return Ok(());
    }

    let mut dialogue = Dialogue::with_protocol(protocol);
    let mut accepted: Vec<SpeechAct> = Vec::new();
    for (i, act) in acts.iter().enumerate() {
        let speaker = if i % 2 == 0 { "A" } else { "B" };
        let step = DialogueMove::new(speaker, *act, MoveContent::Text(format!("move {}", i + 1)));
        match dialogue.make_move(step) {
            Ok(_) => {
                accepted.push(*act);
                println!("  {} {}. {} {}", "✓".green(), i + 1, speaker.dimmed(), act);
            }
            Err(e) => {
                println!("  {} {}. {} {}", "✗".red(), i + 1, speaker.dimmed(), act);
                println!();
                crate::print_error(&format!("Move {} rejected: {}", i + 1, e));
                break;
            }
        }
    }
    println!();

    if let Some(rule) = dialogue.protocol().terminating_rule(&accepted) {
        crate::print_success(&format!("Dialogue terminated ({})", rule));
    } else {
        let allowed: Vec<&str> = dialogue.allowed_moves().iter().map(|a| a.as_str()).collect();
        crate::print_info(&format!("Dialogue open; next legal acts: {}", allowed.join(", ")));
    }

    Ok(())
}

fn print_table(protocol: &Protocol) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("After").fg(Color::Cyan),
            Cell::new("Legal responses").fg(Color::Cyan),
        ]);

    for act in SpeechAct::ALL {
        let responses: Vec<&str> = protocol
            .allowed_responses(act)
            .iter()
            .map(|a| a.as_str())
            .collect();
        let cell = if responses.is_empty() {
            Cell::new("(none)").fg(Color::DarkGrey)
        } else {
            Cell::new(responses.join(", "))
        };
        table.add_row(vec![Cell::new(act.as_str()).fg(Color::Green), cell]);
    }

    println!("{table}");
    println!();
    println!("{}", "Terminates when:".bold());
    for rule in protocol.termination_rules() {
        println!("  {} {}", "•".cyan(), rule);
    }
    println!();
}
