//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use ballot_core::{Proposal, Voter, VoterStatus};
use ballot_types::Address;
use colored::Colorize;
use tabled::{Table, Tabled};

/// Format address (short version).
pub fn format_address_short(addr: &str) -> String {
    if addr.len() > 20 {
        format!("{}...{}", &addr[..12], &addr[addr.len() - 6..])
    } else {
        addr.to_string()
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

#[derive(Tabled)]
struct ProposalRow {
    #[tabled(rename = "N.")]
    number: usize,
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Votes")]
    votes: u64,
}

/// Render the proposal list. Numbers are 1-based; indices are what `vote` takes.
/// With `hex`, names are shown as their 32-byte tags.
pub fn proposals_table(proposals: &[Proposal], hex: bool) -> String {
    let rows: Vec<ProposalRow> = proposals
        .iter()
        .enumerate()
        .map(|(index, p)| ProposalRow {
            number: index + 1,
            index,
            name: if hex { p.name.to_hex() } else { p.name.to_string() },
            votes: p.vote_count,
        })
        .collect();
    Table::new(rows).to_string()
}

/// Print proposal table.
pub fn print_proposals(proposals: &[Proposal], hex: bool) {
    println!("{}", "Proposals".bold());
    println!("{}", proposals_table(proposals, hex));
}

/// Print a voter record.
pub fn print_voter(address: &Address, voter: &Voter, delegators: &[Address]) {
    let status = match voter.status() {
        VoterStatus::Unregistered => "unregistered".red(),
        VoterStatus::Registered => "registered".yellow(),
        VoterStatus::Voted => "voted".green(),
        VoterStatus::Delegated => "delegated".cyan(),
    };

    println!("{}", "Voter".bold());
    println!("{}", "=".repeat(50));
    println!("Address:    {}", address.to_string().bright_cyan());
    println!("Status:     {}", status);
    println!("Weight:     {}", voter.weight.to_string().bright_yellow());
    if let Some(index) = voter.vote {
        println!("Vote:       {}", index);
    }
    if let Some(delegate) = &voter.delegate {
        println!("Delegate:   {}", delegate);
    }
    if !delegators.is_empty() {
        println!("Delegators: {}", delegators.len());
        for d in delegators {
            println!("  - {}", format_address_short(&d.to_string()));
        }
    }
}
