//! CLI command implementations.
//!
//! Every mutating command loads the ledger, applies one operation and
//! saves it back, so each invocation is one complete call.

use ballot_core::{Ballot, BallotStore};
use ballot_types::{Address, ProposalName};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::config::CliConfig;
use crate::output::*;
use crate::signer;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "ballot")]
#[command(about = "Ballot - delegated plurality voting")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Ledger file (overrides config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub ledger: Option<PathBuf>,

    /// Caller address
    #[arg(short, long, global = true)]
    pub from: Option<String>,

    /// Caller private key (hex ed25519 seed)
    #[arg(long, global = true, env = signer::PRIVATE_KEY_ENV, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// JSON logs
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new ballot with the caller as chairperson
    Deploy {
        /// Proposal names (at most 31 bytes each)
        #[arg(required = true)]
        proposals: Vec<String>,
        /// Names are 32-byte hex tags instead of text
        #[arg(long)]
        hex: bool,
        /// Replace an existing ledger
        #[arg(long)]
        force: bool,
    },
    /// Give an address the right to vote (chairperson only)
    GiveRight {
        /// Voter address
        address: String,
    },
    /// Vote for a proposal by index
    Vote {
        /// Proposal index (0-based)
        index: usize,
    },
    /// Delegate your vote to another voter
    Delegate {
        /// Delegate address
        address: String,
    },
    /// List proposals and their vote counts
    Proposals {
        /// Show names as 32-byte hex tags
        #[arg(long)]
        hex: bool,
    },
    /// Show the winning proposal
    Result,
    /// Show a voter record (defaults to the caller)
    Voter {
        /// Voter address
        address: Option<String>,
    },
    /// Show the chairperson
    Chairperson,
    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set {
        /// Key (ledger_path, default_account, log_level, json_logs)
        key: String,
        /// Value
        value: String,
    },
    /// Reset to defaults
    Reset,
}

/// Resolved settings a command runs with.
#[derive(Debug, Clone)]
pub struct Context {
    pub store: BallotStore,
    config_path: PathBuf,
    from: Option<String>,
    private_key: Option<String>,
    default_account: Option<String>,
}

impl Context {
    pub fn new(cli: &Cli, config: &CliConfig, config_path: PathBuf) -> Self {
        let ledger = cli.ledger.clone().unwrap_or_else(|| config.ledger_path.clone());
        Self {
            store: BallotStore::new(ledger),
            config_path,
            from: cli.from.clone(),
            private_key: cli.private_key.clone(),
            default_account: config.default_account.clone(),
        }
    }

    pub fn caller(&self) -> anyhow::Result<Address> {
        let caller = signer::resolve_caller(
            self.from.as_deref(),
            self.private_key.as_deref(),
            self.default_account.as_deref(),
        )?;
        info!(%caller, "Using address");
        Ok(caller)
    }
}

fn parse_address(s: &str) -> anyhow::Result<Address> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", s, e))
}

/// Execute a command.
pub fn execute(cmd: Commands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        Commands::Deploy { proposals, hex, force } => deploy(ctx, &proposals, hex, force),
        Commands::GiveRight { address } => give_right(ctx, &address),
        Commands::Vote { index } => vote(ctx, index),
        Commands::Delegate { address } => delegate(ctx, &address),
        Commands::Proposals { hex } => {
            let ballot = ctx.store.load()?;
            print_proposals(ballot.proposals(), hex);
            Ok(())
        }
        Commands::Result => {
            let ballot = ctx.store.load()?;
            let winner = ballot.winning_proposal();
            println!(
                "The winning proposal is {} (index {}, {} votes)",
                ballot.winner_name().to_string().bright_green(),
                winner,
                ballot.proposals()[winner].vote_count
            );
            Ok(())
        }
        Commands::Voter { address } => {
            let ballot = ctx.store.load()?;
            let address = match address {
                Some(a) => parse_address(&a)?,
                None => ctx.caller()?,
            };
            print_voter(&address, &ballot.voter(&address), &ballot.delegators(&address));
            Ok(())
        }
        Commands::Chairperson => {
            let ballot = ctx.store.load()?;
            println!("{}", ballot.chairperson());
            Ok(())
        }
        Commands::Config(cmd) => execute_config(cmd, &ctx.config_path),
    }
}

fn execute_config(cmd: ConfigCommands, path: &std::path::Path) -> anyhow::Result<()> {
    let mut config = CliConfig::load_from(path)?;

    match cmd {
        ConfigCommands::Show => {
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            println!("Ledger:       {}", config.ledger_path.display().to_string().bright_cyan());
            println!("Default Acc:  {:?}", config.default_account);
            println!("Log Level:    {}", config.log_level.bright_yellow());
            println!("JSON Logs:    {}", config.json_logs);
        }

        ConfigCommands::Set { key, value } => {
            match key.as_str() {
                "ledger" | "ledger_path" => config.ledger_path = PathBuf::from(&value),
                "default_account" => {
                    parse_address(&value)?;
                    config.default_account = Some(value.clone());
                }
                "log_level" => config.log_level = value.clone(),
                "json_logs" => config.json_logs = value.parse()?,
                _ => anyhow::bail!("Unknown config key: {}", key),
            }
            config.save_to(path)?;
            print_success(&format!("Set {} = {}", key, value));
        }

        ConfigCommands::Reset => {
            CliConfig::default().save_to(path)?;
            print_success("Configuration reset to defaults");
        }
    }

    Ok(())
}

fn deploy(ctx: &Context, labels: &[String], hex: bool, force: bool) -> anyhow::Result<()> {
    if ctx.store.exists() && !force {
        anyhow::bail!(
            "Ledger already exists at {} (use --force to replace it)",
            ctx.store.path().display()
        );
    }

    let names = labels
        .iter()
        .map(|l| {
            let name = if hex { ProposalName::from_hex(l) } else { ProposalName::new(l) };
            name.map_err(|e| anyhow::anyhow!("Proposal '{}': {}", l, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let chairperson = ctx.caller()?;
    let ballot = Ballot::new(names, chairperson)?;
    ctx.store.save(&ballot)?;

    print_success(&format!(
        "Ballot with {} proposals created at {}",
        ballot.proposals().len(),
        ctx.store.path().display()
    ));
    print_info(&format!("Chairperson: {}", chairperson));
    Ok(())
}

fn give_right(ctx: &Context, address: &str) -> anyhow::Result<()> {
    let target = parse_address(address)?;
    let caller = ctx.caller()?;
    let mut ballot = ctx.store.load()?;

    ballot.grant_rights(caller, target)?;
    ctx.store.save(&ballot)?;

    print_success(&format!("Granted right to vote to {}", target));
    Ok(())
}

fn vote(ctx: &Context, index: usize) -> anyhow::Result<()> {
    let caller = ctx.caller()?;
    let mut ballot = ctx.store.load()?;

    if !ballot.can_vote(&caller) {
        anyhow::bail!("Caller {} cannot vote", caller);
    }

    ballot.vote(caller, index)?;
    ctx.store.save(&ballot)?;

    print_success(&format!(
        "Voted for {} (index {})",
        ballot.proposals()[index].name,
        index
    ));
    Ok(())
}

fn delegate(ctx: &Context, address: &str) -> anyhow::Result<()> {
    let target = parse_address(address)?;
    let caller = ctx.caller()?;
    let mut ballot = ctx.store.load()?;

    ballot.delegate(caller, target)?;
    ctx.store.save(&ballot)?;

    let endpoint = ballot.voter(&caller).delegate.unwrap_or(target);
    print_success(&format!("Delegated vote to {}", endpoint));
    Ok(())
}
