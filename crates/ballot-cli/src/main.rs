//! Ballot CLI - command-line interface for the ballot ledger.
//!
//! Each invocation loads the ledger file, runs one operation as the
//! resolved caller and writes the result back.

pub mod commands;
pub mod config;
pub mod output;
pub mod signer;
pub mod telemetry;

use clap::Parser;

fn main() {
    let cli = commands::Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: commands::Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::CliConfig::config_path()?,
    };
    let config = config::CliConfig::load_from(&config_path)?;

    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    telemetry::init_telemetry(&log_level, cli.json_logs || config.json_logs)?;

    let ctx = commands::Context::new(&cli, &config, config_path);
    commands::execute(cli.command, &ctx)
}
