//! CLI interface for liquidity-monitor
//!
//! Provides subcommands for:
//! - `run`: Fetch, evaluate and send the card (default)
//! - `check`: Fetch and evaluate, print the card instead of sending it
//! - `config`: Show effective configuration

mod check;
mod run;

pub use check::CheckArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "liquidity-monitor")]
#[command(about = "Daily SOFR-IORB spread and dollar index monitor with Feishu alerts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, evaluate and send the card
    Run(RunArgs),
    /// Fetch and evaluate without sending
    Check(CheckArgs),
    /// Show effective configuration
    Config,
}
