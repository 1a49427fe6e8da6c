//! krill CLI

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    chat::{ChatCmd, Model},
    config::{config_path, generate, load},
};

mod chat;
mod config;

/// krill CLI
#[derive(Debug, Parser)]
#[command(name = "krill", version, about)]
pub struct App {
    /// Disable streaming and print complete replies
    #[arg(long, global = true)]
    pub no_stream: bool,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with a Groq-hosted model
    Chat(chat::ChatCmd),

    /// Generate the configuration file
    Generate,
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "krill=debug",
                2 => "krill=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .init();
    }
}
