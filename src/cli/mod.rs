//! CLI argument parsing and command dispatch

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reqpacer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a producer run
    Run {
        /// Path to settings file
        #[arg(short, long)]
        config: String,
    },
    /// Validate a settings file
    Validate {
        /// Path to settings file
        #[arg(short, long)]
        config: String,
    },
}
