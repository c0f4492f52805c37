// src/cli.rs — Command-line interface definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tweetforge",
    version,
    about = "Generate viral tweets with an LLM critic in the loop"
)]
pub struct Cli {
    /// Path to a config file (default: ~/.tweetforge/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Model in provider/model form (overrides config)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one refinement loop and print the result as JSON
    Generate {
        /// Topic to tweet about (1-200 characters)
        topic: String,

        /// Revision cap (1-5)
        #[arg(long)]
        max_iteration: Option<u8>,
    },
}
