//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "textscope")]
#[command(about = "TextScope text analysis service and command line analyzer")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: server.host from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS even if the config enables it
        #[arg(long)]
        no_cors: bool,
    },
    /// Analyze one text and print the full result as JSON
    Analyze {
        /// Text to analyze
        text: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Score the sentiment of several texts
    Batch {
        /// Texts to score; blank ones are skipped
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Show current configuration
    Config,
}
