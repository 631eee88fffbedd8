use clap::Parser;
use textscope::cli::dispatch;
use textscope::cli::print_error;
use textscope::cli::Cli;
use textscope::config::AppConfig;
use textscope::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    }
    .inspect_err(|e| print_error(&format!("Failed to load configuration: {e}")))?;

    // Initialize logging
    if cli.verbose {
        textscope::logging::init_logging_with_level("debug")?;
    } else {
        textscope::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    dispatch(cli.command, &config).await
}
