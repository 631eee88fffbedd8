//! CLI command handlers

use std::sync::Arc;

use tracing::info;

use crate::analysis::AnalysisEngine;
use crate::api::serve_api;
use crate::cli::commands::Commands;
use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

/// Run one parsed command
pub async fn dispatch(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve(config, host, port, no_cors).await,
        Commands::Analyze { text, pretty } => handle_analyze(config, &text, pretty).await,
        Commands::Batch { texts } => handle_batch(config, &texts),
        Commands::Config => print_config(config),
    }
}

/// Start the API server; CLI arguments take priority over config
pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.host().to_string());
    let port = port.unwrap_or_else(|| config.port());
    let cors = config.cors_enabled() && !no_cors;

    println!("🚀 Starting TextScope API Server");
    println!("================================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!();

    serve_api(config, host, port, cors).await
}

/// Analyze one text and print the JSON result
pub async fn handle_analyze(config: &AppConfig, text: &str, pretty: bool) -> Result<()> {
    let engine = Arc::new(AnalysisEngine::from_config(config)?);
    let result = engine.analyze(text).await?;
    info!(
        "Analyzed text: language={}, sentiment={}",
        result.language, result.textblob_sentiment.sentiment
    );
    println!("{}", format_analysis(&result, pretty)?);
    Ok(())
}

/// Score several texts and print one line each
pub fn handle_batch(config: &AppConfig, texts: &[String]) -> Result<()> {
    let engine = AnalysisEngine::from_config(config)?;
    let results = engine.analyze_batch(texts)?;
    if results.is_empty() {
        print_warning("All texts were blank; nothing to analyze");
        return Ok(());
    }
    print_batch_results(&results);
    Ok(())
}
