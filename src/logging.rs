//! Logging configuration for textscope

use std::path::Path;

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "textscope.log";

/// Initialize logging with configuration, falling back to `RUST_LOG`
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    // Config wins, then RUST_LOG, then the default
    let (env_filter, level) = if let Some(config) = config {
        let level = config.logging.level.clone();
        (filter_for_level(&level), level)
    } else {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,textscope=debug"));
        (filter, "info".to_string())
    };

    if config.is_some_and(|c| c.logging.backtrace) {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    install(env_filter, &level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    install(filter_for_level(level), level)
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| crate::TextScopeError::Custom(e.to_string()))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

fn filter_for_level(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{level},textscope={level},tower_http={level}"))
}

fn install(env_filter: EnvFilter, level: &str) -> Result<()> {
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::TextScopeError::Custom(e.to_string()))?;

    tracing::info!(
        "Logging initialized with level: {} - console and file output enabled",
        level
    );
    tracing::info!("Log files will be saved to: {}/{}.YYYY-MM-DD", LOG_DIR, LOG_FILE_PREFIX);

    // The writer thread must outlive main
    std::mem::forget(guard);

    Ok(())
}
