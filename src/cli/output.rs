//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `textscope` CLI

use crate::analysis::AnalysisResult;
use crate::analysis::BatchItem;
use crate::AppConfig;
use crate::Result;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Multi-byte characters such as emoji are never split.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Render an analysis result as JSON
pub fn format_analysis(result: &AnalysisResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Print batch sentiment results, one line per text
pub fn print_batch_results(results: &[BatchItem]) {
    println!("📊 Analyzed {} texts:", results.len());
    for item in results {
        println!(
            "  - {:<8} polarity: {:>6.3} subjectivity: {:.3} | {}",
            item.sentiment.as_str(),
            item.polarity,
            item.subjectivity,
            truncate_str(&item.text, 60)
        );
    }
}

/// Print the effective configuration as TOML
pub fn print_config(config: &AppConfig) -> Result<()> {
    println!("📋 TextScope Configuration:");
    println!();
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print colored output functions
pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 5), "hello...");
        assert_eq!(truncate_str("😊😊😊", 2), "😊😊...");
    }
}
