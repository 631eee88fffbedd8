//! TextScope: sentiment, entities, POS tags, emotions, keywords, readability
//! and emoji statistics for free-form text, served over HTTP.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;

#[cfg(test)]
mod errors_tests;

pub use analysis::AnalysisEngine;
pub use config::AppConfig;
pub use errors::*;
