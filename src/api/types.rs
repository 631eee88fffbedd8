//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::analysis::BatchItem;

/// Single-text analysis request
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Batch analysis request
#[derive(Debug, Default, Deserialize)]
pub struct BatchAnalyzeRequest {
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<BatchItem>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
