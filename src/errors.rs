use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextScopeError {
    #[error("{0}")]
    Validation(String),

    #[error("{analyzer} analysis failed: {message}")]
    Analyzer { analyzer: String, message: String },

    #[error("Analysis timed out after {0} seconds")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl TextScopeError {
    /// Shorthand for a failure inside one analyzer branch
    pub fn analyzer(analyzer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Analyzer {
            analyzer: analyzer.into(),
            message: message.into(),
        }
    }

    /// Whether the caller, not the service, is at fault
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, TextScopeError>;
