use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) const fn default_port() -> u16 {
    5001
}

pub(crate) const fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of keywords returned per analysis
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,
    /// Number of word-cloud entries returned per analysis
    #[serde(default = "default_wordcloud_limit")]
    pub wordcloud_limit: usize,
    /// Shortest word (in characters) kept in word-cloud data
    #[serde(default = "default_wordcloud_min_length")]
    pub wordcloud_min_length: usize,
    /// Upper bound for one analysis fan-out
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Run analyzer branches concurrently on the blocking pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

pub(crate) const fn default_keyword_limit() -> usize {
    10
}

pub(crate) const fn default_wordcloud_limit() -> usize {
    50
}

pub(crate) const fn default_wordcloud_min_length() -> usize {
    3
}

pub(crate) const fn default_timeout_secs() -> u64 {
    30
}

pub(crate) const fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keyword_limit: default_keyword_limit(),
            wordcloud_limit: default_wordcloud_limit(),
            wordcloud_min_length: default_wordcloud_min_length(),
            timeout_secs: default_timeout_secs(),
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Report "unknown" unless the detector is confident
    #[serde(default)]
    pub require_reliable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub language: LanguageConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try config.toml first, then config.example.toml, then built-in defaults
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            tracing::warn!("No config file found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Reject settings the analysis pipeline cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.analysis.keyword_limit == 0 {
            return Err(crate::TextScopeError::Config(
                "analysis.keyword_limit must be greater than 0".to_string(),
            ));
        }
        if self.analysis.wordcloud_limit == 0 {
            return Err(crate::TextScopeError::Config(
                "analysis.wordcloud_limit must be greater than 0".to_string(),
            ));
        }
        if self.analysis.timeout_secs == 0 {
            return Err(crate::TextScopeError::Config(
                "analysis.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(crate::TextScopeError::Config(
                "server.host must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get server host
    pub fn host(&self) -> &str {
        &self.server.host
    }

    /// Get server port
    pub fn port(&self) -> u16 {
        self.server.port
    }

    /// Check if CORS is enabled
    pub fn cors_enabled(&self) -> bool {
        self.server.enable_cors
    }

    /// Get number of keywords to return
    pub fn keyword_limit(&self) -> usize {
        self.analysis.keyword_limit
    }

    /// Get number of word-cloud entries to return
    pub fn wordcloud_limit(&self) -> usize {
        self.analysis.wordcloud_limit
    }

    /// Get analysis timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.analysis.timeout_secs
    }
}
