//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::TextScopeError;

    // ====== Error Type Tests ======

    #[test]
    fn test_validation_error_displays_reason_only() {
        let error = TextScopeError::Validation("No text provided".to_string());
        assert_eq!(format!("{error}"), "No text provided");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_analyzer_error_names_branch() {
        let error = TextScopeError::analyzer("readability", "boom");
        assert!(matches!(error, TextScopeError::Analyzer { .. }));
        assert_eq!(format!("{error}"), "readability analysis failed: boom");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_timeout_error() {
        let error = TextScopeError::Timeout(30);
        assert!(format!("{error}").contains("30 seconds"));
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_config_error() {
        let error = TextScopeError::Config("keyword_limit must be positive".to_string());
        assert!(format!("{error}").contains("Configuration"));
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: TextScopeError = io_err.into();
        assert!(matches!(err, TextScopeError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TextScopeError = json_err.into();
        assert!(matches!(err, TextScopeError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TextScopeError = toml_err.into();
        assert!(matches!(err, TextScopeError::TomlParsing(_)));
    }

    #[test]
    fn test_toml_error_surfaces_through_config() {
        let err = crate::AppConfig::from_toml_str("[server]\nport = \"not a number\"").unwrap_err();
        assert!(matches!(err, TextScopeError::TomlParsing(_)));
        assert!(format!("{err}").starts_with("TOML parsing error"));
    }
}
