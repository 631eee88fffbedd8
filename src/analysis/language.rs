//! Language detection
//!
//! Detection never fails from the caller's point of view: anything the
//! classifier cannot place is reported as [`UNKNOWN_LANGUAGE`].

use tracing::debug;

/// Sentinel code returned when no language can be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Classifies the dominant language of a text
pub trait LanguageDetector: Send + Sync {
    /// ISO 639-1 code where one exists, ISO 639-3 otherwise, or `"unknown"`
    fn detect(&self, text: &str) -> String;
}

/// Trigram-based detector backed by `whatlang`
#[derive(Debug, Clone, Default)]
pub struct WhatlangDetector {
    require_reliable: bool,
}

impl WhatlangDetector {
    pub const fn new(require_reliable: bool) -> Self {
        Self { require_reliable }
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return UNKNOWN_LANGUAGE.to_string();
        }

        match whatlang::detect(text) {
            Some(info) if !self.require_reliable || info.is_reliable() => {
                let code = info.lang().code();
                debug!(
                    "Detected language {} (confidence: {:.2})",
                    code,
                    info.confidence()
                );
                to_iso639_1(code).unwrap_or(code).to_string()
            }
            Some(info) => {
                debug!(
                    "Discarding unreliable language guess {} (confidence: {:.2})",
                    info.lang().code(),
                    info.confidence()
                );
                UNKNOWN_LANGUAGE.to_string()
            }
            None => UNKNOWN_LANGUAGE.to_string(),
        }
    }
}

/// Map an ISO 639-3 code to its two-letter form
fn to_iso639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english() {
        let detector = WhatlangDetector::default();
        let lang = detector.detect(
            "The quick brown fox jumps over the lazy dog while the farmer watches from the porch",
        );
        assert_eq!(lang, "en");
    }

    #[test]
    fn test_detects_spanish() {
        let detector = WhatlangDetector::default();
        let lang = detector.detect(
            "El rápido zorro marrón salta sobre el perro perezoso mientras el granjero mira desde la casa",
        );
        assert_eq!(lang, "es");
    }

    #[test]
    fn test_unknown_for_digits_and_empty() {
        let detector = WhatlangDetector::default();
        assert_eq!(detector.detect("1234567890"), UNKNOWN_LANGUAGE);
        assert_eq!(detector.detect(""), UNKNOWN_LANGUAGE);
        assert_eq!(detector.detect("   "), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_iso_mapping() {
        assert_eq!(to_iso639_1("eng"), Some("en"));
        assert_eq!(to_iso639_1("cmn"), Some("zh"));
        assert_eq!(to_iso639_1("xyz"), None);
    }
}
