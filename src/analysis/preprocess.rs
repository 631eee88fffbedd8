//! Text cleaning applied before every analyzer except emoji extraction
//!
//! Steps, in order:
//! 1. Drop URLs (`http...`, `https...`, `www...` up to the next whitespace)
//! 2. Drop every character that is not a word character, whitespace, or in a
//!    preserved emoji range. Word characters are letters, digits and
//!    connector punctuation; combining marks and joiners (ZWJ, ZWNJ) are
//!    dropped unless they fall in a preserved range.
//! 3. Collapse whitespace runs and trim

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref URL_PATTERN: Regex =
        Regex::new(r"http\S+|www\S+|https\S+").expect("valid URL pattern");

    static ref NON_LINGUISTIC: Regex = Regex::new(concat!(
        // \w minus combining marks and join controls
        r"[^[\w--[\p{M}\p{Join_Control}]]\s",
        r"\x{1F600}-\x{1F64F}", // emoticons
        r"\x{1F300}-\x{1F5FF}", // symbols & pictographs
        r"\x{1F680}-\x{1F6FF}", // transport & map symbols
        r"\x{1F1E0}-\x{1F1FF}", // flags
        r"\x{2702}-\x{27B0}",   // dingbats
        r"\x{24C2}-\x{1F251}",  // enclosed characters
        r"]",
    ))
    .expect("valid character class");
}

/// Clean raw input for analysis. Never fails; may return an empty string.
pub fn preprocess(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    let stripped = NON_LINGUISTIC.replace_all(&without_urls, "");
    let cleaned = collapse_whitespace(&stripped);

    debug!("Preprocessed text: {} -> {} chars", text.len(), cleaned.len());
    cleaned
}

/// Collapse runs of whitespace to single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Whether a character lies in one of the emoji ranges preprocessing keeps
pub fn is_preserved_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x1F1E0..=0x1F1FF
            | 0x2702..=0x27B0
            | 0x24C2..=0x1F251
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_urls() {
        assert_eq!(
            preprocess("read https://example.com/a?b=c now"),
            "read now"
        );
        assert_eq!(preprocess("see www.rust-lang.org"), "see");
        assert_eq!(preprocess("http://x.io"), "");
    }

    #[test]
    fn test_strips_punctuation_keeps_words() {
        assert_eq!(preprocess("Hello, world! It's 2024..."), "Hello world Its 2024");
        assert_eq!(preprocess("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(preprocess("  a \t\n b   c  "), "a b c");
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess(" \n\t "), "");
    }

    #[test]
    fn test_keeps_emoji() {
        assert_eq!(
            preprocess("I love sunny days! 😊 https://example.com"),
            "I love sunny days 😊"
        );
        assert_eq!(preprocess("go 🚀🚀 now ✂"), "go 🚀🚀 now ✂");
    }

    #[test]
    fn test_keeps_unicode_letters() {
        assert_eq!(preprocess("Café déjà-vu"), "Café déjàvu");
        assert_eq!(preprocess("Привет, мир!"), "Привет мир");
    }

    #[test]
    fn test_drops_marks_and_joiners() {
        let processed = preprocess("fam 👨\u{200D}👩 cafe\u{0301} a\u{200C}b");
        assert_eq!(processed, "fam 👨👩 cafe ab");
        for c in ['\u{200D}', '\u{200C}', '\u{0301}'] {
            assert!(!processed.contains(c), "kept {c:?}");
        }
        // the emoji presentation selector sits inside a preserved range
        assert_eq!(preprocess("I ❤\u{FE0F} it!"), "I ❤\u{FE0F} it");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "I love sunny days! 😊 https://example.com",
            "  Mixed   CASE, punctuation!!! and 👍🏽 emoji ",
            "www.a.com www.b.com",
            "tabs\tand\nnewlines",
            "fam 👨\u{200D}👩 cafe\u{0301}",
            "",
        ];
        for sample in samples {
            let once = preprocess(sample);
            assert_eq!(preprocess(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_preserved_emoji_survive() {
        let text = "wow 😀 🌍 🚗 🇫🇷 ✈ done";
        let processed = preprocess(text);
        for c in text.chars().filter(|c| is_preserved_emoji(*c)) {
            assert!(processed.contains(c), "lost {c:?}");
        }
    }
}
