//! Keyword and word-cloud frequency lists

use lazy_static::lazy_static;
use regex::Regex;

use super::annotator::Document;
use super::frequency::FrequencyCounter;
use super::stopwords::StopWords;
use super::types::WordFrequency;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid pattern");
}

fn to_entries(counter: FrequencyCounter, limit: usize) -> Vec<WordFrequency> {
    counter
        .most_common(Some(limit))
        .into_iter()
        .map(|(word, frequency)| WordFrequency { word, frequency })
        .collect()
}

/// Most frequent content-word lemmas: alphabetic, not punctuation, not stop words
pub fn extract_keywords(document: &Document, limit: usize) -> Vec<WordFrequency> {
    let counter: FrequencyCounter = document
        .tokens
        .iter()
        .filter(|t| !t.is_stop && !t.is_punct && t.is_alpha)
        .map(|t| t.lemma.to_lowercase())
        .collect();
    to_entries(counter, limit)
}

/// Word-cloud frequencies over raw lowercase words.
///
/// Stop words and words with fewer than `min_length` characters are dropped.
pub fn build_wordcloud(
    text: &str,
    stop_words: &StopWords,
    min_length: usize,
    limit: usize,
) -> Vec<WordFrequency> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let counter: FrequencyCounter = cleaned
        .split_whitespace()
        .filter(|w| !stop_words.contains(w) && w.chars().count() >= min_length)
        .collect();
    to_entries(counter, limit)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::annotator::Annotator;
    use crate::analysis::annotator::RuleBasedAnnotator;

    fn stop_words() -> StopWords {
        StopWords::from_words(["the", "a", "is", "and", "of", "on"])
    }

    #[test]
    fn test_wordcloud_filters_and_counts() {
        let entries = build_wordcloud(
            "The Rust compiler is fast, and the rust borrow checker is strict! ok go",
            &stop_words(),
            3,
            50,
        );
        assert_eq!(
            entries[0],
            WordFrequency {
                word: "rust".to_string(),
                frequency: 2
            }
        );
        let words: Vec<&str> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(
            words,
            vec!["rust", "compiler", "fast", "borrow", "checker", "strict"]
        );
    }

    #[test]
    fn test_wordcloud_limit_and_order() {
        let text = (0..80).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let text = format!("{text} word79 word79 word5");
        let entries = build_wordcloud(&text, &stop_words(), 3, 50);
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].word, "word79");
        assert_eq!(entries[0].frequency, 3);
        assert_eq!(entries[1].word, "word5");
        assert_eq!(entries[2].word, "word0");
        for pair in entries.windows(2) {
            assert!(pair[0].frequency >= pair[1].frequency);
        }
    }

    #[test]
    fn test_wordcloud_empty() {
        assert!(build_wordcloud("", &stop_words(), 3, 50).is_empty());
    }

    #[test]
    fn test_keywords_use_lemmas_and_skip_stop_words() {
        let annotator = RuleBasedAnnotator::new(Arc::new(stop_words()));
        let document = annotator
            .annotate("the compilers and the compiler on the servers 42")
            .unwrap();
        let keywords = extract_keywords(&document, 10);
        assert_eq!(
            keywords,
            vec![
                WordFrequency {
                    word: "compiler".to_string(),
                    frequency: 2
                },
                WordFrequency {
                    word: "server".to_string(),
                    frequency: 1
                },
            ]
        );
    }

    #[test]
    fn test_keywords_limit() {
        let annotator = RuleBasedAnnotator::new(Arc::new(stop_words()));
        let text = (0..15)
            .map(|i| format!("token{}", char::from(b'a' + i)))
            .collect::<Vec<_>>()
            .join(" ");
        let document = annotator.annotate(&text).unwrap();
        assert!(extract_keywords(&document, 10).len() <= 10);
    }
}
