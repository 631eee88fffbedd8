//! English stop-word list shared by the keyword and word-cloud builders

use std::collections::HashSet;

/// Case-insensitive stop-word lookup
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The English list from the `stop-words` crate
    pub fn english() -> Self {
        let words = stop_words::get(stop_words::LANGUAGE::English);
        Self::from_words(words.iter().map(|w| w.to_string()))
    }

    /// Build from an arbitrary word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lowered = word.to_lowercase();
        lowered != word && self.words.contains(&lowered)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_has_common_words() {
        let stop_words = StopWords::english();
        assert!(!stop_words.is_empty());
        for word in ["the", "is", "and", "a", "of"] {
            assert!(stop_words.contains(word), "{word} should be a stop word");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let stop_words = StopWords::from_words(["The", "is"]);
        assert!(stop_words.contains("the"));
        assert!(stop_words.contains("THE"));
        assert!(stop_words.contains("Is"));
        assert!(!stop_words.contains("rust"));
        assert_eq!(stop_words.len(), 2);
    }
}
