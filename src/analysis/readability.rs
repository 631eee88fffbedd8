//! Readability indices
//!
//! Standard formulas over word, sentence, syllable and letter counts. Each
//! metric is a standalone function of the text. Syllables are estimated from
//! vowel groups; "easy" words come from a bundled basic-vocabulary list.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::types::ReadabilityMetrics;

const EASY_WORD_LIST: &str = include_str!("../../data/easy_words.txt");

/// Words at or above this many syllables count as difficult
const DIFFICULT_SYLLABLES: usize = 2;
/// Words at or above this many syllables count as polysyllabic
const POLYSYLLABLE_SYLLABLES: usize = 3;

lazy_static! {
    static ref EASY_WORDS: HashSet<&'static str> = EASY_WORD_LIST.split_whitespace().collect();
    static ref SENTENCE: Regex = Regex::new(r"\b[^.!?]+[.!?]*").expect("valid sentence pattern");
    static ref WORD: Regex = Regex::new(r"[\w='‘’]+").expect("valid word pattern");
}

/// Computes the full metric set
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityAnalyzer;

impl ReadabilityAnalyzer {
    pub const fn new() -> Self {
        Self
    }

    /// All twelve metrics. Text without words scores zero everywhere.
    pub fn analyze(&self, text: &str) -> ReadabilityMetrics {
        if lexicon_count(text) == 0 {
            return ReadabilityMetrics::default();
        }

        ReadabilityMetrics {
            flesch_reading_ease: flesch_reading_ease(text),
            flesch_kincaid_grade: flesch_kincaid_grade(text),
            gunning_fog: gunning_fog(text),
            smog_index: smog_index(text),
            automated_readability_index: automated_readability_index(text),
            coleman_liau_index: coleman_liau_index(text),
            linsear_write_formula: linsear_write_formula(text),
            dale_chall_readability_score: dale_chall_readability_score(text),
            difficult_words: difficult_words(text),
            syllable_count: syllable_count(text),
            lexicon_count: lexicon_count(text),
            sentence_count: sentence_count(text),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

fn words(text: &str) -> Vec<String> {
    strip_punctuation(text)
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Estimated syllables in a single word; words without letters have none
pub fn syllables_in_word(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    let ends_with = |suffix: &str| {
        let suffix: Vec<char> = suffix.chars().collect();
        n >= suffix.len() && letters[n - suffix.len()..] == suffix[..]
    };
    let before = |offset: usize| if n > offset { Some(letters[n - 1 - offset]) } else { None };

    if count > 1 {
        if ends_with("e") && !ends_with("le") && !ends_with("ee") {
            // silent e: make, stone
            count -= 1;
        } else if ends_with("ed") && !matches!(before(2), Some('t' | 'd')) {
            // walked, loved
            count -= 1;
        } else if ends_with("es")
            && !matches!(before(2), Some('s' | 'x' | 'z' | 'c' | 'g'))
            && !(ends_with("hes") && matches!(before(3), Some('c' | 's')))
        {
            // makes, hopes
            count -= 1;
        }
    }

    count.max(1)
}

pub fn lexicon_count(text: &str) -> usize {
    words(text).len()
}

pub fn syllable_count(text: &str) -> usize {
    words(text).iter().map(|w| syllables_in_word(w)).sum()
}

/// Sentences of more than two words, at least one
pub fn sentence_count(text: &str) -> usize {
    let mut total = 0;
    let mut ignored = 0;
    for sentence in SENTENCE.find_iter(text) {
        total += 1;
        if lexicon_count(sentence.as_str()) <= 2 {
            ignored += 1;
        }
    }
    (total - ignored).max(1)
}

fn char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn letter_count(text: &str) -> usize {
    text.chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_punctuation())
        .count()
}

fn polysyllable_count(text: &str) -> usize {
    words(text)
        .iter()
        .filter(|w| syllables_in_word(w) >= POLYSYLLABLE_SYLLABLES)
        .count()
}

fn difficult_words_with_threshold(text: &str, threshold: usize) -> usize {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !EASY_WORDS.contains(*w) && syllables_in_word(w) >= threshold)
        .collect::<HashSet<&str>>()
        .len()
}

/// Distinct words outside the easy list with two or more syllables
pub fn difficult_words(text: &str) -> usize {
    difficult_words_with_threshold(text, DIFFICULT_SYLLABLES)
}

fn avg_sentence_length(text: &str) -> f64 {
    ratio(lexicon_count(text) as f64, sentence_count(text) as f64)
}

fn avg_syllables_per_word(text: &str) -> f64 {
    ratio(syllable_count(text) as f64, lexicon_count(text) as f64)
}

pub fn flesch_reading_ease(text: &str) -> f64 {
    round2(206.835 - 1.015 * avg_sentence_length(text) - 84.6 * avg_syllables_per_word(text))
}

pub fn flesch_kincaid_grade(text: &str) -> f64 {
    round2(0.39 * avg_sentence_length(text) + 11.8 * avg_syllables_per_word(text) - 15.59)
}

pub fn gunning_fog(text: &str) -> f64 {
    let words = lexicon_count(text) as f64;
    if words == 0.0 {
        return 0.0;
    }
    let percent_difficult = difficult_words(text) as f64 / words * 100.0;
    round2(0.4 * (avg_sentence_length(text) + percent_difficult))
}

/// Needs at least three sentences; scores 0 otherwise
pub fn smog_index(text: &str) -> f64 {
    let sentences = sentence_count(text);
    if sentences < 3 {
        return 0.0;
    }
    let polysyllables = polysyllable_count(text) as f64;
    round2(1.043 * (polysyllables * (30.0 / sentences as f64)).sqrt() + 3.1291)
}

pub fn automated_readability_index(text: &str) -> f64 {
    let words = lexicon_count(text) as f64;
    if words == 0.0 {
        return 0.0;
    }
    let chars_per_word = char_count(text) as f64 / words;
    let words_per_sentence = ratio(words, sentence_count(text) as f64);
    round2(4.71 * chars_per_word + 0.5 * words_per_sentence - 21.43)
}

pub fn coleman_liau_index(text: &str) -> f64 {
    let words = lexicon_count(text) as f64;
    if words == 0.0 {
        return 0.0;
    }
    let letters_per_100 = letter_count(text) as f64 / words * 100.0;
    let sentences_per_100 = sentence_count(text) as f64 / words * 100.0;
    round2(0.058 * letters_per_100 - 0.296 * sentences_per_100 - 15.8)
}

/// Computed over the first 100 words
pub fn linsear_write_formula(text: &str) -> f64 {
    let sample: Vec<&str> = text.split_whitespace().take(100).collect();
    if sample.is_empty() {
        return 0.0;
    }

    let (mut easy, mut hard) = (0usize, 0usize);
    for word in &sample {
        if syllables_in_word(word) >= POLYSYLLABLE_SYLLABLES {
            hard += 1;
        } else {
            easy += 1;
        }
    }

    let sentences = sentence_count(&sample.join(" ")) as f64;
    let mut number = (easy as f64 + hard as f64 * 3.0) / sentences;
    if number <= 20.0 {
        number -= 2.0;
    }
    round2(number / 2.0)
}

pub fn dale_chall_readability_score(text: &str) -> f64 {
    let words = lexicon_count(text) as f64;
    if words == 0.0 {
        return 0.0;
    }
    let percent_difficult = difficult_words(text) as f64 / words * 100.0;
    let mut score = 0.1579 * percent_difficult + 0.0496 * avg_sentence_length(text);
    if percent_difficult > 5.0 {
        score += 3.6365;
    }
    round2(score)
}
