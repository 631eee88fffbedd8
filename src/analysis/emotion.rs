//! Lexicon-based emotion scoring
//!
//! A trigger word counts once when it appears anywhere in the lowercased
//! text, including inside a longer word ("sure" matches "measure").

use super::types::EmotionScores;

const JOY: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "wonderful",
    "amazing",
    "great",
    "fantastic",
];
const SADNESS: &[&str] = &["sad", "depressed", "miserable", "terrible", "awful", "horrible"];
const ANGER: &[&str] = &["angry", "furious", "mad", "irritated", "annoyed", "frustrated"];
const FEAR: &[&str] = &["scared", "afraid", "terrified", "worried", "anxious", "nervous"];
const SURPRISE: &[&str] = &["surprised", "shocked", "amazed", "astonished", "stunned"];
const DISGUST: &[&str] = &["disgusted", "revolted", "sickened", "appalled"];
const TRUST: &[&str] = &["trust", "confident", "sure", "certain", "reliable"];

#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionScorer;

impl EmotionScorer {
    pub const fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> EmotionScores {
        let total_words = text.split_whitespace().count();
        if total_words == 0 {
            return EmotionScores::default();
        }

        let lowered = text.to_lowercase();
        let normalize = |triggers: &[&str]| -> f64 {
            let hits = triggers.iter().filter(|w| lowered.contains(*w)).count();
            (hits as f64 / total_words as f64).min(1.0)
        };

        EmotionScores {
            joy: normalize(JOY),
            sadness: normalize(SADNESS),
            anger: normalize(ANGER),
            fear: normalize(FEAR),
            surprise: normalize(SURPRISE),
            disgust: normalize(DISGUST),
            trust: normalize(TRUST),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero() {
        let scores = EmotionScorer::new().score("");
        assert!(scores.values().iter().all(|v| *v == 0.0));
        let scores = EmotionScorer::new().score("   ");
        assert!(scores.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_normalized_by_word_count() {
        let scores = EmotionScorer::new().score("I am so happy and excited today");
        // two joy triggers over seven words
        assert!((scores.joy - 2.0 / 7.0).abs() < 1e-12);
        assert_eq!(scores.anger, 0.0);
    }

    #[test]
    fn test_substring_matches_count() {
        // "madness" contains "mad", "measure" contains "sure"
        let scores = EmotionScorer::new().score("madness beyond measure");
        assert!((scores.anger - 1.0 / 3.0).abs() < 1e-12);
        assert!((scores.trust - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_case_insensitive_and_counted_once() {
        let scores = EmotionScorer::new().score("SAD sad Sad");
        assert!((scores.sadness - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        // a single word containing every joy trigger
        let scores = EmotionScorer::new().score("happyjoyexcitedwonderfulamazinggreatfantastic");
        assert!((scores.joy - 1.0).abs() < f64::EPSILON);
        for value in scores.values() {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
