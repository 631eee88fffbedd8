//! Result records produced by the analysis pipeline
//!
//! Every record here is request-scoped and serializes to the JSON shape the
//! HTTP API returns.

use serde::Deserialize;
use serde::Serialize;

/// Three-way sentiment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Classify a score against a symmetric threshold. The threshold itself is neutral.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Self::Positive
        } else if score < -threshold {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical polarity result (polarity/subjectivity scorer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolaritySentiment {
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentiment: SentimentLabel,
}

/// Valence-aware result (compound/pos/neg/neu scorer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValenceSentiment {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub sentiment: SentimentLabel,
}

/// Named entity span; offsets are in characters of the processed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosTag {
    pub token: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
}

/// Lexicon emotion scores, each in [0, 1]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub joy: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
    pub disgust: f64,
    pub trust: f64,
}

impl EmotionScores {
    /// Scores in fixed emotion order
    pub fn values(&self) -> [f64; 7] {
        [
            self.joy,
            self.sadness,
            self.anger,
            self.fear,
            self.surprise,
            self.disgust,
            self.trust,
        ]
    }
}

/// Keyword and word-cloud entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub smog_index: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
    pub linsear_write_formula: f64,
    pub dale_chall_readability_score: f64,
    pub difficult_words: usize,
    pub syllable_count: usize,
    pub lexicon_count: usize,
    pub sentence_count: usize,
}

/// Full analysis of one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub original_text: String,
    pub processed_text: String,
    pub language: String,
    pub timestamp: String,
    pub textblob_sentiment: PolaritySentiment,
    pub nltk_sentiment: ValenceSentiment,
    pub entities: Vec<Entity>,
    pub pos_tags: Vec<PosTag>,
    pub emotions: EmotionScores,
    pub keywords: Vec<WordFrequency>,
    pub readability: ReadabilityMetrics,
    pub emojis: Vec<EmojiCount>,
    pub wordcloud_data: Vec<WordFrequency>,
}

/// Polarity-only summary used by batch analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub text: String,
    pub sentiment: SentimentLabel,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Round to three decimal places
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_neutral() {
        assert_eq!(SentimentLabel::from_score(0.1, 0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.1, 0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.05, 0.05), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.1001, 0.1), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.0501, 0.05), SentimentLabel::Negative);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentLabel::Negative).unwrap();
        assert_eq!(json, "\"negative\"");
    }

    #[test]
    fn test_round3() {
        assert!((round3(0.123_456) - 0.123).abs() < f64::EPSILON);
        assert!((round3(-0.9996) - -1.0).abs() < f64::EPSILON);
    }
}
