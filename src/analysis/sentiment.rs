//! Sentiment scoring
//!
//! Two independent scorers run over the same text and are never reconciled:
//! - a lexical polarity/subjectivity scorer, categorized at ±0.1
//! - a valence-aware rule-based scorer (VADER), categorized at ±0.05
//!
//! Categories are decided on the unrounded score, then every float is
//! rounded to three decimals.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use lazy_static::lazy_static;

use super::types::round3;
use super::types::PolaritySentiment;
use super::types::SentimentLabel;
use super::types::ValenceSentiment;
use crate::errors::TextScopeError;
use crate::Result;

/// Polarity above this is positive, below its negation negative
pub const POLARITY_THRESHOLD: f64 = 0.1;
/// Compound score above this is positive, below its negation negative
pub const COMPOUND_THRESHOLD: f64 = 0.05;

/// Raw output of a polarity scorer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolarityScores {
    /// In [-1, 1]
    pub polarity: f64,
    /// In [0, 1]
    pub subjectivity: f64,
}

/// Raw output of a valence scorer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValenceScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<PolarityScores>;
}

pub trait ValenceScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<ValenceScores>;
}

/// Categorize and round polarity scores
pub fn polarity_sentiment(scores: PolarityScores) -> PolaritySentiment {
    PolaritySentiment {
        polarity: round3(scores.polarity),
        subjectivity: round3(scores.subjectivity),
        sentiment: SentimentLabel::from_score(scores.polarity, POLARITY_THRESHOLD),
    }
}

/// Categorize and round valence scores
pub fn valence_sentiment(scores: ValenceScores) -> ValenceSentiment {
    ValenceSentiment {
        compound: round3(scores.compound),
        positive: round3(scores.positive),
        negative: round3(scores.negative),
        neutral: round3(scores.neutral),
        sentiment: SentimentLabel::from_score(scores.compound, COMPOUND_THRESHOLD),
    }
}

// Lexicon: word, polarity, subjectivity, intensity
const POLARITY_LEXICON: &str = include_str!("../../data/polarity_lexicon.tsv");

#[derive(Debug, Clone, Copy)]
struct LexiconEntry {
    polarity: f64,
    subjectivity: f64,
    intensity: f64,
}

impl LexiconEntry {
    fn is_modifier(&self) -> bool {
        (self.intensity - 1.0).abs() > f64::EPSILON
    }
}

lazy_static! {
    static ref LEXICON: HashMap<String, LexiconEntry> = {
        let mut map = HashMap::new();
        for line in POLARITY_LEXICON.lines() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 4 {
                continue;
            }
            let parsed = (
                fields[1].trim().parse::<f64>(),
                fields[2].trim().parse::<f64>(),
                fields[3].trim().parse::<f64>(),
            );
            if let (Ok(polarity), Ok(subjectivity), Ok(intensity)) = parsed {
                map.insert(
                    fields[0].trim().to_lowercase(),
                    LexiconEntry {
                        polarity,
                        subjectivity,
                        intensity,
                    },
                );
            }
        }
        map
    };
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nt", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent",
    "werent", "cant", "cannot", "couldnt", "wont", "wouldnt", "shouldnt", "neither", "nor",
];

/// Negated words flip and dampen their polarity
const NEGATION_FACTOR: f64 = -0.5;

/// Averages lexicon polarity and subjectivity over the scored words.
///
/// Modifiers ("very", "extremely") multiply the next scored word; negations
/// ("not", "never") flip and halve it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalPolarityScorer;

impl LexicalPolarityScorer {
    pub const fn new() -> Self {
        Self
    }

    fn lookup(word: &str) -> Option<LexiconEntry> {
        LEXICON.get(word).copied()
    }
}

impl PolarityScorer for LexicalPolarityScorer {
    fn score(&self, text: &str) -> Result<PolarityScores> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .map(|w| w.replace('\'', "").to_lowercase())
            .collect();

        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut multiplier = 1.0;
        let mut negated = false;

        for (i, word) in words.iter().enumerate() {
            if NEGATIONS.contains(&word.as_str()) {
                negated = true;
                continue;
            }
            let Some(entry) = Self::lookup(word) else {
                continue;
            };

            let next_is_scored = words
                .get(i + 1)
                .and_then(|next| Self::lookup(next))
                .is_some_and(|next| !next.is_modifier());
            if entry.is_modifier() && next_is_scored {
                multiplier *= entry.intensity;
                continue;
            }

            let mut polarity = entry.polarity * multiplier;
            let subjectivity = entry.subjectivity * multiplier;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));

            multiplier = 1.0;
            negated = false;
        }

        if assessments.is_empty() {
            return Ok(PolarityScores::default());
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;

        Ok(PolarityScores {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        })
    }
}

/// VADER valence scorer from the `vader_sentiment` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct VaderScorer;

impl VaderScorer {
    pub const fn new() -> Self {
        Self
    }
}

impl ValenceScorer for VaderScorer {
    fn score(&self, text: &str) -> Result<ValenceScores> {
        if text.trim().is_empty() {
            return Ok(ValenceScores::default());
        }

        let scores = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
            let scores = analyzer.polarity_scores(text);
            let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
            ValenceScores {
                compound: get("compound"),
                positive: get("pos"),
                negative: get("neg"),
                neutral: get("neu"),
            }
        }))
        .map_err(|_| TextScopeError::analyzer("valence sentiment", "scorer panicked"))?;

        if [scores.compound, scores.positive, scores.negative, scores.neutral]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(TextScopeError::analyzer(
                "valence sentiment",
                "scorer returned a non-finite score",
            ));
        }

        Ok(scores)
    }
}
