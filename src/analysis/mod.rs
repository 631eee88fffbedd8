//! Text analysis pipeline
//!
//! [`AnalysisEngine`] owns every analyzer, is built once at startup and is
//! shared read-only behind an `Arc`. One request runs:
//!
//! validate -> preprocess -> detect language -> fan out analyzers -> assemble
//!
//! The fan-out branches have no data dependency on each other. In parallel
//! mode each runs on the blocking pool and the whole fan-out is bounded by
//! the configured timeout. Any failing branch fails the request.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use chrono::Local;
use chrono::SecondsFormat;
use tracing::debug;
use tracing::error;

pub mod annotator;
pub mod emoji;
pub mod emotion;
pub mod frequency;
pub mod keywords;
pub mod language;
pub mod preprocess;
pub mod readability;
pub mod sentiment;
pub mod stopwords;
pub mod types;

pub use annotator::Annotator;
pub use annotator::Document;
pub use annotator::RuleBasedAnnotator;
pub use emoji::EmojiMatcher;
pub use emotion::EmotionScorer;
pub use language::LanguageDetector;
pub use language::WhatlangDetector;
pub use preprocess::preprocess;
pub use readability::ReadabilityAnalyzer;
pub use sentiment::LexicalPolarityScorer;
pub use sentiment::PolarityScorer;
pub use sentiment::VaderScorer;
pub use sentiment::ValenceScorer;
pub use stopwords::StopWords;
pub use types::*;

use crate::config::AppConfig;
use crate::errors::TextScopeError;
use crate::Result;

/// Tunables for one engine, usually taken from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub keyword_limit: usize,
    pub wordcloud_limit: usize,
    pub wordcloud_min_length: usize,
    pub timeout: Duration,
    pub parallel: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalysisOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            keyword_limit: config.keyword_limit(),
            wordcloud_limit: config.wordcloud_limit(),
            wordcloud_min_length: config.analysis.wordcloud_min_length,
            timeout: Duration::from_secs(config.timeout_secs()),
            parallel: config.analysis.parallel,
        }
    }
}

/// Reject missing or whitespace-only input; returns the trimmed text
pub fn validate_text(text: Option<&str>) -> Result<&str> {
    match text.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(TextScopeError::Validation("No text provided".to_string())),
    }
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Outputs of the fan-out branches, before assembly
struct Branches {
    polarity: PolaritySentiment,
    valence: ValenceSentiment,
    document: Document,
    emotions: EmotionScores,
    readability: ReadabilityMetrics,
    emojis: Vec<EmojiCount>,
    wordcloud: Vec<WordFrequency>,
}

/// Immutable analyzer set shared across requests
pub struct AnalysisEngine {
    language: Arc<dyn LanguageDetector>,
    polarity: Arc<dyn PolarityScorer>,
    valence: Arc<dyn ValenceScorer>,
    annotator: Arc<dyn Annotator>,
    stop_words: Arc<StopWords>,
    emotion: EmotionScorer,
    readability: ReadabilityAnalyzer,
    emoji: EmojiMatcher,
    options: AnalysisOptions,
}

impl AnalysisEngine {
    /// Build the default analyzer set
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let stop_words = Arc::new(StopWords::english());
        if stop_words.is_empty() {
            return Err(TextScopeError::Config(
                "English stop-word list is empty".to_string(),
            ));
        }
        debug!("Loaded {} stop words", stop_words.len());

        Ok(Self {
            language: Arc::new(WhatlangDetector::new(config.language.require_reliable)),
            polarity: Arc::new(LexicalPolarityScorer::new()),
            valence: Arc::new(VaderScorer::new()),
            annotator: Arc::new(RuleBasedAnnotator::new(stop_words.clone())),
            stop_words,
            emotion: EmotionScorer::new(),
            readability: ReadabilityAnalyzer::new(),
            emoji: EmojiMatcher::new(),
            options: AnalysisOptions::from(config),
        })
    }

    pub fn with_language_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.language = detector;
        self
    }

    pub fn with_polarity_scorer(mut self, scorer: Arc<dyn PolarityScorer>) -> Self {
        self.polarity = scorer;
        self
    }

    pub fn with_valence_scorer(mut self, scorer: Arc<dyn ValenceScorer>) -> Self {
        self.valence = scorer;
        self
    }

    pub fn with_annotator(mut self, annotator: Arc<dyn Annotator>) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    fn keywords(&self, document: &Document) -> Vec<WordFrequency> {
        keywords::extract_keywords(document, self.options.keyword_limit)
    }

    fn wordcloud(&self, processed: &str) -> Vec<WordFrequency> {
        keywords::build_wordcloud(
            processed,
            &self.stop_words,
            self.options.wordcloud_min_length,
            self.options.wordcloud_limit,
        )
    }

    fn assemble(
        &self,
        original: &str,
        processed: String,
        language: String,
        branches: Branches,
    ) -> AnalysisResult {
        let keywords = self.keywords(&branches.document);
        let pos_tags = branches.document.pos_tags();
        AnalysisResult {
            original_text: original.to_string(),
            processed_text: processed,
            language,
            timestamp: timestamp(),
            textblob_sentiment: branches.polarity,
            nltk_sentiment: branches.valence,
            entities: branches.document.entities,
            pos_tags,
            emotions: branches.emotions,
            keywords,
            readability: branches.readability,
            emojis: branches.emojis,
            wordcloud_data: branches.wordcloud,
        }
    }

    fn run_sequential(&self, original: &str, processed: &str) -> Result<Branches> {
        Ok(Branches {
            polarity: sentiment::polarity_sentiment(self.polarity.score(processed)?),
            valence: sentiment::valence_sentiment(self.valence.score(processed)?),
            document: self.annotator.annotate(processed)?,
            emotions: self.emotion.score(processed),
            readability: self.readability.analyze(processed),
            emojis: self.emoji.extract(original),
            wordcloud: self.wordcloud(processed),
        })
    }

    async fn run_parallel(self: &Arc<Self>, original: &str, processed: &str) -> Result<Branches> {
        let original: Arc<str> = Arc::from(original);
        let processed: Arc<str> = Arc::from(processed);

        let polarity = {
            let (engine, text) = (self.clone(), processed.clone());
            run_blocking("polarity sentiment", move || {
                engine
                    .polarity
                    .score(&text)
                    .map(sentiment::polarity_sentiment)
            })
        };
        let valence = {
            let (engine, text) = (self.clone(), processed.clone());
            run_blocking("valence sentiment", move || {
                engine.valence.score(&text).map(sentiment::valence_sentiment)
            })
        };
        let document = {
            let (engine, text) = (self.clone(), processed.clone());
            run_blocking("annotation", move || engine.annotator.annotate(&text))
        };
        let emotions = {
            let (engine, text) = (self.clone(), processed.clone());
            run_blocking("emotion", move || Ok(engine.emotion.score(&text)))
        };
        let readability = {
            let (engine, text) = (self.clone(), processed.clone());
            run_blocking("readability", move || Ok(engine.readability.analyze(&text)))
        };
        let emojis = {
            let engine = self.clone();
            run_blocking("emoji", move || Ok(engine.emoji.extract(&original)))
        };
        let wordcloud = {
            let (engine, text) = (self.clone(), processed);
            run_blocking("word cloud", move || Ok(engine.wordcloud(&text)))
        };

        let fan_out = async {
            tokio::try_join!(
                polarity,
                valence,
                document,
                emotions,
                readability,
                emojis,
                wordcloud
            )
        };

        let timeout = self.options.timeout;
        let (polarity, valence, document, emotions, readability, emojis, wordcloud) =
            tokio::time::timeout(timeout, fan_out)
                .await
                .map_err(|_| TextScopeError::Timeout(timeout.as_secs()))??;

        Ok(Branches {
            polarity,
            valence,
            document,
            emotions,
            readability,
            emojis,
            wordcloud,
        })
    }

    /// Full analysis of one text
    pub async fn analyze(self: &Arc<Self>, text: &str) -> Result<AnalysisResult> {
        let original = validate_text(Some(text))?;
        if !self.options.parallel {
            let engine = self.clone();
            let original = original.to_string();
            return tokio::task::spawn_blocking(move || engine.analyze_blocking(&original))
                .await
                .map_err(|e| TextScopeError::analyzer("analysis", e.to_string()))?;
        }

        let started = Instant::now();
        let processed = preprocess(original);
        let language = self.language.detect(&processed);

        let branches = self
            .run_parallel(original, &processed)
            .await
            .inspect_err(|e| error!("Text analysis failed: {}", e))?;

        let result = self.assemble(original, processed, language, branches);
        debug!(
            "Analyzed {} chars in {:?} (parallel)",
            original.chars().count(),
            started.elapsed()
        );
        Ok(result)
    }

    /// Full analysis of one text on the calling thread
    pub fn analyze_blocking(&self, text: &str) -> Result<AnalysisResult> {
        let original = validate_text(Some(text))?;
        let started = Instant::now();
        let processed = preprocess(original);
        let language = self.language.detect(&processed);

        let branches = self
            .run_sequential(original, &processed)
            .inspect_err(|e| error!("Text analysis failed: {}", e))?;

        let result = self.assemble(original, processed, language, branches);
        debug!(
            "Analyzed {} chars in {:?} (sequential)",
            original.chars().count(),
            started.elapsed()
        );
        Ok(result)
    }

    /// Polarity-only analysis of several texts. Blank entries are skipped
    /// and each result echoes its input unchanged.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<BatchItem>> {
        if texts.is_empty() {
            return Err(TextScopeError::Validation("No texts provided".to_string()));
        }

        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let text = text.as_ref();
            if text.trim().is_empty() {
                continue;
            }
            let processed = preprocess(text);
            let scored = sentiment::polarity_sentiment(self.polarity.score(&processed)?);
            results.push(BatchItem {
                text: text.to_string(),
                sentiment: scored.sentiment,
                polarity: scored.polarity,
                subjectivity: scored.subjectivity,
            });
        }

        debug!(
            "Batch analyzed {} of {} texts",
            results.len(),
            texts.len()
        );
        Ok(results)
    }
}

async fn run_blocking<T, F>(branch: &'static str, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TextScopeError::analyzer(branch, e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sentiment::PolarityScores;

    struct FailingScorer;

    impl PolarityScorer for FailingScorer {
        fn score(&self, _text: &str) -> Result<PolarityScores> {
            Err(TextScopeError::analyzer("polarity sentiment", "model unavailable"))
        }
    }

    struct FixedLanguage;

    impl LanguageDetector for FixedLanguage {
        fn detect(&self, _text: &str) -> String {
            "xx".to_string()
        }
    }

    fn engine() -> Arc<AnalysisEngine> {
        Arc::new(AnalysisEngine::from_config(&AppConfig::default()).unwrap())
    }

    fn sequential_engine() -> AnalysisEngine {
        let options = AnalysisOptions {
            parallel: false,
            ..AnalysisOptions::default()
        };
        AnalysisEngine::from_config(&AppConfig::default())
            .unwrap()
            .with_options(options)
    }

    const SAMPLE: &str = "I love sunny days! 😊 https://example.com";

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text(Some("  hi ")).unwrap(), "hi");
        for input in [None, Some(""), Some("   \n\t")] {
            let err = validate_text(input).unwrap_err();
            assert!(matches!(err, TextScopeError::Validation(_)));
            assert_eq!(err.to_string(), "No text provided");
        }
    }

    #[test]
    fn test_options_follow_config() {
        let config = AppConfig::from_toml_str(
            "[analysis]\nkeyword_limit = 3\nwordcloud_limit = 4\ntimeout_secs = 7\nparallel = false",
        )
        .unwrap();
        let options = AnalysisOptions::from(&config);
        assert_eq!(options.keyword_limit, 3);
        assert_eq!(options.wordcloud_limit, 4);
        assert_eq!(options.timeout, Duration::from_secs(7));
        assert!(!options.parallel);

        let engine = AnalysisEngine::from_config(&config).unwrap();
        let text = "alpha beta gamma delta epsilon zeta alpha beta gamma";
        let result = engine.analyze_blocking(text).unwrap();
        assert!(result.keywords.len() <= 3);
        assert_eq!(result.wordcloud_data.len(), 4);
        assert_eq!(result.wordcloud_data[0].word, "alpha");
    }

    #[tokio::test]
    async fn test_sample_text() {
        let result = engine().analyze(SAMPLE).await.unwrap();
        assert_eq!(result.original_text, SAMPLE);
        assert!(!result.processed_text.contains("example.com"));
        assert!(!result.processed_text.contains("http"));
        assert!(result.processed_text.contains('😊'));
        assert_eq!(result.textblob_sentiment.sentiment, SentimentLabel::Positive);
        assert_eq!(
            result.emojis,
            vec![EmojiCount {
                emoji: "😊".to_string(),
                count: 1
            }]
        );
        assert!(result.keywords.len() <= 10);
        assert!(result.wordcloud_data.len() <= 50);
        assert!(chrono::DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_analysis() {
        let engine = Arc::new(
            AnalysisEngine::from_config(&AppConfig::default())
                .unwrap()
                .with_polarity_scorer(Arc::new(FailingScorer)),
        );
        let err = engine.analyze("   ").await.unwrap_err();
        assert!(matches!(err, TextScopeError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failing_branch_fails_request() {
        let engine = Arc::new(
            AnalysisEngine::from_config(&AppConfig::default())
                .unwrap()
                .with_polarity_scorer(Arc::new(FailingScorer)),
        );
        let err = engine.analyze("a perfectly normal sentence").await.unwrap_err();
        assert!(matches!(err, TextScopeError::Analyzer { .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let text = "Apple opened a new office in Paris on Monday. The team was very happy!";
        let parallel = engine().analyze(text).await.unwrap();
        let sequential = sequential_engine().analyze_blocking(text).unwrap();

        assert_eq!(parallel.processed_text, sequential.processed_text);
        assert_eq!(parallel.language, sequential.language);
        assert_eq!(parallel.textblob_sentiment, sequential.textblob_sentiment);
        assert_eq!(parallel.nltk_sentiment, sequential.nltk_sentiment);
        assert_eq!(parallel.entities, sequential.entities);
        assert_eq!(parallel.pos_tags, sequential.pos_tags);
        assert_eq!(parallel.emotions, sequential.emotions);
        assert_eq!(parallel.keywords, sequential.keywords);
        assert_eq!(parallel.readability, sequential.readability);
        assert_eq!(parallel.emojis, sequential.emojis);
        assert_eq!(parallel.wordcloud_data, sequential.wordcloud_data);
    }

    #[tokio::test]
    async fn test_sequential_mode_through_async_entry() {
        let engine = Arc::new(sequential_engine());
        let result = engine.analyze(SAMPLE).await.unwrap();
        assert_eq!(result.textblob_sentiment.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn test_injected_language_detector() {
        let engine = sequential_engine().with_language_detector(Arc::new(FixedLanguage));
        let result = engine.analyze_blocking("hello there").unwrap();
        assert_eq!(result.language, "xx");
    }

    #[test]
    fn test_emoji_only_text_still_analyzes() {
        let result = sequential_engine().analyze_blocking("🎉🎉").unwrap();
        assert_eq!(result.emojis[0].count, 2);
        assert!(result.readability.flesch_reading_ease.is_finite());
    }

    #[test]
    fn test_batch_skips_blank_and_echoes_text() {
        let results = engine()
            .analyze_batch(&["great day", "", "terrible day", "   "])
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "great day");
        assert_eq!(results[0].sentiment, SentimentLabel::Positive);
        assert_eq!(results[1].text, "terrible day");
        assert_eq!(results[1].sentiment, SentimentLabel::Negative);
    }

    #[test]
    fn test_batch_empty_list_is_validation_error() {
        let empty: [&str; 0] = [];
        let err = engine().analyze_batch(&empty).unwrap_err();
        assert_eq!(err.to_string(), "No texts provided");
        // only blanks is fine and yields nothing
        assert!(engine().analyze_batch(&["", " "]).unwrap().is_empty());
    }

    #[test]
    fn test_batch_failure_propagates() {
        let engine = sequential_engine().with_polarity_scorer(Arc::new(FailingScorer));
        assert!(engine.analyze_batch(&["fine"]).is_err());
    }
}
