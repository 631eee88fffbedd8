//! Token and entity annotation
//!
//! [`RuleBasedAnnotator`] segments text on Unicode word boundaries and tags
//! each token from closed-class word tables, suffix rules and capitalization.
//! It produces Universal POS tags, Penn Treebank tags, a flat dependency
//! label, a lemma, and entity spans. Any statistical tagger can be plugged
//! in instead by implementing [`Annotator`].

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopWords;
use super::types::Entity;
use super::types::PosTag;
use crate::Result;

/// One annotated token; offsets are in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_punct: bool,
    pub is_stop: bool,
}

/// Annotated text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Document {
    /// POS records in token order
    pub fn pos_tags(&self) -> Vec<PosTag> {
        self.tokens
            .iter()
            .map(|t| PosTag {
                token: t.text.clone(),
                pos: t.pos.clone(),
                tag: t.tag.clone(),
                dep: t.dep.clone(),
            })
            .collect()
    }
}

pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Document>;
}

lazy_static! {
    /// word -> (universal pos, penn tag)
    static ref CLOSED_CLASS: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut map = HashMap::new();
        for w in ["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "all", "both", "either", "neither", "another"] {
            map.insert(w, ("DET", "DT"));
        }
        for w in ["my", "your", "his", "her", "its", "our", "their"] {
            map.insert(w, ("PRON", "PRP$"));
        }
        for w in ["i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves", "mine", "yours", "hers", "ours", "theirs", "someone", "something", "anyone", "anything", "everyone", "everything", "nobody", "nothing"] {
            map.insert(w, ("PRON", "PRP"));
        }
        for w in ["who", "whom", "what", "which", "whose"] {
            map.insert(w, ("PRON", "WP"));
        }
        for w in ["in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during", "before", "after", "above", "below", "to", "from", "of", "off", "over", "under", "near", "across", "behind", "beyond", "without", "within", "toward", "towards", "upon", "around"] {
            map.insert(w, ("ADP", "IN"));
        }
        for w in ["and", "or", "but", "nor", "yet"] {
            map.insert(w, ("CCONJ", "CC"));
        }
        for w in ["because", "although", "though", "if", "while", "since", "unless", "whereas", "whether", "than"] {
            map.insert(w, ("SCONJ", "IN"));
        }
        for (w, tag) in [
            ("am", "VBP"), ("is", "VBZ"), ("are", "VBP"), ("was", "VBD"), ("were", "VBD"),
            ("be", "VB"), ("been", "VBN"), ("being", "VBG"), ("has", "VBZ"), ("have", "VBP"),
            ("had", "VBD"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"), ("will", "MD"),
            ("would", "MD"), ("can", "MD"), ("could", "MD"), ("shall", "MD"), ("should", "MD"),
            ("may", "MD"), ("might", "MD"), ("must", "MD"),
        ] {
            map.insert(w, ("AUX", tag));
        }
        for w in ["not", "nt"] {
            map.insert(w, ("PART", "RB"));
        }
        for w in ["very", "really", "too", "also", "just", "so", "quite", "always", "never", "often", "here", "there", "now", "then", "soon", "still", "already", "again", "ever", "almost", "rather", "sometimes", "usually", "maybe", "perhaps", "well"] {
            map.insert(w, ("ADV", "RB"));
        }
        for w in ["when", "where", "why", "how"] {
            map.insert(w, ("ADV", "WRB"));
        }
        for w in ["oh", "wow", "hey", "hello", "hi", "yes", "yeah", "ok", "okay", "please", "thanks", "lol", "oops", "hooray"] {
            map.insert(w, ("INTJ", "UH"));
        }
        for w in ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven", "twelve", "twenty", "thirty", "hundred", "thousand", "million", "billion"] {
            map.insert(w, ("NUM", "CD"));
        }
        map
    };

    static ref BASE_VERBS: HashSet<&'static str> = [
        "love", "like", "hate", "go", "get", "make", "know", "think", "take", "see", "come",
        "want", "look", "use", "find", "give", "tell", "work", "call", "try", "ask", "need",
        "feel", "become", "leave", "put", "mean", "keep", "let", "begin", "seem", "help",
        "talk", "turn", "start", "show", "hear", "play", "run", "move", "live", "believe",
        "bring", "happen", "write", "sit", "stand", "lose", "pay", "meet", "enjoy", "eat",
        "say", "buy", "build", "read", "learn", "change", "watch", "follow", "stop", "create",
        "speak", "allow", "add", "spend", "grow", "open", "walk", "win", "offer", "remember",
        "consider", "appear", "wait", "serve", "die", "send", "expect", "stay", "fall",
        "cut", "reach", "kill", "remain", "suggest", "raise", "pass", "sell", "require",
        "report", "decide", "pull", "miss", "recommend", "prefer", "adore", "fix", "ship",
    ]
    .into_iter()
    .collect();

    static ref ADJECTIVES: HashSet<&'static str> = [
        "good", "bad", "great", "new", "old", "big", "small", "long", "short", "high", "low",
        "happy", "sad", "nice", "hot", "cold", "young", "large", "little", "early", "late",
        "easy", "hard", "quick", "slow", "brown", "lazy", "red", "blue", "green", "black",
        "white", "sunny", "rainy", "cloudy", "warm", "cool", "bright", "dark", "fine",
        "free", "full", "real", "sure", "clear", "strong", "weak", "rich", "poor", "true",
        "false", "wrong", "right", "awful", "terrible", "amazing", "fantastic", "excellent",
        "perfect", "pretty", "ugly", "angry", "scared", "afraid", "proud", "glad", "busy",
        "tired", "calm", "fast", "simple", "main", "whole", "own", "same", "different",
        "other", "such", "only", "many", "much", "few", "several", "last", "next", "first",
        "best", "better", "worse", "worst", "mad", "cute", "smart", "stupid",
    ]
    .into_iter()
    .collect();

    /// irregular inflection -> lemma
    static ref IRREGULAR_LEMMAS: HashMap<&'static str, &'static str> = [
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"), ("does", "do"),
        ("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"), ("goes", "go"),
        ("got", "get"), ("gotten", "get"), ("made", "make"), ("said", "say"), ("saw", "see"),
        ("seen", "see"), ("took", "take"), ("taken", "take"), ("came", "come"),
        ("knew", "know"), ("known", "know"), ("thought", "think"), ("gave", "give"),
        ("given", "give"), ("told", "tell"), ("felt", "feel"), ("left", "leave"),
        ("ran", "run"), ("wrote", "write"), ("written", "write"), ("ate", "eat"),
        ("eaten", "eat"), ("bought", "buy"), ("brought", "bring"), ("found", "find"),
        ("built", "build"), ("kept", "keep"), ("began", "begin"), ("begun", "begin"),
        ("sat", "sit"), ("stood", "stand"), ("lost", "lose"), ("paid", "pay"),
        ("met", "meet"), ("sent", "send"), ("spent", "spend"), ("grew", "grow"),
        ("won", "win"), ("fell", "fall"), ("sold", "sell"), ("spoke", "speak"),
        ("spoken", "speak"), ("became", "become"), ("meant", "mean"), ("heard", "hear"),
        ("used", "use"), ("children", "child"), ("men", "man"), ("women", "woman"),
        ("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"),
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ]
    .into_iter()
    .collect();

    static ref MONTHS_AND_DAYS: HashSet<&'static str> = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "monday", "tuesday", "wednesday",
        "thursday", "friday", "saturday", "sunday",
    ]
    .into_iter()
    .collect();

    static ref RELATIVE_DATES: HashSet<&'static str> =
        ["today", "yesterday", "tomorrow", "tonight"].into_iter().collect();

    static ref PLACES: HashSet<&'static str> = [
        "america", "usa", "us", "uk", "england", "britain", "france", "germany", "spain",
        "italy", "china", "japan", "india", "canada", "mexico", "brazil", "russia",
        "australia", "ireland", "scotland", "egypt", "kenya", "nigeria", "korea", "europe",
        "africa", "asia", "london", "paris", "berlin", "madrid", "rome", "tokyo", "beijing",
        "delhi", "moscow", "sydney", "toronto", "chicago", "boston", "seattle", "texas",
        "california", "florida", "york", "francisco", "angeles", "new", "san", "los",
        "washington", "amsterdam", "dublin", "vienna", "prague", "lisbon", "singapore",
    ]
    .into_iter()
    .collect();

    static ref NATIONALITIES: HashSet<&'static str> = [
        "american", "british", "english", "french", "german", "spanish", "italian",
        "chinese", "japanese", "indian", "canadian", "mexican", "russian", "australian",
        "european", "african", "asian", "christian", "muslim", "jewish", "buddhist",
        "democrat", "democrats", "republican", "republicans",
    ]
    .into_iter()
    .collect();

    static ref ORGANIZATIONS: HashSet<&'static str> = [
        "google", "apple", "microsoft", "amazon", "facebook", "meta", "netflix", "tesla",
        "twitter", "ibm", "intel", "nasa", "fbi", "cia", "un", "eu", "nato", "who",
        "openai", "mozilla", "github", "spotify", "uber", "samsung", "sony", "toyota",
    ]
    .into_iter()
    .collect();

    static ref ORG_SUFFIXES: HashSet<&'static str> = [
        "inc", "corp", "corporation", "company", "co", "ltd", "llc", "university",
        "institute", "foundation", "bank", "group", "association", "agency", "council",
        "college", "school", "hospital", "ministry", "department", "committee",
    ]
    .into_iter()
    .collect();

    static ref TITLES: HashSet<&'static str> =
        ["mr", "mrs", "ms", "dr", "prof", "sir", "madam", "president", "senator"]
            .into_iter()
            .collect();

    static ref ORDINAL: Regex =
        Regex::new(r"^(?i:\d+(st|nd|rd|th)|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)$")
            .expect("valid ordinal pattern");

    static ref EMOJI_CHAR: Regex =
        Regex::new(r"\p{Extended_Pictographic}").expect("valid emoji pattern");
}

const PERCENT_WORDS: &[&str] = &["percent", "pct"];
const MONEY_WORDS: &[&str] = &[
    "dollar", "dollars", "euro", "euros", "pound", "pounds", "usd", "eur", "gbp", "yen",
    "cents",
];
const TIME_WORDS: &[&str] = &["am", "pm", "oclock"];

/// Table, suffix and capitalization based annotator
#[derive(Debug, Clone)]
pub struct RuleBasedAnnotator {
    stop_words: Arc<StopWords>,
}

impl RuleBasedAnnotator {
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self { stop_words }
    }
}

/// Token under construction; keeps byte offsets for slicing
#[derive(Debug, Clone)]
struct RawToken<'a> {
    text: &'a str,
    lower: String,
    byte_start: usize,
    byte_end: usize,
    char_start: usize,
    char_end: usize,
    pos: &'static str,
    tag: &'static str,
}

impl RawToken<'_> {
    fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    fn is_number(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
            && self.text.chars().any(|c| c.is_ascii_digit())
    }

    fn is_nominal(&self) -> bool {
        matches!(self.pos, "NOUN" | "PROPN" | "PRON")
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '…' | '“' | '”' | '‘' | '’' | '«' | '»' | '—' | '–' | '¡' | '¿' | '。' | '、'
        )
}

fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut last_byte = 0;
    let mut last_char = 0;

    for (byte_start, segment) in text.split_word_bound_indices() {
        let char_start = last_char + text[last_byte..byte_start].chars().count();
        let char_end = char_start + segment.chars().count();
        last_byte = byte_start;
        last_char = char_start;

        if segment.chars().all(char::is_whitespace) {
            continue;
        }

        tokens.push(RawToken {
            text: segment,
            lower: segment.to_lowercase(),
            byte_start,
            byte_end: byte_start + segment.len(),
            char_start,
            char_end,
            pos: "X",
            tag: "XX",
        });
    }

    tokens
}

/// Universal POS and Penn tag for each token
fn tag_tokens(tokens: &mut [RawToken<'_>]) {
    for i in 0..tokens.len() {
        let sentence_start = i == 0 || matches!(tokens[i - 1].text, "." | "!" | "?");
        let next_capitalized = tokens
            .get(i + 1)
            .is_some_and(|t| t.is_capitalized() && t.lower != "i");
        let prev_lower = if i > 0 { Some(tokens[i - 1].lower.clone()) } else { None };

        let token = &tokens[i];
        let lower = token.lower.as_str();

        let (pos, tag) = if token.text.chars().all(is_punctuation) {
            if matches!(token.text, "." | "!" | "?") {
                ("PUNCT", ".")
            } else {
                ("PUNCT", ",")
            }
        } else if EMOJI_CHAR.is_match(token.text) {
            ("SYM", "NFP")
        } else if token.is_number() {
            ("NUM", "CD")
        } else if ORDINAL.is_match(lower) {
            ("ADJ", "JJ")
        } else if token.is_capitalized()
            && lower != "i"
            && (!sentence_start
                || next_capitalized
                || MONTHS_AND_DAYS.contains(lower)
                || PLACES.contains(lower)
                || ORGANIZATIONS.contains(lower)
                || NATIONALITIES.contains(lower))
            && !(sentence_start && CLOSED_CLASS.contains_key(lower) && !next_capitalized)
        {
            if lower.ends_with('s') && lower.len() > 3 && !lower.ends_with("ss") && !PLACES.contains(lower) {
                ("PROPN", "NNPS")
            } else {
                ("PROPN", "NNP")
            }
        } else if let Some(&(pos, tag)) = CLOSED_CLASS.get(lower) {
            (pos, tag)
        } else if ADJECTIVES.contains(lower) {
            ("ADJ", "JJ")
        } else if let Some(tag) = verb_tag(lower, prev_lower.as_deref()) {
            ("VERB", tag)
        } else {
            suffix_tag(lower)
        };

        tokens[i].pos = pos;
        tokens[i].tag = tag;
    }
}

/// Tag for a known verb form, `None` for anything else
fn verb_tag(lower: &str, prev: Option<&str>) -> Option<&'static str> {
    if BASE_VERBS.contains(lower) {
        let tag = match prev {
            Some("to") => "VB",
            Some(p) if CLOSED_CLASS.get(p).is_some_and(|(_, t)| *t == "MD") => "VB",
            Some("he" | "she" | "it") => "VBZ",
            _ => "VBP",
        };
        return Some(tag);
    }
    if let Some(lemma) = IRREGULAR_LEMMAS.get(lower) {
        if BASE_VERBS.contains(*lemma) {
            let tag = if lower.ends_with('n') { "VBN" } else { "VBD" };
            return Some(tag);
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if BASE_VERBS.contains(stem) || stem.strip_suffix('e').is_some_and(|s| BASE_VERBS.contains(s)) {
            if matches!(prev, Some("he" | "she" | "it")) {
                return Some("VBZ");
            }
        }
    }
    None
}

fn suffix_tag(lower: &str) -> (&'static str, &'static str) {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        ("VERB", "VBG")
    } else if len > 3 && lower.ends_with("ed") {
        ("VERB", "VBD")
    } else if len > 3 && lower.ends_with("ly") {
        ("ADV", "RB")
    } else if len > 5 && lower.ends_with("est") {
        ("ADJ", "JJS")
    } else if len > 4
        && ["ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ic"]
            .iter()
            .any(|s| lower.ends_with(s))
    {
        ("ADJ", "JJ")
    } else if lower.chars().all(char::is_alphabetic) {
        if len > 3 && lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
            ("NOUN", "NNS")
        } else {
            ("NOUN", "NN")
        }
    } else {
        ("X", "XX")
    }
}

/// Flat dependency labels anchored on the first verb
fn label_dependencies(tokens: &[RawToken<'_>]) -> Vec<&'static str> {
    let root = tokens
        .iter()
        .position(|t| t.pos == "VERB")
        .or_else(|| tokens.iter().position(|t| t.pos == "AUX"))
        .or_else(|| tokens.iter().position(|t| matches!(t.pos, "NOUN" | "PROPN")))
        .unwrap_or(0);

    let mut deps = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        if i == root {
            deps.push("ROOT");
            continue;
        }
        let next = tokens.get(i + 1);
        let prev = if i > 0 { tokens.get(i - 1) } else { None };

        let dep = match token.pos {
            "PUNCT" => "punct",
            "DET" => "det",
            "PRON" if token.tag == "PRP$" => "poss",
            "ADJ" => {
                if next.is_some_and(|n| matches!(n.pos, "NOUN" | "PROPN" | "ADJ")) {
                    "amod"
                } else {
                    "acomp"
                }
            }
            "ADV" => "advmod",
            "PART" => "neg",
            "AUX" => "aux",
            "ADP" => "prep",
            "CCONJ" => "cc",
            "SCONJ" => "mark",
            "NUM" => "nummod",
            "INTJ" => "intj",
            "VERB" => {
                if prev.is_some_and(|p| p.pos == "CCONJ") {
                    "conj"
                } else {
                    "advcl"
                }
            }
            "NOUN" | "PROPN" | "PRON" => {
                if next.is_some_and(|n| matches!(n.pos, "NOUN" | "PROPN")) && token.pos != "PRON" {
                    "compound"
                } else if governed_by_preposition(tokens, i) {
                    "pobj"
                } else if i < root {
                    "nsubj"
                } else {
                    "dobj"
                }
            }
            _ => "dep",
        };
        deps.push(dep);
    }
    deps
}

/// Whether a nominal's nearest non-modifier predecessor is a preposition
fn governed_by_preposition(tokens: &[RawToken<'_>], index: usize) -> bool {
    tokens[..index]
        .iter()
        .rev()
        .find(|t| !matches!(t.pos, "DET" | "ADJ" | "NUM") && !(t.is_nominal() && t.tag == "PRP$"))
        .is_some_and(|t| t.pos == "ADP")
}

fn lemmatize(token: &RawToken<'_>) -> String {
    let lower = token.lower.as_str();
    if token.pos == "PROPN" {
        return token.text.to_string();
    }
    if let Some(lemma) = IRREGULAR_LEMMAS.get(lower) {
        return (*lemma).to_string();
    }
    match token.tag {
        "NNS" | "VBZ" => singularize(lower),
        "VBG" => strip_verb_suffix(lower, "ing"),
        "VBD" | "VBN" => strip_verb_suffix(lower, "ed"),
        _ => lower.to_string(),
    }
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() > 1 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") && !word.ends_with("is") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Undo -ing/-ed: "running" -> "run", "making" -> "make", "walked" -> "walk"
fn strip_verb_suffix(word: &str, suffix: &str) -> String {
    let Some(stem) = word.strip_suffix(suffix) else {
        return word.to_string();
    };
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 2 {
        return word.to_string();
    }

    // doubled final consonant: running -> run, stopped -> stop
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) && !matches!(chars[n - 1], 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }

    // short consonant-vowel-consonant stem lost its silent e: making -> make
    if (n == 3 || n == 4)
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 3])
    {
        return format!("{stem}e");
    }

    // -ied: tried -> try
    if suffix == "ed" && stem.ends_with('i') {
        return format!("{}y", &stem[..stem.len() - 1]);
    }

    stem.to_string()
}

/// Entity spans as (first token, last token inclusive, label)
fn find_entities(tokens: &[RawToken<'_>]) -> Vec<(usize, usize, &'static str)> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let lower = token.lower.as_str();

        if token.pos == "PROPN" {
            let mut end = i;
            while end + 1 < tokens.len() {
                let next = &tokens[end + 1];
                if next.pos == "PROPN" {
                    end += 1;
                } else if next.lower == "of"
                    && tokens.get(end + 2).is_some_and(|t| t.pos == "PROPN")
                {
                    end += 2;
                } else {
                    break;
                }
            }

            // Month or weekday followed by a day/year number
            if MONTHS_AND_DAYS.contains(lower) && end == i {
                let mut date_end = i;
                while tokens.get(date_end + 1).is_some_and(|t| t.pos == "NUM" || ORDINAL.is_match(&t.lower)) {
                    date_end += 1;
                }
                spans.push((i, date_end, "DATE"));
                i = date_end + 1;
                continue;
            }

            let mut start = i;
            if i > 0 && TITLES.contains(tokens[i - 1].lower.as_str()) && tokens[i - 1].is_capitalized() {
                start = i - 1;
            }
            let label = label_proper_span(&tokens[start..=end], start != i);
            spans.push((start, end, label));
            i = end + 1;
            continue;
        }

        if token.pos == "NUM" {
            let next = tokens.get(i + 1).map(|t| t.lower.as_str());
            let (end, label) = match next {
                Some(w) if PERCENT_WORDS.contains(&w) => (i + 1, "PERCENT"),
                Some(w) if MONEY_WORDS.contains(&w) => (i + 1, "MONEY"),
                Some(w) if TIME_WORDS.contains(&w) => (i + 1, "TIME"),
                _ if is_year(lower) => (i, "DATE"),
                _ => (i, "CARDINAL"),
            };
            spans.push((i, end, label));
            i = end + 1;
            continue;
        }

        if ORDINAL.is_match(lower) {
            spans.push((i, i, "ORDINAL"));
        } else if RELATIVE_DATES.contains(lower) {
            spans.push((i, i, if lower == "tonight" { "TIME" } else { "DATE" }));
        }
        i += 1;
    }

    spans
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.parse::<u32>().is_ok_and(|y| (1000..=2100).contains(&y))
}

fn label_proper_span(span: &[RawToken<'_>], titled: bool) -> &'static str {
    let words: Vec<&str> = span.iter().map(|t| t.lower.as_str()).collect();
    if titled {
        "PERSON"
    } else if words.iter().any(|w| ORG_SUFFIXES.contains(*w))
        || words.iter().all(|w| ORGANIZATIONS.contains(*w)) {
        "ORG"
    } else if words.iter().all(|w| PLACES.contains(*w) || *w == "of") {
        "GPE"
    } else if words.len() == 1 && NATIONALITIES.contains(words[0]) {
        "NORP"
    } else if words.len() >= 2 {
        "PERSON"
    } else {
        "ORG"
    }
}

impl Annotator for RuleBasedAnnotator {
    fn annotate(&self, text: &str) -> Result<Document> {
        let mut raw = tokenize(text);
        tag_tokens(&mut raw);
        let deps = label_dependencies(&raw);

        let entities = find_entities(&raw)
            .into_iter()
            .map(|(first, last, label)| Entity {
                text: text[raw[first].byte_start..raw[last].byte_end].to_string(),
                label: label.to_string(),
                start: raw[first].char_start,
                end: raw[last].char_end,
            })
            .collect();

        let tokens = raw
            .iter()
            .zip(deps)
            .map(|(t, dep)| Token {
                text: t.text.to_string(),
                start: t.char_start,
                end: t.char_end,
                pos: t.pos.to_string(),
                tag: t.tag.to_string(),
                dep: dep.to_string(),
                lemma: lemmatize(t),
                is_alpha: t.is_alpha(),
                is_punct: t.pos == "PUNCT",
                is_stop: self.stop_words.contains(&t.lower),
            })
            .collect();

        Ok(Document { tokens, entities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(text: &str) -> Document {
        RuleBasedAnnotator::new(Arc::new(StopWords::english()))
            .annotate(text)
            .unwrap()
    }

    fn token<'a>(doc: &'a Document, text: &str) -> &'a Token {
        doc.tokens.iter().find(|t| t.text == text).unwrap()
    }

    #[test]
    fn test_one_tag_per_token_in_order() {
        let doc = annotate("I love sunny days 😊");
        let words: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["I", "love", "sunny", "days", "😊"]);
        assert_eq!(doc.pos_tags().len(), 5);
    }

    #[test]
    fn test_basic_tags() {
        let doc = annotate("I love sunny days 😊");
        assert_eq!(token(&doc, "I").pos, "PRON");
        assert_eq!(token(&doc, "love").pos, "VERB");
        assert_eq!(token(&doc, "love").dep, "ROOT");
        assert_eq!(token(&doc, "sunny").pos, "ADJ");
        assert_eq!(token(&doc, "sunny").dep, "amod");
        assert_eq!(token(&doc, "days").tag, "NNS");
        assert_eq!(token(&doc, "days").lemma, "day");
        assert_eq!(token(&doc, "😊").pos, "SYM");
        assert!(!token(&doc, "😊").is_alpha);
    }

    #[test]
    fn test_offsets_are_character_based() {
        let text = "café ☕ with Anna Smith";
        let doc = annotate(text);
        let chars: Vec<char> = text.chars().collect();
        for t in &doc.tokens {
            let slice: String = chars[t.start..t.end].iter().collect();
            assert_eq!(slice, t.text);
        }
    }

    #[test]
    fn test_person_and_place_entities() {
        let text = "yesterday Anna Smith flew to Paris";
        let doc = annotate(text);
        let labels: Vec<(&str, &str)> = doc
            .entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("yesterday", "DATE"), ("Anna Smith", "PERSON"), ("Paris", "GPE")]
        );
        let chars: Vec<char> = text.chars().collect();
        for e in &doc.entities {
            assert!(e.start < e.end && e.end <= chars.len());
            let slice: String = chars[e.start..e.end].iter().collect();
            assert_eq!(slice, e.text);
        }
    }

    #[test]
    fn test_number_entities() {
        let doc = annotate("we sold 40 percent of 300 units in 2023");
        let labels: Vec<(&str, &str)> = doc
            .entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("40 percent", "PERCENT"), ("300", "CARDINAL"), ("2023", "DATE")]
        );
    }

    #[test]
    fn test_organization_entity() {
        let doc = annotate("she works at Google in London");
        assert!(doc.entities.iter().any(|e| e.text == "Google" && e.label == "ORG"));
        assert!(doc.entities.iter().any(|e| e.text == "London" && e.label == "GPE"));
    }

    #[test]
    fn test_lemmas() {
        let doc = annotate("the children were running and stopped making boxes");
        assert_eq!(token(&doc, "children").lemma, "child");
        assert_eq!(token(&doc, "were").lemma, "be");
        assert_eq!(token(&doc, "running").lemma, "run");
        assert_eq!(token(&doc, "stopped").lemma, "stop");
        assert_eq!(token(&doc, "making").lemma, "make");
        assert_eq!(token(&doc, "boxes").lemma, "box");
    }

    #[test]
    fn test_flags() {
        let doc = annotate("the cat , sat");
        assert!(token(&doc, "the").is_stop);
        assert!(!token(&doc, "cat").is_stop);
        assert!(token(&doc, ",").is_punct);
        assert!(token(&doc, "cat").is_alpha);
    }

    #[test]
    fn test_empty_text() {
        let doc = annotate("");
        assert!(doc.tokens.is_empty());
        assert!(doc.entities.is_empty());
    }
}
