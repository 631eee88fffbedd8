//! Emoji extraction over extended grapheme clusters
//!
//! A cluster is an emoji when it holds a code point with default emoji
//! presentation, a pictograph followed by the emoji selector U+FE0F, a
//! regional-indicator flag pair, or a keycap sequence. Text-default symbols
//! such as ©, ™ or a bare ❤ only count with the selector. Skin-tone and ZWJ
//! sequences stay whole.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::frequency::FrequencyCounter;
use super::types::EmojiCount;

const KEYCAP: char = '\u{20E3}';

lazy_static! {
    static ref EMOJI_PRESENTATION: Regex =
        Regex::new(r"\p{Emoji_Presentation}").expect("valid presentation pattern");
    static ref SELECTED_PICTOGRAPH: Regex =
        Regex::new(r"\p{Extended_Pictographic}\x{FE0F}").expect("valid pictograph pattern");
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Whether one grapheme cluster is an emoji
pub fn is_emoji_grapheme(grapheme: &str) -> bool {
    // Plain ASCII (including '#', '*' and digits without a keycap) never is
    if grapheme.is_ascii() {
        return false;
    }
    if grapheme.contains(KEYCAP) {
        return true;
    }
    match grapheme.chars().filter(|c| is_regional_indicator(*c)).count() {
        2 => return true,
        // a lone indicator letter is not a flag
        1 if grapheme.chars().count() == 1 => return false,
        _ => {}
    }
    EMOJI_PRESENTATION.is_match(grapheme) || SELECTED_PICTOGRAPH.is_match(grapheme)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiMatcher;

impl EmojiMatcher {
    pub const fn new() -> Self {
        Self
    }

    /// Distinct emoji with counts, descending, ties in first-seen order
    pub fn extract(&self, text: &str) -> Vec<EmojiCount> {
        let counter: FrequencyCounter = text
            .graphemes(true)
            .filter(|g| is_emoji_grapheme(g))
            .collect();
        counter
            .most_common(None)
            .into_iter()
            .map(|(emoji, count)| EmojiCount { emoji, count })
            .collect()
    }
}
