//! Stateless text analysis: whitespace normalization, sentence splitting,
//! word statistics and focus-letter computation.
//!
//! Every function here is pure. Results are deterministic for a given input
//! and the default [`SentenceBoundaryRules`].

use serde::Serialize;
use std::time::Duration;

pub mod boundaries;
pub mod focus;
pub mod normalization;

pub use boundaries::{SentenceBoundaryRules, SentenceSplitter};
pub use focus::{get_focus_letter_index, orp_for_length};
pub use normalization::{normalize_whitespace, normalize_whitespace_into, token_count};

use crate::error::AnalysisError;

/// A whitespace-delimited token with its precomputed focus point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub text: String,
    /// Length in characters
    pub length: usize,
    /// 0-based character index of the focus letter
    pub focus_index: usize,
    pub focus_letter: char,
}

impl Word {
    pub fn new(text: &str) -> Result<Self, AnalysisError> {
        let (focus_index, focus_letter) = get_focus_letter_index(text)?;
        Ok(Self {
            text: text.to_owned(),
            length: text.chars().count(),
            focus_index,
            focus_letter,
        })
    }

    /// Text before the focus letter, the focus letter, and the text after it
    pub fn split_at_focus(&self) -> (&str, char, &str) {
        let mut indices = self.text.char_indices().skip(self.focus_index);
        // focus_index < length, so the focus character always exists
        let (start, letter) = indices.next().unwrap_or((0, self.focus_letter));
        let end = start + letter.len_utf8();
        (&self.text[..start], letter, &self.text[end..])
    }

    /// True when the token closes a sentence
    pub fn ends_sentence(&self) -> bool {
        self.text
            .trim_end_matches(|c: char| matches!(c, '"' | '\'' | '\u{201D}' | '\u{2019}' | ')' | ']' | '}'))
            .ends_with(['.', '!', '?'])
    }
}

/// A sentence and its words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<Word>,
}

impl Sentence {
    pub fn new(text: &str) -> Result<Self, AnalysisError> {
        let words = text
            .split_whitespace()
            .map(Word::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: text.to_owned(),
            words,
        })
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Per-sentence record returned by [`analyze_text`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceAnalysis {
    pub sentence_text: String,
    pub word_count: usize,
}

/// Aggregate statistics over a whole text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub sentence_count: usize,
    pub word_count: usize,
    pub average_words_per_sentence: f64,
    /// Mean length in characters, punctuation included
    pub average_word_length: f64,
    pub longest_word: Option<String>,
}

impl TextSummary {
    /// Playback time for every word at `wpm`, or `None` for a non-positive speed
    pub fn estimated_duration(&self, wpm: f64) -> Option<Duration> {
        if !wpm.is_finite() || wpm <= 0.0 {
            return None;
        }
        Some(playback_duration(self.word_count, wpm))
    }
}

/// Time to show `words` words at `wpm`, rounded to the nanosecond and
/// saturating for absurdly slow speeds. `wpm` must be positive.
pub fn playback_duration(words: usize, wpm: f64) -> Duration {
    let nanos = (words as f64 * 60_000_000_000.0 / wpm).round();
    Duration::from_nanos(nanos as u64)
}

/// Normalize whitespace and split on `.`, `!` and `?`, keeping terminators
/// (and any closing quote or bracket after them) attached.
///
/// Returns an empty vector for empty or whitespace-only input and a single
/// sentence when no terminator is present.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    boundaries::default_splitter().split(text)
}

/// Sentence text and whitespace-token count for every sentence
pub fn analyze_text(text: &str) -> Vec<SentenceAnalysis> {
    split_into_sentences(text)
        .into_iter()
        .map(|sentence_text| SentenceAnalysis {
            word_count: token_count(&sentence_text),
            sentence_text,
        })
        .collect()
}

/// Split into sentences and compute every word's focus point
pub fn segment(text: &str) -> Result<Vec<Sentence>, AnalysisError> {
    let normalized = normalize_whitespace(text);
    boundaries::default_splitter()
        .split_normalized(&normalized)
        .into_iter()
        .map(Sentence::new)
        .collect()
}

/// Everything the analyzer knows about a text, ready for JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    pub sentences: Vec<SentenceAnalysis>,
    pub words: Vec<Word>,
    pub summary: TextSummary,
    pub wpm: f64,
    pub estimated_seconds: Option<f64>,
}

pub fn report(text: &str, wpm: f64) -> Result<TextReport, AnalysisError> {
    let words = segment(text)?
        .into_iter()
        .flat_map(|sentence| sentence.words)
        .collect();
    let summary = summarize(text);
    let estimated_seconds = summary.estimated_duration(wpm).map(|d| d.as_secs_f64());

    Ok(TextReport {
        sentences: analyze_text(text),
        words,
        summary,
        wpm,
        estimated_seconds,
    })
}

pub fn summarize(text: &str) -> TextSummary {
    let analysis = analyze_text(text);
    let sentence_count = analysis.len();
    let word_count: usize = analysis.iter().map(|s| s.word_count).sum();

    let mut total_chars = 0usize;
    let mut longest: Option<&str> = None;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        total_chars += len;
        if longest.map_or(true, |current| len > current.chars().count()) {
            longest = Some(word);
        }
    }

    let ratio = |numerator: usize, denominator: usize| {
        if denominator == 0 {
            0.0
        } else {
            numerator as f64 / denominator as f64
        }
    };

    TextSummary {
        sentence_count,
        word_count,
        average_words_per_sentence: ratio(word_count, sentence_count),
        average_word_length: ratio(total_chars, word_count),
        longest_word: longest.map(str::to_owned),
    }
}
