// Sentence boundary matching on whitespace-normalized text.

use regex_automata::meta::Regex;
use std::sync::OnceLock;
use tracing::debug;

use super::normalization::normalize_whitespace;
use crate::error::AnalysisError;

/// Configuration for sentence boundary detection rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBoundaryRules {
    /// Characters that terminate a sentence
    pub end_punctuation: Vec<char>,
    /// Closing quotes and brackets that may trail the terminator and stay
    /// attached to the sentence they close
    pub closing_punctuation: Vec<char>,
}

impl Default for SentenceBoundaryRules {
    fn default() -> Self {
        Self {
            end_punctuation: vec!['.', '!', '?'],
            closing_punctuation: vec!['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '}'],
        }
    }
}

impl SentenceBoundaryRules {
    /// Build the boundary pattern: a run of terminators, optional closers, then
    /// whitespace or end of text. Boundaries never fall inside a token.
    fn pattern(&self) -> Result<String, AnalysisError> {
        if self.end_punctuation.is_empty() {
            return Err(AnalysisError::Boundary(
                "at least one end punctuation character is required".to_string(),
            ));
        }

        let terminators = character_class(&self.end_punctuation);
        let closers = if self.closing_punctuation.is_empty() {
            String::new()
        } else {
            format!("{}*", character_class(&self.closing_punctuation))
        };

        Ok(format!(r"{terminators}+{closers}(?:\s+|$)"))
    }
}

fn character_class(chars: &[char]) -> String {
    let mut class = String::from("[");
    for &ch in chars {
        if matches!(ch, '[' | ']' | '\\' | '^' | '-' | '&' | '~') {
            class.push('\\');
        }
        class.push(ch);
    }
    class.push(']');
    class
}

/// Compiled sentence splitter
#[derive(Debug)]
pub struct SentenceSplitter {
    boundary: Regex,
    rules: SentenceBoundaryRules,
}

impl SentenceSplitter {
    /// Compile custom boundary rules
    pub fn new(rules: SentenceBoundaryRules) -> Result<Self, AnalysisError> {
        let pattern = rules.pattern()?;
        let boundary =
            Regex::new(&pattern).map_err(|e| AnalysisError::Boundary(e.to_string()))?;
        debug!(%pattern, "Compiled sentence boundary pattern");
        Ok(Self { boundary, rules })
    }

    /// Splitter for `.`, `!` and `?` with the usual closing quotes and brackets
    pub fn with_default_rules() -> Result<Self, AnalysisError> {
        Self::new(SentenceBoundaryRules::default())
    }

    pub fn rules(&self) -> &SentenceBoundaryRules {
        &self.rules
    }

    /// Split text that is already whitespace-normalized, borrowing from it
    pub fn split_normalized<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.boundary.find_iter(normalized) {
            let sentence = normalized[start..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = boundary.end();
        }

        // Trailing text without a terminator is still a sentence
        let rest = normalized[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }

        sentences
    }

    /// Normalize whitespace and split into owned sentence strings
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        self.split_normalized(&normalized)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}

/// Process-wide splitter for the default rules
pub(crate) fn default_splitter() -> &'static SentenceSplitter {
    static SHARED_SPLITTER: OnceLock<SentenceSplitter> = OnceLock::new();
    SHARED_SPLITTER.get_or_init(|| {
        SentenceSplitter::with_default_rules()
            .expect("default sentence boundary rules always compile")
    })
}
