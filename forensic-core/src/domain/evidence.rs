// forensic-core/src/domain/evidence.rs

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::text::{PreparedDocument, normalize};

pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;
pub const WORD_BOUNDARY_CONFIDENCE: f64 = 0.9;
pub const SUBSTRING_CONFIDENCE: f64 = 0.7;
/// Lower bound of the confidence scale. Never produced once containment is established.
pub const MIN_CONFIDENCE: f64 = 0.5;

pub const DEFAULT_CONTEXT_RADIUS: usize = 1;

/// A located match of a search phrase in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub phrase: String,
    pub sentence: String,
    pub sentence_index: usize,
    /// The matched sentence plus its neighbours within the context radius.
    pub context: String,
    pub confidence: f64,
}

/// Finds phrase occurrences sentence by sentence and scores them.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceExtractor {
    context_radius: usize,
}

impl Default for EvidenceExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_RADIUS)
    }
}

impl EvidenceExtractor {
    pub fn new(context_radius: usize) -> Self {
        Self { context_radius }
    }

    pub fn context_radius(&self) -> usize {
        self.context_radius
    }

    /// Returns one Evidence per sentence containing `phrase` (case and spacing insensitive).
    pub fn find_matches(&self, phrase: &str, sentences: &[String]) -> Vec<Evidence> {
        let normalized: Vec<String> = sentences.iter().map(|s| normalize(s)).collect();
        self.scan(phrase, sentences, &normalized)
    }

    /// Same as `find_matches`, reusing the sentences normalized by the document.
    pub fn find_in_document(&self, phrase: &str, document: &PreparedDocument) -> Vec<Evidence> {
        self.scan(phrase, document.sentences(), document.normalized_sentences())
    }

    fn scan(&self, phrase: &str, sentences: &[String], normalized: &[String]) -> Vec<Evidence> {
        let needle = normalize(phrase);
        if needle.is_empty() {
            return vec![];
        }

        // Compiled once per phrase. A pattern the regex engine refuses only
        // costs the word-boundary tier: matches then score as substrings.
        let boundary = Regex::new(&format!(r"\b{}\b", regex::escape(&needle))).ok();

        let mut evidence = Vec::new();

        for (index, (sentence, haystack)) in sentences.iter().zip(normalized).enumerate() {
            if !haystack.contains(&needle) {
                continue;
            }

            let confidence = if *haystack == needle {
                EXACT_MATCH_CONFIDENCE
            } else if boundary.as_ref().is_some_and(|re| re.is_match(haystack)) {
                WORD_BOUNDARY_CONFIDENCE
            } else {
                SUBSTRING_CONFIDENCE
            };

            evidence.push(Evidence {
                phrase: phrase.to_string(),
                sentence: sentence.clone(),
                sentence_index: index,
                context: self.context_window(sentences, index),
                confidence,
            });
        }

        evidence
    }

    fn context_window(&self, sentences: &[String], index: usize) -> String {
        let start = index.saturating_sub(self.context_radius);
        let end = index
            .saturating_add(self.context_radius)
            .min(sentences.len().saturating_sub(1));

        sentences[start..=end].join(" ").trim().to_string()
    }
}
