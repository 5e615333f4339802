// forensic-core/src/domain/text/mod.rs

pub mod normalizer;
pub mod segmenter;

pub use normalizer::normalize;
pub use segmenter::split_sentences;

/// A document ready for evaluation: segmented once, each sentence normalized once.
/// Shared read-only across every rule evaluated against the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    sentences: Vec<String>,
    normalized_sentences: Vec<String>,
}

impl PreparedDocument {
    pub fn new(text: &str) -> Self {
        let sentences = split_sentences(text);
        let normalized_sentences = sentences.iter().map(|s| normalize(s)).collect();
        Self {
            sentences,
            normalized_sentences,
        }
    }

    /// Sentences of the source text, in document order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// `sentences()` lowercased and whitespace-collapsed, index for index.
    pub fn normalized_sentences(&self) -> &[String] {
        &self.normalized_sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepared_document_keeps_both_views() {
        let doc = PreparedDocument::new("The Driver   was STOPPED. He was cautioned!");
        assert_eq!(doc.sentences(), ["The Driver   was STOPPED", "He was cautioned"]);
        assert_eq!(doc.normalized_sentences(), ["the driver was stopped", "he was cautioned"]);
        assert_eq!(doc.len(), 2);
        assert!(PreparedDocument::new(" ... ").is_empty());
    }
}
