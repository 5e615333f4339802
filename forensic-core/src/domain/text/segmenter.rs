// forensic-core/src/domain/text/segmenter.rs

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Splits the original document text into trimmed, non-empty sentences.
/// Casing and inner punctuation are preserved so evidence can be displayed as written.
/// A run of terminators ("?!", "...") closes a single sentence: the empty
/// fragments between consecutive marks are dropped with the blank ones.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(String::from)
        .collect()
}
