// forensic-core/src/domain/text/normalizer.rs

/// Lowercases the input and collapses every whitespace run into a single space.
/// Leading and trailing whitespace is dropped.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(&word.to_lowercase());
    }

    normalized
}
