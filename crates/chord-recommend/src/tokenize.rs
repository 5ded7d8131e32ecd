//! Lexical tokenizer: lowercase word tokens split at non-word boundaries.

/// Split free text into normalized word tokens. Word characters are
/// alphanumerics plus underscore; everything else is a boundary. Empty
/// tokens are discarded.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}
