//! Shared string matching helpers for the rule tables.
//!
//! Every table in this crate stores lowercase terms without apostrophes and
//! matches them against text prepared by [`fold`].

/// Lowercases and drops apostrophes so `"Sam's Club"` and `"Sams Club"` compare equal.
#[must_use]
pub(crate) fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits folded text into alphanumeric tokens.
#[must_use]
pub(crate) fn tokens(folded: &str) -> Vec<&str> {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// `true` if `term` occurs in `folded` with no alphanumeric character
/// directly before or after it.
///
/// `term` may span several words (`"screen protector"`) or carry
/// punctuation (`"b&h"`).
#[must_use]
pub(crate) fn contains_term(folded: &str, term: &str) -> bool {
    find_term(folded, term).is_some()
}

/// Byte offset of the first word-bounded occurrence of `term`.
#[must_use]
pub(crate) fn find_term(folded: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    folded
        .match_indices(term)
        .map(|(start, _)| start)
        .find(|&start| {
            let end = start + term.len();
            let before_ok = folded[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric());
            let after_ok = folded[end..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric());
            before_ok && after_ok
        })
}

/// `true` if any of `terms` passes [`contains_term`].
#[must_use]
pub(crate) fn contains_any<S: AsRef<str>>(folded: &str, terms: &[S]) -> bool {
    terms.iter().any(|t| contains_term(folded, t.as_ref()))
}

/// `true` if `folded` starts with `prefix` followed by a non-alphanumeric
/// character or the end of the string.
#[must_use]
pub(crate) fn starts_with_term(folded: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && folded.starts_with(prefix)
        && folded[prefix.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric())
}

/// Lowercase label with punctuation removed and whitespace collapsed.
#[must_use]
pub(crate) fn strip_punctuation(text: &str) -> String {
    let cleaned: String = fold(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_term_skips_partial_words() {
        assert_eq!(find_term("remote for tv remote", "remote"), Some(0));
        assert_eq!(find_term("remotes and a remote", "remote"), Some(14));
        assert_eq!(find_term("anything", ""), None);
    }

    #[test]
    fn fold_drops_apostrophes() {
        assert_eq!(fold("Sam's Club"), "sams club");
        assert_eq!(fold("Kohl\u{2019}s"), "kohls");
    }

    #[test]
    fn tokens_split_on_punctuation() {
        assert_eq!(tokens("iphone 17 pro-max, 256gb"), vec!["iphone", "17", "pro", "max", "256gb"]);
    }

    #[test]
    fn contains_term_respects_word_boundaries() {
        assert!(contains_term("walmart - seller x", "walmart"));
        assert!(contains_term("walmart.com", "walmart"));
        assert!(!contains_term("pineapple slices", "apple"));
        assert!(!contains_term("showcase", "case"));
        assert!(contains_term("tempered glass screen protector", "screen protector"));
    }

    #[test]
    fn contains_term_handles_symbols() {
        assert!(contains_term("b&h photo-video", "b&h"));
        assert!(contains_term("at&t", "at&t"));
    }

    #[test]
    fn starts_with_term_requires_boundary() {
        assert!(starts_with_term("ebay - techdeals", "ebay"));
        assert!(starts_with_term("bestbuy.com", "bestbuy"));
        assert!(!starts_with_term("targeted deals", "target"));
    }

    #[test]
    fn strip_punctuation_collapses_whitespace() {
        assert_eq!(strip_punctuation("  Joe's   Gadgets!! "), "joes gadgets");
        assert_eq!(strip_punctuation("***"), "");
    }
}
