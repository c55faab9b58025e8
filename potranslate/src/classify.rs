//! Predicates deciding which catalog entries are sent for translation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Entry;

lazy_static! {
    static ref LETTER_REGEX: Regex = Regex::new(r"\p{Alphabetic}").unwrap();
}

/// Inclusive bounds on the number of whitespace-separated words in a source
/// text. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordBounds {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl WordBounds {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Bounds that admit any word count.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min.is_none_or(|min| min <= count) && self.max.is_none_or(|max| count <= max)
    }
}

/// True if the source text is non-empty and contains at least one letter.
///
/// Whitespace-only and punctuation/number-only messages are never sent out.
pub fn is_translatable(entry: &Entry) -> bool {
    !entry.msgid.is_empty() && LETTER_REGEX.is_match(&entry.msgid)
}

/// True if the target text has any non-whitespace content.
pub fn is_translated(entry: &Entry) -> bool {
    !entry.msgstr.trim().is_empty()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True if the source word count lies within `bounds`.
pub fn fits_word_boundary(entry: &Entry, bounds: WordBounds) -> bool {
    bounds.contains(word_count(&entry.msgid))
}

/// An entry is eligible for submission if it is a singular message that is
/// translatable, not yet translated, and within the word bounds.
pub fn is_eligible(entry: &Entry, bounds: WordBounds) -> bool {
    !entry.obsolete
        && !entry.is_plural()
        && is_translatable(entry)
        && !is_translated(entry)
        && fits_word_boundary(entry, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> Entry {
        Entry::new(text, "")
    }

    fn target(text: &str) -> Entry {
        Entry::new("Source", text)
    }

    #[test]
    fn test_is_translatable() {
        assert!(!is_translatable(&source("")));
        assert!(!is_translatable(&source("   ")));
        assert!(!is_translatable(&source("%s: %d")));
        assert!(!is_translatable(&source("\n\t")));
        assert!(is_translatable(&source("Translatable")));
        assert!(is_translatable(&source("42 items")));
        assert!(is_translatable(&source("123\nabc")));
        assert!(is_translatable(&source("Grüße")));
    }

    #[test]
    fn test_is_translated() {
        assert!(!is_translated(&target("")));
        assert!(!is_translated(&target("   ")));
        assert!(!is_translated(&target("\n")));
        assert!(is_translated(&target("Translated text")));
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_fits_word_boundary() {
        let three = source("one two three");
        assert!(fits_word_boundary(&three, WordBounds::unbounded()));
        assert!(fits_word_boundary(&three, WordBounds::new(Some(3), None)));
        assert!(!fits_word_boundary(&three, WordBounds::new(Some(4), None)));
        assert!(fits_word_boundary(&three, WordBounds::new(None, Some(3))));
        assert!(!fits_word_boundary(&three, WordBounds::new(None, Some(2))));
        assert!(fits_word_boundary(&three, WordBounds::new(Some(1), Some(5))));
    }

    #[test]
    fn test_is_eligible() {
        let bounds = WordBounds::unbounded();
        assert!(is_eligible(&source("Hello world"), bounds));
        assert!(!is_eligible(&Entry::new("Hello world", "Hallo Welt"), bounds));
        assert!(!is_eligible(&source("..."), bounds));

        let mut plural = source("One file");
        plural.msgid_plural = Some("%d files".to_string());
        assert!(!is_eligible(&plural, bounds));

        let mut obsolete = source("Old");
        obsolete.obsolete = true;
        assert!(!is_eligible(&obsolete, bounds));
    }
}
