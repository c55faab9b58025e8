//! Content-addressed identifiers for catalog entries.

use sha1::{Digest, Sha1};

use crate::types::Entry;

/// Returns the identifier of a source text: the SHA-1 digest of its UTF-8
/// bytes as 40 lowercase hex characters.
///
/// The same function names remote jobs (their slug) at submission time and
/// matches fetched translations back to entries, so identical source text
/// always correlates across runs.
pub fn identify(source: &str) -> String {
    format!("{:x}", Sha1::digest(source.as_bytes()))
}

/// Identifier of an entry, derived from its `msgid` only.
pub fn identify_entry(entry: &Entry) -> String {
    identify(&entry.msgid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(identify(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            identify("Hello world"),
            "7b502c3a1f48c8609ae212cdfb639dee39673f5e"
        );
    }

    #[test]
    fn test_distinct_sources_differ() {
        let a = Entry::new("To be translated", "");
        let b = Entry::new("Some other text", "");
        assert_ne!(identify_entry(&a), identify_entry(&b));
    }

    #[test]
    fn test_ignores_target_and_context() {
        let plain = Entry::new("Open", "");
        let mut translated = Entry::new("Open", "Öffnen");
        translated.msgctxt = Some("menu".to_string());
        assert_eq!(identify_entry(&plain), identify_entry(&translated));
    }
}
