//! Core catalog types.
//! The PO parser decodes into these; the PO writer serializes these.

use std::collections::BTreeMap;

/// Header key holding the id of an order that has not been merged back yet.
pub const PENDING_ORDER_KEY: &str = "gengo-order-id";

/// A gettext message catalog: header metadata plus an ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Comment lines attached to the header entry, kept verbatim (including the `#`).
    pub header_comments: Vec<String>,

    /// Header metadata (`Key: Value` lines of the header `msgstr`).
    pub metadata: Metadata,

    /// Ordered list of all entries, obsolete ones included.
    pub entries: Vec<Entry>,

    /// Comment lines after the last message, kept verbatim.
    pub trailing_comments: Vec<String>,
}

impl Catalog {
    /// Creates an empty catalog with no header.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Entries that are not obsolete, in file order.
    pub fn active_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.obsolete)
    }

    /// Mutable view of the entries that are not obsolete, in file order.
    pub fn active_entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut().filter(|e| !e.obsolete)
    }

    /// Finds the first active entry with the given source text.
    pub fn find_entry(&self, msgid: &str) -> Option<&Entry> {
        self.active_entries().find(|e| e.msgid == msgid)
    }

    /// Id of the submitted order awaiting merge, if any.
    pub fn pending_order(&self) -> Option<&str> {
        self.metadata
            .get(PENDING_ORDER_KEY)
            .filter(|id| !id.trim().is_empty())
    }

    pub fn set_pending_order(&mut self, order_id: impl Into<String>) {
        self.metadata.insert(PENDING_ORDER_KEY, order_id);
    }

    pub fn clear_pending_order(&mut self) -> Option<String> {
        self.metadata.remove(PENDING_ORDER_KEY)
    }

    /// Whether the catalog should be written with a header entry.
    pub(crate) fn has_header(&self) -> bool {
        !self.metadata.is_empty() || !self.header_comments.is_empty()
    }
}

/// Ordered string metadata of a catalog.
///
/// Keys keep their original position when overwritten; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// A single catalog message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Comment lines preceding the message, verbatim (`#`, `#.`, `#:`, `#,`, `#|`).
    pub comments: Vec<String>,

    /// Optional disambiguating context (`msgctxt`).
    pub msgctxt: Option<String>,

    /// Source text.
    pub msgid: String,

    /// Plural source text, present only for plural messages.
    pub msgid_plural: Option<String>,

    /// Target text of a singular message. Empty when untranslated.
    pub msgstr: String,

    /// Target texts of a plural message, keyed by plural index.
    pub msgstr_plural: BTreeMap<usize, String>,

    /// Whether the message was marked obsolete (`#~`).
    pub obsolete: bool,
}

impl Entry {
    /// Creates a singular entry with no comments.
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Entry {
            msgid: msgid.into(),
            msgstr: msgstr.into(),
            ..Default::default()
        }
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }
}
