//! Support for the gettext `.po` catalog format.
//!
//! Provides parsing into and serialization from the [`Catalog`] model. The
//! header entry (`msgid ""`) is turned into ordered [`Metadata`]; comment lines
//! are carried verbatim so a load/save cycle does not lose translator notes,
//! references or flags. Obsolete (`#~`) messages are kept and written back.

use std::io::{BufRead, Write};

use encoding_rs::{Encoding, UTF_8};

use crate::{
    error::Error,
    traits::Parser,
    types::{Catalog, Entry, Metadata},
};

const OBSOLETE_PREFIX: &str = "#~ ";
const CHARSET_PARAM: &[u8] = b"charset=";

impl Parser for Catalog {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut state = ReadState::default();
        let mut last_line = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            last_line = index + 1;
            state.feed(last_line, &line)?;
        }

        state.finish(last_line)
    }

    /// The `charset=` of the header's `Content-Type`, looked up in the
    /// first block of the file only.
    fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
        let header = bytes
            .windows(2)
            .position(|pair| pair == b"\n\n")
            .map_or(bytes, |end| &bytes[..end]);
        declared_charset(header).and_then(Encoding::for_label)
    }

    fn output_encoding(&self) -> &'static Encoding {
        self.metadata
            .get("Content-Type")
            .and_then(|content_type| declared_charset(content_type.as_bytes()))
            .and_then(Encoding::for_label)
            .map(Encoding::output_encoding)
            .unwrap_or(UTF_8)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        let mut first = true;

        if self.has_header() {
            for comment in &self.header_comments {
                content.push_str(comment);
                content.push('\n');
            }
            let header: String = self
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}: {value}\n"))
                .collect();
            push_field(&mut content, "", "msgid", "");
            push_field(&mut content, "", "msgstr", &header);
            first = false;
        }

        for entry in &self.entries {
            if !first {
                content.push('\n');
            }
            first = false;
            push_entry(&mut content, entry);
        }

        if !self.trailing_comments.is_empty() {
            if !first {
                content.push('\n');
            }
            for comment in &self.trailing_comments {
                content.push_str(comment);
                content.push('\n');
            }
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// The keyword a continuation string line appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    MsgstrPlural(usize),
}

#[derive(Debug, Default)]
struct Pending {
    entry: Entry,
    started: bool,
    has_msgid: bool,
    field: Option<Field>,
}

#[derive(Debug, Default)]
struct ReadState {
    catalog: Catalog,
    pending: Pending,
    header_seen: bool,
}

impl ReadState {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), Error> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return self.flush(line_no);
        }

        let (obsolete, body) = match trimmed.strip_prefix("#~") {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        if obsolete && body.is_empty() {
            return self.flush(line_no);
        }

        // Plain comments and obsolete previous-msgid lines (`#~|`).
        if (!obsolete && body.starts_with('#')) || (obsolete && body.starts_with('|')) {
            if self.pending.started {
                self.flush(line_no)?;
            }
            self.pending.entry.comments.push(trimmed.to_string());
            return Ok(());
        }

        if body.starts_with('"') {
            let value = unquote(body, line_no)?;
            return match self.pending.field {
                Some(field) => {
                    self.field_mut(field).push_str(&value);
                    Ok(())
                }
                None => Err(Error::syntax(
                    line_no,
                    "string continuation without a preceding keyword",
                )),
            };
        }

        let (keyword, rest) = body
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::syntax(line_no, format!("unexpected line `{body}`")))?;
        let value = unquote(rest.trim(), line_no)?;

        let field = match keyword {
            "msgctxt" => {
                if self.pending.started {
                    self.flush(line_no)?;
                }
                self.pending.entry.msgctxt = Some(String::new());
                Field::Msgctxt
            }
            "msgid" => {
                if self.pending.has_msgid {
                    self.flush(line_no)?;
                }
                self.pending.has_msgid = true;
                Field::Msgid
            }
            "msgid_plural" => {
                self.pending.entry.msgid_plural = Some(String::new());
                Field::MsgidPlural
            }
            "msgstr" => Field::Msgstr,
            other => match other
                .strip_prefix("msgstr[")
                .and_then(|s| s.strip_suffix(']'))
                .and_then(|index| index.parse::<usize>().ok())
            {
                Some(index) => Field::MsgstrPlural(index),
                None => {
                    return Err(Error::syntax(
                        line_no,
                        format!("unknown keyword `{other}`"),
                    ));
                }
            },
        };

        if obsolete {
            self.pending.entry.obsolete = true;
        }
        self.pending.started = true;
        self.pending.field = Some(field);
        let slot = self.field_mut(field);
        slot.clear();
        slot.push_str(&value);
        Ok(())
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        let entry = &mut self.pending.entry;
        match field {
            Field::Msgctxt => entry.msgctxt.get_or_insert_with(String::new),
            Field::Msgid => &mut entry.msgid,
            Field::MsgidPlural => entry.msgid_plural.get_or_insert_with(String::new),
            Field::Msgstr => &mut entry.msgstr,
            Field::MsgstrPlural(index) => entry.msgstr_plural.entry(index).or_default(),
        }
    }

    /// Completes the pending entry, if any keyword has been seen.
    ///
    /// Comment lines that are not yet followed by a keyword stay pending so
    /// they attach to the next message.
    fn flush(&mut self, line_no: usize) -> Result<(), Error> {
        if !self.pending.started {
            return Ok(());
        }
        if !self.pending.has_msgid {
            return Err(Error::syntax(line_no, "message without `msgid`"));
        }

        let entry = std::mem::take(&mut self.pending).entry;
        let is_header = !self.header_seen
            && self.catalog.entries.is_empty()
            && entry.msgid.is_empty()
            && entry.msgctxt.is_none()
            && !entry.obsolete;

        if is_header {
            self.header_seen = true;
            self.catalog.header_comments = entry.comments;
            self.catalog.metadata = parse_metadata(&entry.msgstr);
        } else {
            self.catalog.add_entry(entry);
        }
        Ok(())
    }

    fn finish(mut self, last_line: usize) -> Result<Catalog, Error> {
        self.flush(last_line)?;
        self.catalog.trailing_comments = self.pending.entry.comments;
        Ok(self.catalog)
    }
}

/// Finds the first `charset=` value in `bytes`, e.g. `ISO-8859-1`.
fn declared_charset(bytes: &[u8]) -> Option<&[u8]> {
    let start = bytes
        .windows(CHARSET_PARAM.len())
        .position(|window| window.eq_ignore_ascii_case(CHARSET_PARAM))?
        + CHARSET_PARAM.len();
    let rest = &bytes[start..];
    let end = rest
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || b"-_.:".contains(b)))
        .unwrap_or(rest.len());
    Some(&rest[..end]).filter(|label| !label.is_empty())
}

fn parse_metadata(header: &str) -> Metadata {
    header
        .split('\n')
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

fn unquote(raw: &str, line_no: usize) -> Result<String, Error> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| Error::syntax(line_no, format!("expected a quoted string, found `{raw}`")))?;
    unescape(inner, line_no)
}

fn unescape(inner: &str, line_no: usize) -> Result<String, Error> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err(Error::syntax(line_no, "unterminated escape sequence")),
        }
    }

    Ok(out)
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '\r' => out.push_str(r"\r"),
            '\u{7}' => out.push_str(r"\a"),
            '\u{8}' => out.push_str(r"\b"),
            '\u{c}' => out.push_str(r"\f"),
            '\u{b}' => out.push_str(r"\v"),
            other => out.push(other),
        }
    }
    out
}

/// Writes `keyword "value"`, splitting values with line breaks over several
/// quoted lines the way gettext tools do.
fn push_field(content: &mut String, prefix: &str, keyword: &str, value: &str) {
    if value.contains('\n') {
        content.push_str(&format!("{prefix}{keyword} \"\"\n"));
        for segment in value.split_inclusive('\n') {
            content.push_str(&format!("{prefix}\"{}\"\n", escape(segment)));
        }
    } else {
        content.push_str(&format!("{prefix}{keyword} \"{}\"\n", escape(value)));
    }
}

fn push_entry(content: &mut String, entry: &Entry) {
    for comment in &entry.comments {
        content.push_str(comment);
        content.push('\n');
    }

    let prefix = if entry.obsolete { OBSOLETE_PREFIX } else { "" };

    if let Some(msgctxt) = &entry.msgctxt {
        push_field(content, prefix, "msgctxt", msgctxt);
    }
    push_field(content, prefix, "msgid", &entry.msgid);

    match &entry.msgid_plural {
        Some(plural) => {
            push_field(content, prefix, "msgid_plural", plural);
            if entry.msgstr_plural.is_empty() {
                push_field(content, prefix, "msgstr[0]", "");
            }
            for (index, value) in &entry.msgstr_plural {
                push_field(content, prefix, &format!("msgstr[{index}]"), value);
            }
        }
        None => push_field(content, prefix, "msgstr", &entry.msgstr),
    }
}
