//! Traits for reading and writing catalog files.

use std::{
    borrow::Cow,
    io::{BufRead, Cursor, Read, Write},
    path::Path,
};

use encoding_rs::{Encoding, UTF_8};
use tempfile::NamedTempFile;

use crate::error::Error;

/// A trait for parsing a catalog from text and writing it back out.
///
/// # Example
///
/// ```rust,no_run
/// use potranslate::{Catalog, traits::Parser};
/// let catalog = Catalog::read_from("de.po")?;
/// catalog.write_to("de.po")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// See [`Parser::from_bytes`] for how the content is decoded.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path).map_err(Error::Io)?;
        Self::from_bytes(&bytes)
    }

    /// The character encoding `bytes` declare for themselves, if any.
    fn declared_encoding(_bytes: &[u8]) -> Option<&'static Encoding> {
        None
    }

    /// The character encoding used when writing to a file.
    fn output_encoding(&self) -> &'static Encoding {
        UTF_8
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    ///
    /// The content goes to a temporary file next to `path` first and is renamed
    /// over it once complete, so readers never observe a half-written file.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut utf8 = Vec::new();
        self.to_writer(&mut utf8)?;
        let bytes = encode(&utf8, self.output_encoding())?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        // Keep the permissions of the file being replaced.
        if let Ok(existing) = std::fs::metadata(path) {
            temp.as_file().set_permissions(existing.permissions())?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path)?;
        Ok(())
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    ///
    /// A leading byte-order mark wins, then the encoding the content declares
    /// for itself; otherwise the bytes must be UTF-8.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let declared = Self::declared_encoding(bytes).filter(|encoding| *encoding != UTF_8);
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(declared)
            .bom_override(true)
            .build(bytes);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// Re-encodes UTF-8 output, failing on characters `encoding` cannot represent.
fn encode<'a>(utf8: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, [u8]>, Error> {
    if encoding == UTF_8 {
        return Ok(Cow::Borrowed(utf8));
    }
    let text = std::str::from_utf8(utf8)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    let (bytes, _, unmappable) = encoding.encode(text);
    if unmappable {
        return Err(Error::Unencodable {
            charset: encoding.name(),
        });
    }
    Ok(Cow::Owned(bytes.into_owned()))
}
