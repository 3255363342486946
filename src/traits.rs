//! Traits for platform-agnostic parsing and serialization in stringsheet.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Cursor, ErrorKind, Read, Write},
    path::Path,
};

use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::{error::Error, formats::Platform, options::ParseOptions, types::ResourceSet};

/// A trait for parsing and writing one platform file.
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::traits::Parser;
/// let format = stringsheet::formats::strings::Format::read_from("en.lproj/Localizable.strings")?;
/// format.write_to("Localizable.copy.strings")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from raw bytes, honoring a UTF-8 or UTF-16 byte order mark.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let decoded = decode_bytes(bytes)?;
        Self::from_str(&decoded)
    }

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }
}

/// A platform file format that can be built from, and turned into, a [`ResourceSet`].
pub trait PlatformFormat: Parser + Sized {
    const PLATFORM: Platform;

    /// Selects the value of every entry for `locale` (falling back to the
    /// default value) and validates keys for this platform.
    fn from_resource_set(set: &ResourceSet, locale: Option<&str>) -> Result<Self, Error>;

    fn into_resource_set(self, options: ParseOptions) -> Result<ResourceSet, Error>;

    /// Serializes `set` into this platform's text format.
    fn serialize(set: &ResourceSet, locale: Option<&str>) -> Result<String, Error> {
        let mut out = Vec::new();
        Self::from_resource_set(set, locale)?.to_writer(&mut out)?;
        String::from_utf8(out)
            .map_err(|e| Error::malformed_format(Self::PLATFORM, e.to_string()))
    }

    /// Parses text with the default options (last occurrence of a key wins).
    fn parse(text: &str) -> Result<ResourceSet, Error> {
        Self::parse_with(text, ParseOptions::default())
    }

    fn parse_with(text: &str, options: ParseOptions) -> Result<ResourceSet, Error> {
        Self::from_str(text)?.into_resource_set(options)
    }

    /// Parses raw bytes. Bytes that do not decode as text are a format error.
    fn parse_bytes(bytes: &[u8], options: ParseOptions) -> Result<ResourceSet, Error> {
        let text = decode_bytes(bytes).map_err(|e| match e {
            Error::Io(e) if e.kind() == ErrorKind::InvalidData => {
                Error::malformed_format(Self::PLATFORM, format!("invalid text encoding: {e}"))
            }
            e => e,
        })?;
        Self::parse_with(&text, options)
    }
}

/// Decodes bytes to UTF-8, transcoding from UTF-16 when a BOM says so.
pub(crate) fn decode_bytes(bytes: &[u8]) -> Result<String, Error> {
    let mut decoder = DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .strip_bom(true)
        .build(bytes);
    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}
