//! Support for Android `strings.xml` localization format.
//!
//! Only `<string>` elements directly under `<resources>` are read; other
//! elements (`<plurals>`, `<string-array>`, comments) are skipped. Values are
//! stored unescaped in the model and escaped again on output.

use lazy_static::lazy_static;
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use regex::Regex;
use serde::Serialize;
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    formats::Platform,
    options::ParseOptions,
    traits::{Parser, PlatformFormat},
    types::{ResourceSet, StringEntry},
};

lazy_static! {
    static ref KEY_PATTERN: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Returns whether `key` can be used as a `<string name>`.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

#[derive(Debug, Default, Serialize)]
pub struct Format {
    pub strings: Vec<StringResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringResource {
    pub name: String,
    /// Unescaped value.
    pub value: String,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if depth == 1 && e.name().as_ref() == b"string" => {
                    let name = string_name(e)?;
                    let raw = read_string_text(&mut xml_reader)?;
                    strings.push(StringResource {
                        name,
                        value: unescape(&raw),
                    });
                }
                Event::Empty(ref e) if depth == 1 && e.name().as_ref() == b"string" => {
                    strings.push(StringResource {
                        name: string_name(e)?,
                        value: String::new(),
                    });
                }
                Event::Start(ref e) => {
                    if depth == 0 {
                        expect_root(e, saw_root)?;
                        saw_root = true;
                    }
                    depth += 1;
                }
                Event::Empty(ref e) if depth == 0 => {
                    expect_root(e, saw_root)?;
                    saw_root = true;
                }
                Event::End(ref e) => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        Error::malformed_format(
                            Platform::Android,
                            format!(
                                "unexpected closing tag </{}>",
                                String::from_utf8_lossy(e.name().as_ref())
                            ),
                        )
                    })?;
                }
                Event::Text(ref e) if depth == 0 => {
                    if !e.iter().all(u8::is_ascii_whitespace) {
                        return Err(Error::malformed_format(
                            Platform::Android,
                            "text outside of <resources>",
                        ));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(Error::malformed_format(
                Platform::Android,
                "unexpected end of file: unclosed element",
            ));
        }
        if !saw_root {
            return Err(Error::malformed_format(
                Platform::Android,
                "missing root element <resources>",
            ));
        }

        Ok(Format { strings })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for sr in &self.strings {
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));

            xml_writer.write_event(Event::Text(BytesText::new("    ")))?;
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::from_escaped(escape(&sr.value))))?;
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

impl PlatformFormat for Format {
    const PLATFORM: Platform = Platform::Android;

    fn from_resource_set(set: &ResourceSet, locale: Option<&str>) -> Result<Self, Error> {
        let mut strings = Vec::with_capacity(set.len());
        for entry in set {
            if !is_valid_key(&entry.key) {
                return Err(Error::InvalidKey {
                    platform: Platform::Android,
                    key: entry.key.clone(),
                });
            }
            match entry.resolve(locale) {
                Some(value) => strings.push(StringResource {
                    name: entry.key.clone(),
                    value: value.to_string(),
                }),
                None => tracing::trace!(key = %entry.key, ?locale, "no value, entry omitted"),
            }
        }
        Ok(Format { strings })
    }

    fn into_resource_set(self, options: ParseOptions) -> Result<ResourceSet, Error> {
        let mut set = ResourceSet::new();
        for sr in self.strings {
            set.insert(StringEntry::new(sr.name, sr.value), options.duplicates)?;
        }
        Ok(set)
    }
}

/// Escapes a value for the text content of a `<string>` element.
///
/// XML metacharacters become entities; quotes, apostrophes, backslashes and
/// newlines get the backslash escapes Android's resource compiler expects.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + value.len() / 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\'' => out.push_str(r"\'"),
            '\n' => out.push_str(r"\n"),
            c => out.push(c),
        }
    }
    out
}

/// Reverses the backslash escapes of a `<string>` value whose XML entities
/// have already been decoded.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match decode_unicode_escape(&hex) {
                    Some(decoded) => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    None => out.push('u'),
                }
            }
            // \\ \" \' \@ \? and anything unknown: drop the backslash.
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn decode_unicode_escape(hex: &str) -> Option<char> {
    if hex.len() != 4 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

fn expect_root(e: &BytesStart, saw_root: bool) -> Result<(), Error> {
    if saw_root {
        return Err(Error::malformed_format(
            Platform::Android,
            "more than one root element",
        ));
    }
    if e.name().as_ref() != b"resources" {
        return Err(Error::malformed_format(
            Platform::Android,
            format!(
                "expected root element <resources>, found <{}>",
                String::from_utf8_lossy(e.name().as_ref())
            ),
        ));
    }
    Ok(())
}

fn string_name(e: &BytesStart) -> Result<String, Error> {
    let mut name = None;
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::malformed_format(Platform::Android, e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            name = Some(attr.unescape_value()?.to_string());
        }
    }
    name.ok_or_else(|| Error::malformed_format(Platform::Android, "string tag missing 'name'"))
}

/// Collects the character data of a `<string>` element up to its closing tag.
/// Markup nested inside the element is dropped; its text is kept.
fn read_string_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => {
                let data = std::str::from_utf8(&e)
                    .map_err(|e| Error::malformed_format(Platform::Android, e.to_string()))?;
                text.push_str(data);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::malformed_format(
                    Platform::Android,
                    "unexpected end of file inside <string>",
                ));
            }
            _ => (),
        }
        buf.clear();
    }
    Ok(text)
}
