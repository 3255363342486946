//! Support for Apple `.strings` localization format.
//!
//! One `"KEY" = "VALUE";` pair per line. `//` line comments and `/* */` block
//! comments are skipped; any other content is a syntax error.

use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    formats::Platform,
    options::ParseOptions,
    traits::{Parser, PlatformFormat},
    types::{ResourceSet, StringEntry},
};

lazy_static! {
    static ref PAIR_PATTERN: Regex = Regex::new(
        r#"^"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;(.*)$"#
    )
    .unwrap();
}

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub pairs: Vec<Pair>,
}

/// A single key-value pair, stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut pairs = Vec::new();
        let mut in_comment = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            let rest = skip_comments(line.trim(), &mut in_comment);
            if rest.is_empty() {
                continue;
            }

            let caps = PAIR_PATTERN.captures(rest).ok_or_else(|| {
                Error::malformed_format(
                    Platform::Ios,
                    format!("line {line_no}: expected `\"KEY\" = \"VALUE\";`, found `{rest}`"),
                )
            })?;
            let trailing = skip_comments(&caps[3], &mut in_comment);
            if !trailing.is_empty() {
                return Err(Error::malformed_format(
                    Platform::Ios,
                    format!("line {line_no}: unexpected `{trailing}` after `;`"),
                ));
            }
            pairs.push(Pair {
                key: unescape(&caps[1]),
                value: unescape(&caps[2]),
            });
        }

        if in_comment {
            return Err(Error::malformed_format(
                Platform::Ios,
                "unterminated block comment",
            ));
        }

        Ok(Format { pairs })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for pair in &self.pairs {
            content.push_str(&pair.to_string());
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// Skips leading block and line comments, tracking whether a block comment
/// is still open at the end of the line. Returns the remaining content.
fn skip_comments<'a>(mut text: &'a str, in_comment: &mut bool) -> &'a str {
    loop {
        text = text.trim_start();
        if *in_comment {
            match text.find("*/") {
                Some(end) => {
                    text = &text[end + 2..];
                    *in_comment = false;
                }
                None => return "",
            }
            continue;
        }
        if text.starts_with("//") {
            return "";
        }
        match text.strip_prefix("/*") {
            Some(after) => {
                *in_comment = true;
                text = after;
            }
            None => return text,
        }
    }
}

impl PlatformFormat for Format {
    const PLATFORM: Platform = Platform::Ios;

    fn from_resource_set(set: &ResourceSet, locale: Option<&str>) -> Result<Self, Error> {
        let mut pairs = Vec::with_capacity(set.len());
        for entry in set {
            if entry.key.is_empty() {
                return Err(Error::InvalidKey {
                    platform: Platform::Ios,
                    key: entry.key.clone(),
                });
            }
            match entry.resolve(locale) {
                Some(value) => pairs.push(Pair {
                    key: entry.key.clone(),
                    value: value.to_string(),
                }),
                None => tracing::trace!(key = %entry.key, ?locale, "no value, entry omitted"),
            }
        }
        Ok(Format { pairs })
    }

    fn into_resource_set(self, options: ParseOptions) -> Result<ResourceSet, Error> {
        let mut set = ResourceSet::new();
        for pair in self.pairs {
            set.insert(StringEntry::new(pair.key, pair.value), options.duplicates)?;
        }
        Ok(set)
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", escape(&self.key), escape(&self.value))
    }
}

/// Escapes a key or value for use between double quotes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\n' => out.push_str(r"\n"),
            c => out.push(c),
        }
    }
    out
}

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
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
