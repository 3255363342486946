#![forbid(unsafe_code)]
//! Localization spreadsheets to Android and Apple string resources, and back.
//!
//! A base sheet (`string_name`, `english_value`) and an optional translation
//! sheet (`english_value` followed by one column per locale) are read into a
//! [`ResourceSet`], which is then serialized as Android `strings.xml` or
//! Apple `.strings`. Platform files can also be parsed back and written out
//! as a CSV sheet.
//!
//! # Quick Start
//!
//! ```rust
//! use stringsheet::{Mode, Platform, RowRange, codec, sheet};
//!
//! let base = sheet::rows_from_csv(b"string_name,english_value\nhello,Hello\nbye,Bye\n")?;
//! let translations = sheet::rows_from_csv(b"id,english_value,fr\n1,Hello,Bonjour\n")?;
//!
//! let set = sheet::read(&base, Some(RowRange::new(0, 1)), Mode::Base)?;
//! let set = sheet::read(&translations, None, Mode::Translations(set))?;
//!
//! let xml = codec::generate(&set, Platform::Android, Some("fr"))?;
//! assert!(String::from_utf8(xml)?.contains(r#"<string name="hello">Bonjour</string>"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod options;
pub mod traits;
pub mod types;

pub use formats::sheet;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{GeneratedFile, generate, generate_all, infer_platform, output_path, to_sheet},
    error::Error,
    formats::{
        Platform,
        sheet::{Mode, RowRange, SheetReader},
    },
    options::{DuplicatePolicy, EmptyCells, ParseOptions, ReadOptions},
    types::{ResourceSet, StringEntry, Translations},
};
