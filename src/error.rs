//! All error types for the stringsheet crate.
//!
//! Every fallible conversion returns [`Error`]. A conversion either produces a
//! complete artifact or fails with one of these variants; there is no partial
//! output.

use thiserror::Error;

use crate::formats::Platform;

#[derive(Error, Debug)]
pub enum Error {
    /// The tabular source is missing required columns or the row range is invalid.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A platform file does not follow its grammar.
    #[error("malformed {platform} content: {message}")]
    MalformedFormat { platform: Platform, message: String },

    /// A key occurred twice while the duplicate policy is `Reject`.
    #[error("key conflict: `{0}` is defined more than once")]
    KeyConflict(String),

    /// A key cannot be represented on the target platform.
    #[error("invalid key `{key}` for {platform}")]
    InvalidKey { platform: Platform, key: String },

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new malformed input error.
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Error::MalformedInput(message.into())
    }

    /// Creates a new malformed format error for the given platform.
    pub fn malformed_format(platform: Platform, message: impl Into<String>) -> Self {
        Error::MalformedFormat {
            platform,
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::malformed_format(Platform::Android, err.to_string())
    }
}
