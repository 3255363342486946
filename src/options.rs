//! Options controlling how tabular sources and platform files are read into a `ResourceSet`.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a key that appears more than once is resolved.
///
/// The same policy type is applied by the Android parser, the iOS parser and
/// the tabular reader. The surviving entry always keeps the position of the
/// first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one.
    #[default]
    LastWins,
    /// The later definition is dropped.
    FirstWins,
    /// The conversion fails with [`Error::KeyConflict`].
    Reject,
}

/// Outcome of applying a [`DuplicatePolicy`] to a repeated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    KeepExisting,
    Replace,
}

impl DuplicatePolicy {
    /// Decides what to do with a second definition of `key`.
    pub fn resolve(self, key: &str) -> Result<Resolution, Error> {
        tracing::debug!(key, policy = ?self, "duplicate key");
        match self {
            DuplicatePolicy::LastWins => Ok(Resolution::Replace),
            DuplicatePolicy::FirstWins => Ok(Resolution::KeepExisting),
            DuplicatePolicy::Reject => Err(Error::KeyConflict(key.to_string())),
        }
    }
}

/// What an empty (after trimming) spreadsheet cell means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyCells {
    /// An empty cell is "no value"; the entry falls back to the default language.
    #[default]
    Absent,
    /// An empty cell is an explicit empty string and is emitted as such.
    Preserve,
}

/// Read behavior options for the tabular reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReadOptions {
    pub empty_cells: EmptyCells,
    /// Repeated `string_name` keys in a base sheet.
    pub duplicates: DuplicatePolicy,
    /// Repeated English values in a translation sheet. The first matching
    /// row is used unless configured otherwise.
    pub repeated_translations: DuplicatePolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            empty_cells: EmptyCells::default(),
            duplicates: DuplicatePolicy::LastWins,
            repeated_translations: DuplicatePolicy::FirstWins,
        }
    }
}

impl ReadOptions {
    /// Creates default read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the empty cell policy.
    pub fn with_empty_cells(mut self, empty_cells: EmptyCells) -> Self {
        self.empty_cells = empty_cells;
        self
    }

    /// Sets the duplicate key policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Sets the policy for translation rows sharing an English value.
    pub fn with_repeated_translations(mut self, policy: DuplicatePolicy) -> Self {
        self.repeated_translations = policy;
        self
    }

    /// Applies the empty cell policy to an already trimmed cell.
    pub(crate) fn cell_value(&self, cell: &str) -> Option<String> {
        match (cell.is_empty(), self.empty_cells) {
            (false, _) => Some(cell.to_string()),
            (true, EmptyCells::Preserve) => Some(String::new()),
            (true, EmptyCells::Absent) => None,
        }
    }
}

/// Options for the platform parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    pub duplicates: DuplicatePolicy,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

impl From<ReadOptions> for ParseOptions {
    fn from(options: ReadOptions) -> Self {
        Self {
            duplicates: options.duplicates,
        }
    }
}
