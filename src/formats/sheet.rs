//! Reading localization spreadsheets into a `ResourceSet`.
//!
//! A sheet is a header row followed by data rows. The base sheet maps
//! `string_name` to `english_value`; a translation sheet carries an
//! `english_value` column followed by one column per locale, joined to the
//! base sheet on the English text.
//!
//! Spreadsheets arrive as CSV or TSV exports; [`rows_from_csv`] and
//! [`rows_from_tsv`] turn those bytes into rows.

use std::collections::{HashMap, HashSet};

use crate::{
    error::Error,
    options::{ReadOptions, Resolution},
    traits::decode_bytes,
    types::{ResourceSet, StringEntry, Translations},
};

pub const KEY_COLUMN: &str = "string_name";
pub const VALUE_COLUMN: &str = "english_value";

/// Inclusive range of data rows, counted from 0 after the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn check(&self, data_rows: usize) -> Result<(), Error> {
        if self.start > self.end {
            return Err(Error::malformed_input(format!(
                "start row {} is after end row {}",
                self.start, self.end
            )));
        }
        if self.end >= data_rows {
            return Err(Error::malformed_input(format!(
                "row range {}..={} is out of bounds for a sheet with {} data rows",
                self.start, self.end, data_rows
            )));
        }
        Ok(())
    }
}

/// What kind of sheet is being read.
#[derive(Debug, Clone)]
pub enum Mode {
    /// A `string_name` / `english_value` sheet; produces a fresh set.
    Base,
    /// A translation sheet whose rows are joined onto this base set by English value.
    Translations(ResourceSet),
}

/// Reads sheets with a fixed set of [`ReadOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetReader {
    options: ReadOptions,
}

impl SheetReader {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Reads `rows` (header first) into a resource set.
    ///
    /// `range` selects data rows; `None` reads all of them.
    pub fn read<S: AsRef<str>>(
        &self,
        rows: &[Vec<S>],
        range: Option<RowRange>,
        mode: Mode,
    ) -> Result<ResourceSet, Error> {
        let (header, data) = rows
            .split_first()
            .ok_or_else(|| Error::malformed_input("sheet has no header row"))?;

        let data = match range {
            Some(range) => {
                range.check(data.len())?;
                &data[range.start..=range.end]
            }
            None => data,
        };
        let first_row = range.map_or(0, |r| r.start);

        match mode {
            Mode::Base => self.read_base(header, data, first_row),
            Mode::Translations(base) => self.read_translations(header, data, first_row, base),
        }
    }

    fn read_base<S: AsRef<str>>(
        &self,
        header: &[S],
        data: &[Vec<S>],
        first_row: usize,
    ) -> Result<ResourceSet, Error> {
        let key_col = find_column(header, KEY_COLUMN)?;
        let value_col = find_column(header, VALUE_COLUMN)?;

        let mut set = ResourceSet::new();
        for (offset, row) in data.iter().enumerate() {
            let key = cell(row, key_col);
            if key.is_empty() {
                tracing::trace!(row = first_row + offset, "blank key, row skipped");
                continue;
            }
            let entry = StringEntry {
                key: key.to_string(),
                default_value: self.options.cell_value(cell(row, value_col)),
                translations: Translations::new(),
            };
            set.insert(entry, self.options.duplicates)?;
        }

        tracing::debug!(entries = set.len(), "read base sheet");
        Ok(set)
    }

    fn read_translations<S: AsRef<str>>(
        &self,
        header: &[S],
        data: &[Vec<S>],
        first_row: usize,
        mut set: ResourceSet,
    ) -> Result<ResourceSet, Error> {
        let value_col = find_column(header, VALUE_COLUMN)?;
        let locale_cols = locale_columns(header, value_col)?;
        for (_, locale) in &locale_cols {
            set.add_locale(locale.clone());
        }

        // English text -> positions of the base entries that use it.
        let mut by_english: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in set.iter().enumerate() {
            if let Some(english) = &entry.default_value {
                by_english.entry(english.clone()).or_default().push(i);
            }
        }

        let mut seen = HashSet::new();
        let mut matched = 0usize;
        for (offset, row) in data.iter().enumerate() {
            let english = cell(row, value_col);
            if english.is_empty() {
                tracing::trace!(row = first_row + offset, "blank english value, row skipped");
                continue;
            }
            let repeated = !seen.insert(english.to_string());
            if repeated
                && self.options.repeated_translations.resolve(english)? == Resolution::KeepExisting
            {
                continue;
            }
            let Some(targets) = by_english.get(english) else {
                tracing::debug!(
                    row = first_row + offset,
                    english,
                    "no base entry with this english value, row skipped"
                );
                continue;
            };
            matched += 1;

            let entries = set.entries_mut();
            for &i in targets {
                let translations = &mut entries[i].translations;
                for (col, locale) in &locale_cols {
                    match self.options.cell_value(cell(row, *col)) {
                        Some(value) => {
                            translations.insert(locale.as_str(), value);
                        }
                        None if repeated => {
                            translations.remove(locale);
                        }
                        None => {}
                    }
                }
            }
        }

        tracing::debug!(
            locales = locale_cols.len(),
            rows = matched,
            "read translation sheet"
        );
        Ok(set)
    }
}

/// Reads a sheet with the default [`ReadOptions`].
pub fn read<S: AsRef<str>>(
    rows: &[Vec<S>],
    range: Option<RowRange>,
    mode: Mode,
) -> Result<ResourceSet, Error> {
    SheetReader::default().read(rows, range, mode)
}

/// Splits comma-separated bytes into rows of cells.
pub fn rows_from_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, Error> {
    rows_from_delimited(bytes, b',')
}

/// Splits tab-separated bytes into rows of cells.
pub fn rows_from_tsv(bytes: &[u8]) -> Result<Vec<Vec<String>>, Error> {
    rows_from_delimited(bytes, b'\t')
}

/// Splits delimited text into rows. Rows may have different lengths; a
/// UTF-8 or UTF-16 byte order mark is honored. Completely empty lines are
/// not rows.
pub fn rows_from_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Vec<String>>, Error> {
    let decoded = decode_bytes(bytes)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(decoded.as_bytes());

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn cell<S: AsRef<str>>(row: &[S], col: usize) -> &str {
    row.get(col).map_or("", |c| c.as_ref().trim())
}

fn find_column<S: AsRef<str>>(header: &[S], name: &str) -> Result<usize, Error> {
    header
        .iter()
        .position(|h| h.as_ref().trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::malformed_input(format!("missing required column `{name}`")))
}

/// Locale columns are every named column after the english value column.
fn locale_columns<S: AsRef<str>>(
    header: &[S],
    value_col: usize,
) -> Result<Vec<(usize, String)>, Error> {
    let mut columns: Vec<(usize, String)> = Vec::new();
    for (col, name) in header.iter().enumerate().skip(value_col + 1) {
        let name = name.as_ref().trim();
        if name.is_empty() {
            tracing::debug!(column = col, "unnamed column ignored");
            continue;
        }
        if columns.iter().any(|(_, existing)| existing == name) {
            return Err(Error::malformed_input(format!(
                "locale column `{name}` appears more than once"
            )));
        }
        columns.push((col, name.to_string()));
    }
    if columns.is_empty() {
        return Err(Error::malformed_input(format!(
            "translation sheet has no locale columns after `{VALUE_COLUMN}`"
        )));
    }
    Ok(columns)
}
