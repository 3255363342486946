use std::path::{Path, PathBuf};

use stringsheet::{Mode, Platform, ReadOptions, RowRange, SheetReader, codec};

use crate::sheet_input::read_rows;

/// Everything the generate command needs, after flags and config are merged.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub base: PathBuf,
    pub translations: Option<PathBuf>,
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub platform: Platform,
    pub out_dir: PathBuf,
    /// Only write this locale's file instead of every file.
    pub locale: Option<String>,
    pub read: ReadOptions,
}

/// Reads the base sheet (and translation sheet, if any) and writes the
/// platform files under `out_dir`. Returns the written paths.
pub fn run_generate_command(options: &GenerateOptions) -> Result<Vec<PathBuf>, String> {
    let reader = SheetReader::new(options.read);

    let rows = read_rows(&options.base)?;
    let range = row_range(options.start, options.end, rows.len().saturating_sub(1));
    let mut set = reader
        .read(&rows, range, Mode::Base)
        .map_err(|e| sheet_error(&options.base, e))?;
    tracing::info!(entries = set.len(), path = %options.base.display(), "read base sheet");

    if let Some(path) = &options.translations {
        let rows = read_rows(path)?;
        set = reader
            .read(&rows, None, Mode::Translations(set))
            .map_err(|e| sheet_error(path, e))?;
        tracing::info!(locales = ?set.locales(), path = %path.display(), "read translation sheet");
    }

    let files = match options.locale.as_deref() {
        Some(locale) => {
            if !set.locales().iter().any(|l| l == locale) {
                tracing::warn!(locale, "locale has no column; writing default values");
            }
            let contents = codec::generate(&set, options.platform, Some(locale))
                .map_err(|e| format!("Error generating {}: {}", options.platform, e))?;
            vec![codec::GeneratedFile {
                locale: Some(locale.to_string()),
                path: codec::output_path(options.platform, Some(locale)),
                contents,
            }]
        }
        None => codec::generate_all(&set, options.platform)
            .map_err(|e| format!("Error generating {}: {}", options.platform, e))?,
    };

    let written = codec::write_all(&options.out_dir, &files)
        .map_err(|e| format!("Error writing to {}: {}", options.out_dir.display(), e))?;
    tracing::info!(files = written.len(), out_dir = %options.out_dir.display(), "generated");
    Ok(written)
}

/// A range is only applied when a bound was given; the missing bound
/// defaults to the first or last data row.
fn row_range(start: Option<usize>, end: Option<usize>, data_rows: usize) -> Option<RowRange> {
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(RowRange::new(
        start.unwrap_or(0),
        end.unwrap_or(data_rows.saturating_sub(1)),
    ))
}

fn sheet_error(path: &Path, e: stringsheet::Error) -> String {
    format!("Error reading {}: {}", path.display(), e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range_defaults() {
        assert_eq!(row_range(None, None, 10), None);
        assert_eq!(row_range(Some(2), None, 10), Some(RowRange::new(2, 9)));
        assert_eq!(row_range(None, Some(4), 10), Some(RowRange::new(0, 4)));
        assert_eq!(row_range(Some(1), Some(3), 10), Some(RowRange::new(1, 3)));
    }
}
