use std::{fs, path::Path};

use stringsheet::sheet;

/// Reads a sheet file into rows. `.tsv` and `.tab` files are tab-separated,
/// everything else is read as CSV.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let bytes =
        fs::read(path).map_err(|e| format!("Error reading {}: {}", path.display(), e))?;
    let tab_separated = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv") || e.eq_ignore_ascii_case("tab"));
    let rows = if tab_separated {
        sheet::rows_from_tsv(&bytes)
    } else {
        sheet::rows_from_csv(&bytes)
    };
    rows.map_err(|e| format!("Error reading {}: {}", path.display(), e))
}
