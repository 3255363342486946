use std::path::Path;

use stringsheet::{Mode, ParseOptions, ReadOptions, ResourceSet, SheetReader, codec};

use crate::sheet_input::read_rows;

/// Reads a platform file or a base sheet and renders the resulting
/// resource set as pretty JSON.
pub fn run_debug_command(input: &Path, options: ReadOptions) -> Result<String, String> {
    let set = read_any(input, options)?;
    serde_json::to_string_pretty(&set).map_err(|e| format!("Error serializing to JSON: {}", e))
}

fn read_any(input: &Path, options: ReadOptions) -> Result<ResourceSet, String> {
    match codec::infer_platform(input) {
        Ok(platform) => {
            let bytes = std::fs::read(input)
                .map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
            codec::parse(&bytes, platform, ParseOptions::from(options))
                .map_err(|e| format!("Error reading {}: {}", input.display(), e))
        }
        Err(_) => {
            let rows = read_rows(input)?;
            SheetReader::new(options)
                .read(&rows, None, Mode::Base)
                .map_err(|e| format!("Error reading {}: {}", input.display(), e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_strings_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Localizable.strings");
        std::fs::write(&input, "\"hi\" = \"Hi\";\n").unwrap();

        let json = run_debug_command(&input, ReadOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entries"][0]["key"], "hi");
        assert_eq!(value["entries"][0]["default_value"], "Hi");
    }

    #[test]
    fn test_debug_base_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("base.csv");
        std::fs::write(&input, "string_name,english_value\nhi,Hi\nempty,\n").unwrap();

        let json = run_debug_command(&input, ReadOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entries"][1]["key"], "empty");
        assert!(value["entries"][1]["default_value"].is_null());
    }
}
