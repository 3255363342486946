use std::{fs, path::Path};

use stringsheet::{ParseOptions, Platform, codec};

/// Converts a platform file to a `string_name,english_value` CSV.
///
/// The platform is inferred from the extension unless given. Returns the CSV
/// text so the caller can write it out or print it.
pub fn run_to_sheet_command(
    input: &Path,
    platform: Option<Platform>,
    options: ParseOptions,
) -> Result<String, String> {
    let platform = match platform {
        Some(platform) => platform,
        None => codec::infer_platform(input).map_err(|e| format!("{}: {}", input.display(), e))?,
    };
    let bytes = fs::read(input).map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
    let csv = codec::to_sheet(&bytes, platform, options)
        .map_err(|e| format!("Error converting {}: {}", input.display(), e))?;
    String::from_utf8(csv).map_err(|e| format!("Error converting {}: {}", input.display(), e))
}

/// Writes `contents` to `output`, or prints it when no output is given.
pub fn write_output(contents: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Error writing to {}: {}", path.display(), e))?;
            }
            fs::write(path, contents)
                .map_err(|e| format!("Error writing to {}: {}", path.display(), e))
        }
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}
