//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! [read]
//! empty-cells = "preserve"   # or "absent"
//! duplicates = "first-wins"  # "last-wins" | "first-wins" | "reject"
//! repeated-translations = "last-wins"
//!
//! [generate]
//! platform = "ios"
//! out-dir = "build/res"
//! ```
//!
//! Command-line flags take precedence over values from the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use stringsheet::{Platform, ReadOptions};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "stringsheet.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub read: ReadOptions,
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerateConfig {
    pub platform: Option<Platform>,
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Loads `path`, or `stringsheet.toml` if present, or the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => PathBuf::from(DEFAULT_CONFIG_FILE),
            None => return Ok(Config::default()),
        };
        let text = fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        let config = Self::from_toml(&text)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringsheet::{DuplicatePolicy, EmptyCells};

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [read]
            empty-cells = "preserve"
            duplicates = "reject"
            repeated-translations = "last-wins"

            [generate]
            platform = "ios"
            out-dir = "build/res"
            "#,
        )
        .unwrap();
        assert_eq!(config.read.empty_cells, EmptyCells::Preserve);
        assert_eq!(config.read.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.read.repeated_translations, DuplicatePolicy::LastWins);
        assert_eq!(config.generate.platform, Some(Platform::Ios));
        assert_eq!(config.generate.out_dir, Some(PathBuf::from("build/res")));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::from_toml("[write]\nindent = 2\n").is_err());
        assert!(Config::from_toml("[generate]\nlocale = \"fr\"\n").is_err());
        assert!(Config::from_toml("[read]\nduplicates = \"sometimes\"\n").is_err());
    }
}
