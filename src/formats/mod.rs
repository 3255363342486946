pub mod android_strings;
pub mod csv;
pub mod sheet;
pub mod strings;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use strings::Format as StringsFormat;

/// Target platform of a generated string-resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Android `res/values*/strings.xml`.
    Android,
    /// Apple `*.lproj/Localizable.strings`.
    Ios,
}

impl Platform {
    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Android => "xml",
            Platform::Ios => "strings",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "Android strings.xml"),
            Platform::Ios => write!(f, "iOS .strings"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" | "xml" => Ok(Platform::Android),
            "ios" | "apple" | "strings" => Ok(Platform::Ios),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("strings".parse::<Platform>().unwrap(), Platform::Ios);
        assert!(matches!(
            "po".parse::<Platform>(),
            Err(Error::UnknownFormat(name)) if name == "po"
        ));
    }

    #[test]
    fn test_platform_extension() {
        assert_eq!(Platform::Android.extension(), "xml");
        assert_eq!(Platform::Ios.extension(), "strings");
    }
}
