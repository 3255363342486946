//! Byte-buffer entry points for the two conversion paths.
//!
//! The generate path turns a [`ResourceSet`] into one platform file per
//! locale; the convert-to-sheet path parses a platform file and renders it as
//! a `string_name,english_value` CSV. File layout follows each platform's
//! resource directory conventions (`values-fr/strings.xml`,
//! `fr.lproj/Localizable.strings`).
use std::{
    fs,
    path::{Path, PathBuf},
};

use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    formats::{self, AndroidStringsFormat, Platform, StringsFormat},
    options::ParseOptions,
    traits::PlatformFormat,
    types::ResourceSet,
};

/// One generated platform file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `None` for the default-language file.
    pub locale: Option<String>,
    /// Path relative to the output root.
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Serializes `set` for `platform`, selecting `locale` translations when given.
pub fn generate(
    set: &ResourceSet,
    platform: Platform,
    locale: Option<&str>,
) -> Result<Vec<u8>, Error> {
    let text = match platform {
        Platform::Android => AndroidStringsFormat::serialize(set, locale)?,
        Platform::Ios => StringsFormat::serialize(set, locale)?,
    };
    Ok(text.into_bytes())
}

/// Generates the default-language file followed by one file per locale of
/// the set, in locale order.
///
/// Nothing is returned unless every file serializes.
pub fn generate_all(set: &ResourceSet, platform: Platform) -> Result<Vec<GeneratedFile>, Error> {
    std::iter::once(None)
        .chain(set.locales().iter().map(|l| Some(l.as_str())))
        .map(|locale| -> Result<GeneratedFile, Error> {
            Ok(GeneratedFile {
                locale: locale.map(str::to_string),
                path: output_path(platform, locale),
                contents: generate(set, platform, locale)?,
            })
        })
        .collect()
}

/// Parses a platform file.
pub fn parse(bytes: &[u8], platform: Platform, options: ParseOptions) -> Result<ResourceSet, Error> {
    match platform {
        Platform::Android => AndroidStringsFormat::parse_bytes(bytes, options),
        Platform::Ios => StringsFormat::parse_bytes(bytes, options),
    }
}

/// Parses a platform file and renders it as CSV.
pub fn to_sheet(bytes: &[u8], platform: Platform, options: ParseOptions) -> Result<Vec<u8>, Error> {
    let set = parse(bytes, platform, options)?;
    tracing::debug!(entries = set.len(), %platform, "converted to sheet");
    Ok(formats::csv::write(&set)?.into_bytes())
}

/// Infers the platform from a file extension.
pub fn infer_platform<P: AsRef<Path>>(path: P) -> Result<Platform, Error> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xml") => Ok(Platform::Android),
        Some(ext) if ext.eq_ignore_ascii_case("strings") => Ok(Platform::Ios),
        extension => Err(Error::UnknownFormat(format!(
            "cannot infer platform from extension {:?}",
            extension
        ))),
    }
}

/// Relative path of the resource file for `locale` on `platform`.
///
/// Android uses `values[-qualifier]/strings.xml`; iOS uses
/// `<locale>.lproj/Localizable.strings` with `Base.lproj` for the default language.
pub fn output_path(platform: Platform, locale: Option<&str>) -> PathBuf {
    match (platform, locale) {
        (Platform::Android, None) => PathBuf::from("values").join("strings.xml"),
        (Platform::Android, Some(locale)) => {
            PathBuf::from(format!("values-{}", android_qualifier(locale))).join("strings.xml")
        }
        (Platform::Ios, None) => PathBuf::from("Base.lproj").join("Localizable.strings"),
        (Platform::Ios, Some(locale)) => {
            PathBuf::from(format!("{}.lproj", apple_locale(locale))).join("Localizable.strings")
        }
    }
}

/// Writes generated files under `root`, creating directories as needed.
pub fn write_all<P: AsRef<Path>>(root: P, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, Error> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.as_ref().join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.contents)?;
        tracing::debug!(path = %path.display(), "wrote resource file");
        written.push(path);
    }
    Ok(written)
}

/// Android resource qualifier: `fr`, `pt-rBR`, or the BCP 47 form `b+zh+Hant+TW`
/// when a script or variant is present. Unparsable identifiers are used verbatim.
fn android_qualifier(locale: &str) -> String {
    match locale.trim().parse::<LanguageIdentifier>() {
        Ok(id) if id.script.is_none() && id.variants().next().is_none() => match id.region {
            Some(region) => format!("{}-r{}", id.language, region),
            None => id.language.to_string(),
        },
        Ok(id) => format!("b+{}", id.to_string().replace('-', "+")),
        Err(_) => locale.trim().to_string(),
    }
}

fn apple_locale(locale: &str) -> String {
    locale
        .trim()
        .parse::<LanguageIdentifier>()
        .map(|id| id.to_string())
        .unwrap_or_else(|_| locale.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::DuplicatePolicy, types::StringEntry};

    fn sample_set() -> ResourceSet {
        let mut set = ResourceSet::with_locales(["fr", "pt-BR"]);
        let mut hello = StringEntry::new("hello", "Hello");
        hello.translations.insert("fr", "Bonjour");
        hello.translations.insert("pt-BR", "Olá");
        set.insert(hello, DuplicatePolicy::LastWins).unwrap();
        set.insert(StringEntry::new("ok", "OK"), DuplicatePolicy::LastWins)
            .unwrap();
        set
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(
            output_path(Platform::Android, None),
            Path::new("values/strings.xml")
        );
        assert_eq!(
            output_path(Platform::Android, Some("fr")),
            Path::new("values-fr/strings.xml")
        );
        assert_eq!(
            output_path(Platform::Android, Some("pt_BR")),
            Path::new("values-pt-rBR/strings.xml")
        );
        assert_eq!(
            output_path(Platform::Android, Some("zh-Hant-TW")),
            Path::new("values-b+zh+Hant+TW/strings.xml")
        );
        assert_eq!(
            output_path(Platform::Ios, None),
            Path::new("Base.lproj/Localizable.strings")
        );
        assert_eq!(
            output_path(Platform::Ios, Some("pt_BR")),
            Path::new("pt-BR.lproj/Localizable.strings")
        );
        assert_eq!(
            output_path(Platform::Ios, Some("Français (FR)")),
            Path::new("Français (FR).lproj/Localizable.strings")
        );
    }

    #[test]
    fn test_generate_all_android() {
        let files = generate_all(&sample_set(), Platform::Android).unwrap();
        let locales: Vec<_> = files.iter().map(|f| f.locale.as_deref()).collect();
        assert_eq!(locales, vec![None, Some("fr"), Some("pt-BR")]);

        let fr = String::from_utf8(files[1].contents.clone()).unwrap();
        assert!(fr.contains(r#"<string name="hello">Bonjour</string>"#));
        assert!(fr.contains(r#"<string name="ok">OK</string>"#));
        assert_eq!(files[2].path, Path::new("values-pt-rBR/strings.xml"));
    }

    #[test]
    fn test_generate_all_fails_as_a_whole() {
        let mut set = sample_set();
        set.insert(StringEntry::new("bad key", "x"), DuplicatePolicy::LastWins)
            .unwrap();
        assert!(matches!(
            generate_all(&set, Platform::Android),
            Err(Error::InvalidKey { .. })
        ));
        // iOS accepts any non-empty key.
        assert_eq!(generate_all(&set, Platform::Ios).unwrap().len(), 3);
    }

    #[test]
    fn test_to_sheet_from_strings() {
        let input = "/* c */\n\"hello\" = \"Hello, world\";\n\"bye\" = \"Bye\";\n";
        let csv = to_sheet(input.as_bytes(), Platform::Ios, ParseOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "string_name,english_value\nhello,\"Hello, world\"\nbye,Bye\n"
        );
    }

    #[test]
    fn test_to_sheet_propagates_format_errors() {
        let result = to_sheet(b"<resources>", Platform::Android, ParseOptions::default());
        assert!(matches!(result, Err(Error::MalformedFormat { .. })));
    }

    #[test]
    fn test_to_sheet_rejects_undecodable_bytes() {
        for (bytes, expected) in [
            (&b"<resources><string name=\"a\">\xff</string></resources>"[..], Platform::Android),
            (&b"\"a\" = \"\xff\";"[..], Platform::Ios),
        ] {
            let result = to_sheet(bytes, expected, ParseOptions::default());
            assert!(
                matches!(result, Err(Error::MalformedFormat { platform, .. }) if platform == expected),
                "{expected}: {result:?}"
            );
        }
    }

    #[test]
    fn test_infer_platform() {
        assert_eq!(
            infer_platform("res/values/strings.xml").unwrap(),
            Platform::Android
        );
        assert_eq!(
            infer_platform("en.lproj/Localizable.STRINGS").unwrap(),
            Platform::Ios
        );
        assert!(matches!(
            infer_platform("Localizable.xcstrings"),
            Err(Error::UnknownFormat(_))
        ));
        assert!(infer_platform("README").is_err());
    }

    #[test]
    fn test_write_all_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let files = generate_all(&sample_set(), Platform::Ios).unwrap();
        let written = write_all(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 3);
        let fr = fs::read_to_string(dir.path().join("fr.lproj/Localizable.strings")).unwrap();
        assert_eq!(fr, "\"hello\" = \"Bonjour\";\n\"ok\" = \"OK\";\n");
    }
}
