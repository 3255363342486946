use indoc::indoc;
use stringsheet::formats::{AndroidStringsFormat, StringsFormat};
use stringsheet::traits::{Parser, PlatformFormat};
use stringsheet::{
    Error, Mode, ParseOptions, Platform, ReadOptions, RowRange, SheetReader, codec, sheet,
};

const BASE_SHEET: &str = indoc! {r#"
    string_name,english_value
    app_name,Sheet Demo
    greeting,"Hello, world"
    ,
    quote,"She said ""hi"" & left"
    farewell,Goodbye
"#};

const TRANSLATION_SHEET: &str = indoc! {"
    key\tenglish_value\tfr\tes
    greeting\tHello, world\tBonjour, le monde\t
    farewell\tGoodbye\tAu revoir\tAdiós
"};

fn read_both(options: ReadOptions) -> stringsheet::ResourceSet {
    let reader = SheetReader::new(options);
    let base_rows = sheet::rows_from_csv(BASE_SHEET.as_bytes()).unwrap();
    let base = reader.read(&base_rows, None, Mode::Base).unwrap();
    let translation_rows = sheet::rows_from_tsv(TRANSLATION_SHEET.as_bytes()).unwrap();
    reader
        .read(&translation_rows, None, Mode::Translations(base))
        .unwrap()
}

#[test]
fn generates_one_android_file_per_locale() {
    let set = read_both(ReadOptions::default());
    let dir = tempfile::tempdir().unwrap();
    let files = codec::generate_all(&set, Platform::Android).unwrap();
    codec::write_all(dir.path(), &files).unwrap();

    let default = AndroidStringsFormat::read_from(dir.path().join("values/strings.xml")).unwrap();
    let names: Vec<_> = default.strings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["app_name", "greeting", "quote", "farewell"]);

    let fr_text = std::fs::read_to_string(dir.path().join("values-fr/strings.xml")).unwrap();
    assert!(fr_text.contains(r#"<string name="greeting">Bonjour, le monde</string>"#));
    assert!(fr_text.contains(r#"<string name="app_name">Sheet Demo</string>"#));
    assert!(fr_text.contains(r#"<string name="quote">She said \"hi\" &amp; left</string>"#));

    // Empty Spanish cell falls back to English under the lenient policy.
    let es = AndroidStringsFormat::read_from(dir.path().join("values-es/strings.xml"))
        .unwrap()
        .into_resource_set(ParseOptions::default())
        .unwrap();
    assert_eq!(
        es.get("greeting").unwrap().default_value.as_deref(),
        Some("Hello, world")
    );
    assert_eq!(
        es.get("farewell").unwrap().default_value.as_deref(),
        Some("Adiós")
    );
}

#[test]
fn strict_empty_cells_emit_empty_strings() {
    let set = read_both(ReadOptions::new().with_empty_cells(stringsheet::EmptyCells::Preserve));
    let text = String::from_utf8(codec::generate(&set, Platform::Ios, Some("es")).unwrap()).unwrap();
    assert!(text.contains("\"greeting\" = \"\";\n"));
    assert!(text.contains("\"farewell\" = \"Adiós\";\n"));
}

#[test]
fn generates_strings_files_with_escaping() {
    let set = read_both(ReadOptions::default());
    let files = codec::generate_all(&set, Platform::Ios).unwrap();
    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            std::path::PathBuf::from("Base.lproj/Localizable.strings"),
            std::path::PathBuf::from("fr.lproj/Localizable.strings"),
            std::path::PathBuf::from("es.lproj/Localizable.strings"),
        ]
    );
    let base = String::from_utf8(files[0].contents.clone()).unwrap();
    assert_eq!(
        base,
        indoc! {r#"
            "app_name" = "Sheet Demo";
            "greeting" = "Hello, world";
            "quote" = "She said \"hi\" & left";
            "farewell" = "Goodbye";
        "#}
    );
}

#[test]
fn row_range_limits_generated_entries() {
    let rows = sheet::rows_from_csv(BASE_SHEET.as_bytes()).unwrap();
    let set = sheet::read(&rows, Some(RowRange::new(1, 3)), Mode::Base).unwrap();
    let keys: Vec<_> = set.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["greeting", "quote"]);
}

#[test]
fn missing_english_value_column_is_malformed_input() {
    let rows = sheet::rows_from_csv(b"string_name,value\nhello,Hello\n").unwrap();
    let err = sheet::read(&rows, None, Mode::Base).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn platform_file_converts_to_sheet() {
    let xml = indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <resources>
            <string name="x">a</string>
            <string name="greeting">Hello, world</string>
            <string name="x">b</string>
        </resources>
    "#};
    let csv = codec::to_sheet(xml.as_bytes(), Platform::Android, ParseOptions::default()).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "string_name,english_value\nx,b\ngreeting,\"Hello, world\"\n"
    );
}

#[test]
fn strings_file_on_disk_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Localizable.strings");
    std::fs::write(&path, "// header\n\"title\" = \"Title\";\n").unwrap();

    let platform = codec::infer_platform(&path).unwrap();
    assert_eq!(platform, Platform::Ios);
    let set = StringsFormat::read_from(&path)
        .unwrap()
        .into_resource_set(ParseOptions::default())
        .unwrap();
    assert_eq!(set.get("title").unwrap().default_value.as_deref(), Some("Title"));
}
