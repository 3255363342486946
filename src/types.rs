//! Core, platform-agnostic types for stringsheet.
//! The tabular reader and the platform parsers decode into these; serializers encode these.

use std::{collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    options::{DuplicatePolicy, Resolution},
};

/// Per-locale values of one entry, in source column order.
///
/// Lookups go through an index, iteration follows insertion order. A locale
/// that is missing and a locale mapped to `""` are different things.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<LocalizedValue>", into = "Vec<LocalizedValue>")]
pub struct Translations {
    pairs: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

/// Serialized form of a single translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalizedValue {
    pub locale: String,
    pub value: String,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `locale`, keeping its original position when it
    /// already exists. Returns the previous value.
    pub fn insert(&mut self, locale: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let locale = locale.into();
        let value = value.into();
        match self.index.get(&locale) {
            Some(&i) => Some(std::mem::replace(&mut self.pairs[i].1, value)),
            None => {
                self.index.insert(locale.clone(), self.pairs.len());
                self.pairs.push((locale, value));
                None
            }
        }
    }

    /// Removes `locale`, returning its value.
    pub fn remove(&mut self, locale: &str) -> Option<String> {
        let i = self.index.remove(locale)?;
        let (_, value) = self.pairs.remove(i);
        for (l, _) in &self.pairs[i..] {
            if let Some(pos) = self.index.get_mut(l) {
                *pos -= 1;
            }
        }
        Some(value)
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.index
            .get(locale)
            .map(|&i| self.pairs[i].1.as_str())
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.index.contains_key(locale)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

impl From<Vec<LocalizedValue>> for Translations {
    fn from(values: Vec<LocalizedValue>) -> Self {
        let mut translations = Translations::new();
        for LocalizedValue { locale, value } in values {
            translations.insert(locale, value);
        }
        translations
    }
}

impl From<Translations> for Vec<LocalizedValue> {
    fn from(translations: Translations) -> Self {
        translations
            .pairs
            .into_iter()
            .map(|(locale, value)| LocalizedValue { locale, value })
            .collect()
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Translations {
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        let mut translations = Translations::new();
        for (locale, value) in iter {
            translations.insert(locale, value);
        }
        translations
    }
}

/// A single localization key with its default value and translations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringEntry {
    /// Unique key; `<string name>` on Android, the left-hand side on iOS.
    pub key: String,

    /// Default-language value. `None` when the source had no value for it.
    #[serde(default)]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Translations::is_empty")]
    pub translations: Translations,
}

impl StringEntry {
    /// Creates an entry with a default value and no translations.
    pub fn new(key: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            default_value: Some(default_value.into()),
            translations: Translations::new(),
        }
    }

    /// The value to emit for `locale`: its translation when present,
    /// otherwise the default value.
    pub fn resolve(&self, locale: Option<&str>) -> Option<&str> {
        locale
            .and_then(|locale| self.translations.get(locale))
            .or(self.default_value.as_deref())
    }
}

impl Display for StringEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StringEntry {{ key: {}, default: {:?}, translations: {} }}",
            self.key,
            self.default_value,
            self.translations.len()
        )
    }
}

/// An ordered collection of entries plus the locales they are translated into.
///
/// Entry order follows the source and is reproduced on output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "ResourceSetData", into = "ResourceSetData")]
pub struct ResourceSet {
    locales: Vec<String>,
    entries: Vec<StringEntry>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize, Serialize)]
struct ResourceSetData {
    #[serde(default)]
    locales: Vec<String>,
    #[serde(default)]
    entries: Vec<StringEntry>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that declares the given locales.
    pub fn with_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn entries(&self) -> &[StringEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StringEntry> {
        self.entries.iter()
    }

    /// Appends a locale if it is not declared yet.
    pub fn add_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        if !self.locales.contains(&locale) {
            self.locales.push(locale);
        }
    }

    /// Adds an entry, resolving a repeated key with `policy`.
    pub fn insert(&mut self, entry: StringEntry, policy: DuplicatePolicy) -> Result<(), Error> {
        match self.index.get(&entry.key) {
            Some(&i) => {
                if policy.resolve(&entry.key)? == Resolution::Replace {
                    self.entries[i] = entry;
                }
            }
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
        Ok(())
    }

    /// Keys must not be changed through this slice; the key index would go stale.
    pub(crate) fn entries_mut(&mut self) -> &mut [StringEntry] {
        &mut self.entries
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a StringEntry;
    type IntoIter = std::slice::Iter<'a, StringEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<ResourceSetData> for ResourceSet {
    fn from(data: ResourceSetData) -> Self {
        let mut set = ResourceSet::with_locales(data.locales);
        for entry in data.entries {
            // LastWins never fails.
            let _ = set.insert(entry, DuplicatePolicy::LastWins);
        }
        set
    }
}

impl From<ResourceSet> for ResourceSetData {
    fn from(set: ResourceSet) -> Self {
        Self {
            locales: set.locales,
            entries: set.entries,
        }
    }
}
