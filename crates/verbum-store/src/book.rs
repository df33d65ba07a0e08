use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use verbum_types::canon;

/// One chapter: verse texts in order. Verse 1 is index 0.
pub type Chapter = Vec<String>;

// ---------------------------------------------------------------------------
// Raw (on-disk) shapes
// ---------------------------------------------------------------------------

/// A book object as it appears in a version file.
///
/// Every field is optional and decoded leniently. A label that is not a
/// string counts as missing. A `chapters` value that is not an array counts
/// as no chapters, a chapter that is not an array counts as an empty chapter,
/// and verse entries that are not strings are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawBook {
    #[serde(default, deserialize_with = "lenient_label")]
    pub abbrev: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "lenient_chapters")]
    pub chapters: Vec<Chapter>,
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_chapters<'de, D>(deserializer: D) -> Result<Vec<Chapter>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(chapters) = value else {
        return Ok(Vec::new());
    };
    Ok(chapters
        .into_iter()
        .map(|chapter| match chapter {
            Value::Array(verses) => verses
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
        .collect())
}

/// Books keyed by canonical name, in the order they appear in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyedBooks(pub Vec<(String, RawBook)>);

impl<'de> Deserialize<'de> for KeyedBooks {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyedVisitor;

        impl<'de> Visitor<'de> for KeyedVisitor {
            type Value = KeyedBooks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping book names to book objects")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut books = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, book)) = map.next_entry::<String, RawBook>()? {
                    books.push((name, book));
                }
                Ok(KeyedBooks(books))
            }
        }

        deserializer.deserialize_map(KeyedVisitor)
    }
}

/// The two accepted version file shapes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawSource {
    /// A list of book objects; keys are derived from each `abbrev`.
    Sequence(Vec<RawBook>),
    /// An object already keyed by canonical name; used as-is.
    Keyed(KeyedBooks),
}

impl RawSource {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

// ---------------------------------------------------------------------------
// Book record
// ---------------------------------------------------------------------------

/// One book of a loaded version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    /// Canonical lowercase key, e.g. `genesis`.
    pub canonical: String,
    /// Human-readable name from the source, e.g. `Gênesis`.
    pub name: Option<String>,
    pub abbrev: Option<String>,
    /// Category label such as a testament or literary group.
    pub group: Option<String>,
    pub chapters: Vec<Chapter>,
}

impl BookRecord {
    pub fn new(canonical: impl Into<String>, chapters: Vec<Chapter>) -> Self {
        Self {
            canonical: canonical.into(),
            name: None,
            abbrev: None,
            group: None,
            chapters,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_abbrev(mut self, abbrev: impl Into<String>) -> Self {
        self.abbrev = Some(abbrev.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    fn from_raw(canonical: String, raw: RawBook) -> Self {
        Self {
            canonical,
            name: raw.name,
            abbrev: raw.abbrev,
            group: raw.group,
            chapters: raw.chapters,
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn has_chapters(&self) -> bool {
        !self.chapters.is_empty()
    }

    /// Chapter by 1-based number.
    pub fn chapter(&self, number: usize) -> Option<&Chapter> {
        number.checked_sub(1).and_then(|idx| self.chapters.get(idx))
    }

    /// Title-cased canonical name, used in responses.
    pub fn display_name(&self) -> String {
        canon::display_name(&self.canonical)
    }
}

// ---------------------------------------------------------------------------
// Version collection
// ---------------------------------------------------------------------------

/// Every book of one version, keyed by canonical name.
///
/// Iteration follows source order. Inserting a key that already exists
/// replaces the record but keeps the original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionCollection {
    books: Vec<BookRecord>,
    index: HashMap<String, usize>,
}

impl VersionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a decoded version file.
    ///
    /// Sequence sources are keyed by the normalized `abbrev` of each book;
    /// books without a non-empty `abbrev` are skipped. Keyed sources keep
    /// their keys untouched.
    pub fn from_raw(source: RawSource) -> Self {
        let mut collection = Self::new();
        match source {
            RawSource::Sequence(books) => {
                for raw in books {
                    let canonical = match raw.abbrev.as_deref() {
                        Some(abbrev) if !abbrev.is_empty() => canon::normalize(abbrev),
                        _ => continue,
                    };
                    collection.insert(BookRecord::from_raw(canonical, raw));
                }
            }
            RawSource::Keyed(KeyedBooks(books)) => {
                for (name, raw) in books {
                    collection.insert(BookRecord::from_raw(name, raw));
                }
            }
        }
        collection
    }

    pub fn from_books(books: impl IntoIterator<Item = BookRecord>) -> Self {
        let mut collection = Self::new();
        for book in books {
            collection.insert(book);
        }
        collection
    }

    fn insert(&mut self, book: BookRecord) {
        match self.index.get(&book.canonical) {
            Some(&pos) => self.books[pos] = book,
            None => {
                self.index.insert(book.canonical.clone(), self.books.len());
                self.books.push(book);
            }
        }
    }

    /// Look up by canonical name exactly.
    pub fn get(&self, canonical: &str) -> Option<&BookRecord> {
        self.index.get(canonical).map(|&pos| &self.books[pos])
    }

    /// Normalize `book` and look it up.
    pub fn find(&self, book: &str) -> Option<&BookRecord> {
        self.get(&canon::normalize(book))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Total verses across every book.
    pub fn verse_count(&self) -> usize {
        self.books
            .iter()
            .flat_map(|b| b.chapters.iter())
            .map(Vec::len)
            .sum()
    }
}
