//! Response models. Field names are the JSON wire names.

use serde::{Deserialize, Serialize};

/// Placeholder for a book without a display name.
pub const UNKNOWN_NAME: &str = "Unknown Name";
/// Placeholder for a book without an abbreviation.
pub const UNKNOWN_ABBREV: &str = "Unknown Abbreviation";
/// Placeholder for a book without a group.
pub const UNKNOWN_GROUP: &str = "Unknown Group";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub name: String,
    pub abbrev: String,
    pub group: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChapters {
    pub name: String,
    pub chapter_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterCount {
    pub book: String,
    pub chapter_count: usize,
}

/// One chapter of one book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub version: String,
    pub book: String,
    pub chapter: usize,
    pub verses: Vec<String>,
}

/// A single addressed verse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseHit {
    pub version: String,
    pub book: String,
    pub chapter: usize,
    pub verse_number: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<VerseHit>,
    pub count: usize,
}

impl From<Vec<VerseHit>> for SearchResults {
    fn from(results: Vec<VerseHit>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}
