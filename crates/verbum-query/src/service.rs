use std::path::PathBuf;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use verbum_store::{BookRecord, FsVersionSource, VersionCache, VersionCollection, VersionSource};
use verbum_types::{canon, VersionId};

use crate::error::{QueryError, QueryResult};
use crate::model::{
    BookChapters, BookSummary, ChapterCount, Passage, SearchResults, VerseHit, UNKNOWN_ABBREV,
    UNKNOWN_GROUP, UNKNOWN_NAME,
};

/// Query service over a cache of versions.
pub struct Verbum {
    cache: VersionCache,
}

impl Verbum {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self {
            cache: VersionCache::new(source),
        }
    }

    /// Serve versions from `<data_dir>/<code>.json` files.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FsVersionSource::new(data_dir)))
    }

    pub fn cache(&self) -> &VersionCache {
        &self.cache
    }

    fn collection(&self, version: &VersionId) -> QueryResult<Arc<VersionCollection>> {
        self.cache
            .get_or_load(version)
            .ok_or_else(|| QueryError::VersionNotFound(version.clone()))
    }

    fn book<'a>(
        collection: &'a VersionCollection,
        version: &VersionId,
        book: &str,
    ) -> QueryResult<&'a BookRecord> {
        collection
            .find(book)
            .ok_or_else(|| QueryError::BookNotFound {
                book: book.to_string(),
                version: version.clone(),
            })
    }

    // ---- Listings ----

    /// Every book in source order, with placeholders for missing fields.
    pub fn list_books(&self, version: &VersionId) -> QueryResult<Vec<BookSummary>> {
        let collection = self.collection(version)?;
        Ok(collection
            .iter()
            .map(|b| BookSummary {
                name: b.name.clone().unwrap_or_else(|| UNKNOWN_NAME.into()),
                abbrev: b.abbrev.clone().unwrap_or_else(|| UNKNOWN_ABBREV.into()),
                group: b.group.clone().unwrap_or_else(|| UNKNOWN_GROUP.into()),
            })
            .collect())
    }

    pub fn list_books_with_chapter_counts(
        &self,
        version: &VersionId,
    ) -> QueryResult<Vec<BookChapters>> {
        let collection = self.collection(version)?;
        Ok(collection
            .iter()
            .map(|b| BookChapters {
                name: b.name.clone().unwrap_or_else(|| UNKNOWN_NAME.into()),
                chapter_count: b.chapter_count(),
            })
            .collect())
    }

    pub fn count_books(&self, version: &VersionId) -> QueryResult<usize> {
        Ok(self.collection(version)?.len())
    }

    pub fn count_chapters(&self, version: &VersionId, book: &str) -> QueryResult<ChapterCount> {
        let collection = self.collection(version)?;
        let record = Self::book(&collection, version, book)?;
        Ok(ChapterCount {
            book: record.display_name(),
            chapter_count: record.chapter_count(),
        })
    }

    // ---- Passages ----

    /// Verses of one chapter.
    ///
    /// `chapter` is the caller's raw text. Text that is not an integer is a
    /// bad request; an integer outside `1..=chapter_count`, or a chapter
    /// with no verses, is reported as not found.
    pub fn get_verses(
        &self,
        version: &VersionId,
        book: &str,
        chapter: &str,
    ) -> QueryResult<Passage> {
        let collection = self.collection(version)?;
        let record = Self::book(&collection, version, book)?;
        let not_found = || QueryError::ChapterNotFound {
            chapter: chapter.to_string(),
            book: record.canonical.clone(),
        };
        let text = chapter.trim();
        let number = match text.parse::<i64>() {
            Ok(n) => usize::try_from(n).map_err(|_| not_found())?,
            // Integer text too wide for i64 is still out of range.
            Err(_) if is_integer_text(text) => return Err(not_found()),
            Err(_) => return Err(QueryError::InvalidChapter(chapter.to_string())),
        };
        let verses = record
            .chapter(number)
            .filter(|v| !v.is_empty())
            .ok_or_else(not_found)?;

        Ok(Passage {
            version: version.to_string(),
            book: record.display_name(),
            chapter: number,
            verses: verses.clone(),
        })
    }

    // ---- Search ----

    /// Case-insensitive substring search over every verse of a version.
    ///
    /// Hits are ordered by book (source order), then chapter, then verse.
    pub fn search(&self, version: &VersionId, theme: &str) -> QueryResult<SearchResults> {
        if theme.is_empty() {
            return Err(QueryError::EmptyTheme);
        }
        let collection = self.collection(version)?;
        let needle = theme.to_lowercase();

        let mut hits = Vec::new();
        for record in collection.iter() {
            let book = record.display_name();
            for (c, verses) in record.chapters.iter().enumerate() {
                for (v, text) in verses.iter().enumerate() {
                    if text.to_lowercase().contains(&needle) {
                        hits.push(VerseHit {
                            version: version.to_string(),
                            book: book.clone(),
                            chapter: c + 1,
                            verse_number: v + 1,
                            text: text.clone(),
                        });
                    }
                }
            }
        }
        tracing::debug!(version = %version, theme, hits = hits.len(), "search complete");
        Ok(SearchResults::from(hits))
    }

    // ---- Random ----

    pub fn random_verse(&self, version: &VersionId) -> QueryResult<VerseHit> {
        self.random_verse_with(version, &mut rand::thread_rng())
    }

    /// Pick a book with chapters, then a chapter, then a verse, each
    /// uniformly.
    ///
    /// `verse_number` is the position of the first verse in the chapter
    /// whose text equals the drawn text, so a chapter with repeated verse
    /// text reports the earliest repeat.
    pub fn random_verse_with<R: Rng + ?Sized>(
        &self,
        version: &VersionId,
        rng: &mut R,
    ) -> QueryResult<VerseHit> {
        let collection = self.collection(version)?;
        let candidates: Vec<&BookRecord> = collection.iter().filter(|b| b.has_chapters()).collect();
        let record = candidates
            .choose(rng)
            .copied()
            .ok_or_else(|| QueryError::NoChapters(version.clone()))?;

        let index = rng.gen_range(0..record.chapter_count());
        let verses = &record.chapters[index];
        let empty = || QueryError::EmptyChapter {
            book: record.canonical.clone(),
            chapter: index + 1,
        };
        let text = verses.choose(rng).ok_or_else(empty)?;
        let position = verses.iter().position(|v| v == text).ok_or_else(empty)?;

        Ok(VerseHit {
            version: version.to_string(),
            book: canon::display_name(&record.canonical),
            chapter: index + 1,
            verse_number: position + 1,
            text: text.clone(),
        })
    }
}

impl std::fmt::Debug for Verbum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verbum").field("cache", &self.cache).finish()
    }
}

/// An optional sign followed by one or more ASCII digits.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use verbum_store::InMemoryVersionSource;

    fn v(code: &str) -> VersionId {
        VersionId::new(code).unwrap()
    }

    fn chapter(verses: &[&str]) -> Vec<String> {
        verses.iter().map(|s| s.to_string()).collect()
    }

    /// ARA: Genesis (2 chapters), Exodus (1 chapter with an empty second),
    /// and a book with no chapters at all.
    fn fixture() -> (Arc<InMemoryVersionSource>, Verbum) {
        let ara = VersionCollection::from_books([
            BookRecord::new(
                "genesis",
                vec![chapter(&["In the beginning"]), chapter(&["Then God said"])],
            )
            .with_name("Genesis")
            .with_abbrev("gn")
            .with_group("Law"),
            BookRecord::new(
                "exodo",
                vec![chapter(&["These are the names", "And Joseph died"]), vec![]],
            )
            .with_abbrev("ex"),
            BookRecord::new("obadias", vec![]).with_name("Obadiah"),
        ]);
        let test = VersionCollection::from_books([BookRecord::new(
            "test",
            vec![chapter(&["love one another", "keep the commandments"])],
        )]);
        let source = Arc::new(
            InMemoryVersionSource::new()
                .with_version(v("ARA"), ara)
                .with_version(v("TEST_VERSION"), test),
        );
        let service = Verbum::new(source.clone());
        (source, service)
    }

    // ---- Listings ----

    #[test]
    fn list_books_in_source_order_with_placeholders() {
        let (_, svc) = fixture();
        let books = svc.list_books(&v("ARA")).unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(
            books[0],
            BookSummary {
                name: "Genesis".into(),
                abbrev: "gn".into(),
                group: "Law".into()
            }
        );
        assert_eq!(books[1].name, UNKNOWN_NAME);
        assert_eq!(books[1].group, UNKNOWN_GROUP);
        assert_eq!(books[2].abbrev, UNKNOWN_ABBREV);
    }

    #[test]
    fn count_books_matches_listing() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        assert_eq!(svc.count_books(&ara).unwrap(), svc.list_books(&ara).unwrap().len());
    }

    #[test]
    fn chapter_counts_agree() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        let listed = svc.list_books_with_chapter_counts(&ara).unwrap();
        assert_eq!(
            listed.iter().map(|b| b.chapter_count).collect::<Vec<_>>(),
            vec![2, 2, 0]
        );
        assert_eq!(svc.count_chapters(&ara, "gn").unwrap().chapter_count, 2);
        assert_eq!(svc.count_chapters(&ara, "ex").unwrap().chapter_count, 2);
        assert_eq!(svc.count_chapters(&ara, "obadias").unwrap().chapter_count, 0);
    }

    #[test]
    fn count_chapters_reports_display_name() {
        let (_, svc) = fixture();
        let count = svc.count_chapters(&v("ARA"), "Gn.").unwrap();
        assert_eq!(count.book, "Genesis");
    }

    #[test]
    fn count_chapters_unknown_book() {
        let (_, svc) = fixture();
        let err = svc.count_chapters(&v("ARA"), "ap").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("'ap'"));
    }

    #[test]
    fn missing_version_is_not_found_and_not_cached() {
        let (source, svc) = fixture();
        let nvi = v("NVI");
        let err = svc.count_books(&nvi).unwrap_err();
        assert_eq!(err, QueryError::VersionNotFound(nvi.clone()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!svc.cache().contains(&nvi));

        svc.count_books(&nvi).unwrap_err();
        assert_eq!(source.load_count(), 2);
    }

    #[test]
    fn version_loaded_once_across_operations() {
        let (source, svc) = fixture();
        let ara = v("ARA");
        svc.list_books(&ara).unwrap();
        svc.count_books(&ara).unwrap();
        svc.get_verses(&ara, "gn", "1").unwrap();
        svc.search(&ara, "god").unwrap();
        assert_eq!(source.load_count(), 1);
    }

    // ---- Passages ----

    #[test]
    fn get_verses_scenario() {
        let (_, svc) = fixture();
        let passage = svc.get_verses(&v("ARA"), "gn", "2").unwrap();
        assert_eq!(
            passage,
            Passage {
                version: "ARA".into(),
                book: "Genesis".into(),
                chapter: 2,
                verses: vec!["Then God said".into()],
            }
        );
    }

    #[test]
    fn get_verses_every_chapter_in_range() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        let n = svc.count_chapters(&ara, "gn").unwrap().chapter_count;
        for k in 1..=n {
            assert!(svc.get_verses(&ara, "gn", &k.to_string()).is_ok());
        }
        for k in [0, n + 1] {
            let err = svc.get_verses(&ara, "gn", &k.to_string()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[test]
    fn get_verses_oversized_chapter_is_not_found() {
        let (_, svc) = fixture();
        let oversized = [
            "99999999999999999999",
            "-99999999999999999999",
            "+18446744073709551616",
        ];
        for raw in oversized {
            let err = svc.get_verses(&v("ARA"), "gn", raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{raw}");
        }
    }

    #[test]
    fn get_verses_negative_chapter_is_not_found() {
        let (_, svc) = fixture();
        let err = svc.get_verses(&v("ARA"), "gn", "-1").unwrap_err();
        assert!(matches!(err, QueryError::ChapterNotFound { .. }));
    }

    #[test]
    fn get_verses_non_integer_is_bad_request() {
        let (_, svc) = fixture();
        for raw in ["x", "1.5", ""] {
            let err = svc.get_verses(&v("ARA"), "gn", raw).unwrap_err();
            assert_eq!(err, QueryError::InvalidChapter(raw.into()));
            assert_eq!(err.kind(), ErrorKind::BadRequest);
        }
    }

    #[test]
    fn get_verses_accepts_padded_and_signed_integers() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        assert_eq!(svc.get_verses(&ara, "gn", " 2 ").unwrap().chapter, 2);
        assert_eq!(svc.get_verses(&ara, "gn", "+1").unwrap().chapter, 1);
        assert_eq!(svc.get_verses(&ara, "gn", "02").unwrap().chapter, 2);
    }

    #[test]
    fn get_verses_empty_chapter_is_not_found() {
        let (_, svc) = fixture();
        let err = svc.get_verses(&v("ARA"), "ex", "2").unwrap_err();
        assert_eq!(
            err,
            QueryError::ChapterNotFound {
                chapter: "2".into(),
                book: "exodo".into()
            }
        );
    }

    #[test]
    fn get_verses_unknown_book_checked_before_chapter() {
        let (_, svc) = fixture();
        let err = svc.get_verses(&v("ARA"), "zz", "x").unwrap_err();
        assert!(matches!(err, QueryError::BookNotFound { .. }));
    }

    // ---- Search ----

    #[test]
    fn search_scenario() {
        let (_, svc) = fixture();
        let results = svc.search(&v("TEST_VERSION"), "love").unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(
            results.results[0],
            VerseHit {
                version: "TEST_VERSION".into(),
                book: "Test".into(),
                chapter: 1,
                verse_number: 1,
                text: "love one another".into(),
            }
        );
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let (_, svc) = fixture();
        let results = svc.search(&v("ARA"), "THE").unwrap();
        let refs: Vec<(String, usize, usize)> = results
            .results
            .iter()
            .map(|h| (h.book.clone(), h.chapter, h.verse_number))
            .collect();
        assert_eq!(
            refs,
            vec![
                ("Genesis".to_string(), 1, 1),
                ("Genesis".to_string(), 2, 1),
                ("Exodo".to_string(), 1, 1),
            ]
        );
        assert_eq!(results.count, 3);
    }

    #[test]
    fn search_count_matches_brute_force() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        let collection = svc.cache().get_or_load(&ara).unwrap();
        for theme in ["e", "god", "joseph", "nothing here"] {
            let expected = collection
                .iter()
                .flat_map(|b| b.chapters.iter().flatten())
                .filter(|t| t.to_lowercase().contains(theme))
                .count();
            assert_eq!(svc.search(&ara, theme).unwrap().count, expected);
        }
    }

    #[test]
    fn search_empty_theme_is_bad_request() {
        let (source, svc) = fixture();
        let err = svc.search(&v("ARA"), "").unwrap_err();
        assert_eq!(err, QueryError::EmptyTheme);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(source.load_count(), 0);
    }

    // ---- Random ----

    #[test]
    fn random_verse_is_a_real_verse() {
        let (_, svc) = fixture();
        let ara = v("ARA");
        let collection = svc.cache().get_or_load(&ara).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let hit = svc.random_verse_with(&ara, &mut rng);
            let hit = match hit {
                Ok(hit) => hit,
                // Exodus chapter 2 is empty.
                Err(QueryError::EmptyChapter { book, chapter }) => {
                    assert_eq!((book.as_str(), chapter), ("exodo", 2));
                    continue;
                }
                Err(other) => panic!("unexpected error: {other}"),
            };
            let book = collection.find(&hit.book).unwrap();
            let verses = book.chapter(hit.chapter).unwrap();
            assert!(hit.verse_number >= 1 && hit.verse_number <= verses.len());
            assert_eq!(verses[hit.verse_number - 1], hit.text);
            assert_ne!(hit.book, "Obadias");
        }
    }

    #[test]
    fn random_verse_default_rng() {
        let (_, svc) = fixture();
        let hit = svc.random_verse(&v("TEST_VERSION")).unwrap();
        assert_eq!(hit.book, "Test");
        assert_eq!(hit.chapter, 1);
    }

    #[test]
    fn random_verse_without_chapters_is_not_found() {
        let source = Arc::new(InMemoryVersionSource::new().with_version(
            v("TB"),
            VersionCollection::from_books([BookRecord::new("empty", vec![])]),
        ));
        let svc = Verbum::new(source);
        let err = svc.random_verse(&v("TB")).unwrap_err();
        assert_eq!(err, QueryError::NoChapters(v("TB")));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn random_verse_reports_first_occurrence_of_repeated_text() {
        let source = Arc::new(InMemoryVersionSource::new().with_version(
            v("TB"),
            VersionCollection::from_books([BookRecord::new(
                "salmos",
                vec![chapter(&["Amen", "Amen", "Amen"])],
            )]),
        ));
        let svc = Verbum::new(source);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let hit = svc.random_verse_with(&v("TB"), &mut rng).unwrap();
            assert_eq!(hit.verse_number, 1);
        }
    }

    proptest! {
        #[test]
        fn random_verse_in_range_for_any_seed(seed in any::<u64>()) {
            let (_, svc) = fixture();
            let mut rng = StdRng::seed_from_u64(seed);
            let hit = svc.random_verse_with(&v("TEST_VERSION"), &mut rng).unwrap();
            prop_assert!(hit.verse_number == 1 || hit.verse_number == 2);
            prop_assert_eq!(hit.chapter, 1);
        }
    }
}
