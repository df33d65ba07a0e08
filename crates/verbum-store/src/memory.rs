use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use verbum_types::VersionId;

use crate::book::VersionCollection;
use crate::error::StoreResult;
use crate::traits::VersionSource;

/// In-memory, HashMap-based version source.
///
/// Intended for tests and embedding. Counts every `load` call so callers can
/// observe how often a cache in front of it goes to the source.
pub struct InMemoryVersionSource {
    versions: RwLock<HashMap<VersionId, VersionCollection>>,
    loads: AtomicUsize,
}

impl InMemoryVersionSource {
    pub fn new() -> Self {
        Self {
            versions: RwLock::new(HashMap::new()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Add or replace a version.
    pub fn insert(&self, version: VersionId, collection: VersionCollection) {
        self.versions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(version, collection);
    }

    pub fn with_version(self, version: VersionId, collection: VersionCollection) -> Self {
        self.insert(version, collection);
        self
    }

    /// Number of `load` calls served so far, hits and misses alike.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryVersionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionSource for InMemoryVersionSource {
    fn load(&self, version: &VersionId) -> StoreResult<Option<VersionCollection>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let map = self.versions.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(version).cloned())
    }
}

impl std::fmt::Debug for InMemoryVersionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .versions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("InMemoryVersionSource")
            .field("version_count", &count)
            .field("loads", &self.load_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookRecord;

    fn nvi() -> VersionId {
        VersionId::new("NVI").unwrap()
    }

    #[test]
    fn insert_and_load() {
        let src = InMemoryVersionSource::new().with_version(
            nvi(),
            VersionCollection::from_books([BookRecord::new("genesis", vec![])]),
        );
        let c = src.load(&nvi()).unwrap().unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(src.load_count(), 1);
    }

    #[test]
    fn unknown_version_is_none_and_counted() {
        let src = InMemoryVersionSource::new();
        assert!(src.load(&nvi()).unwrap().is_none());
        assert!(src.load(&nvi()).unwrap().is_none());
        assert_eq!(src.load_count(), 2);
    }

    #[test]
    fn insert_replaces_existing_version() {
        let src = InMemoryVersionSource::new().with_version(nvi(), VersionCollection::new());
        src.insert(
            nvi(),
            VersionCollection::from_books([BookRecord::new("genesis", vec![])]),
        );
        assert_eq!(src.load(&nvi()).unwrap().unwrap().len(), 1);
    }
}
